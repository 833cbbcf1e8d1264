pub mod extractor;
pub mod handlers;
pub mod limiter;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use limiter::AuthRateLimiter;
pub use service::AuthService;
pub use token::{Authenticator, TokenKeys};
