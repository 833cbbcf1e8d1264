pub mod auth;
pub mod error;
pub mod health;
pub mod job;
pub mod validation;

use actix_web::web;

/// Versioned JSON API: `/api/v1/auth/*` and `/api/v1/jobs/*`
pub fn api_config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api/v1")
            .configure(auth::handlers::auth_config)
            .configure(job::handlers::job_config),
    );
}
