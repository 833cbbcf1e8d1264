use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::api::auth::token::Authenticator;
use crate::api::error::ServiceError;
use crate::engine::owner::OwnerId;

/// Caller identity taken from a verified `Authorization: Bearer` token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub owner: OwnerId,
    pub name: String,
    pub read_only: bool,
}

impl AuthenticatedUser {
    /// Refuse mutations from the read-only demo account
    pub fn ensure_writable(&self) -> Result<(), ServiceError> {
        if self.read_only {
            Err(ServiceError::ValidationFailure("Test User. Read Only!".to_string()))
        } else {
            Ok(())
        }
    }
}

fn invalid() -> ServiceError {
    ServiceError::Unauthenticated("Authentication invalid".to_string())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let authenticator = req
        .app_data::<web::Data<Authenticator>>()
        .ok_or_else(|| ServiceError::Internal("authenticator is not configured".to_string()))?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(invalid)?;

    let claims = authenticator.keys.verify(token)?;
    let user_id: i32 = claims.sub.parse().map_err(|_| invalid())?;

    Ok(AuthenticatedUser {
        owner: OwnerId::from_verified(user_id),
        name: claims.name,
        read_only: authenticator.is_read_only(user_id),
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
