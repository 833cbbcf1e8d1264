use std::sync::Arc;

use tracing::{info, warn};

use crate::api::auth::extractor::AuthenticatedUser;
use crate::api::auth::models::{AuthResponse, AuthUser, LoginUser, RegisterUser, UpdateUser};
use crate::api::auth::password::{hash_password, verify_password};
use crate::api::auth::token::TokenKeys;
use crate::api::error::ServiceError;
use crate::db::models::{NewUser, ProfileUpdate, UserRow};
use crate::db::store::UserStore;

/// Registration, login and profile updates
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: TokenKeys,
    hash_cost: Option<u32>,
}

fn invalid_credentials() -> ServiceError {
    ServiceError::Unauthenticated("Invalid Credentials".to_string())
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: TokenKeys) -> Self {
        Self {
            users,
            keys,
            hash_cost: None,
        }
    }

    /// bcrypt cost for new hashes; the library default when unset
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = Some(cost);
        self
    }

    fn respond(&self, user: UserRow) -> Result<AuthResponse, ServiceError> {
        let token = self.keys.issue(user.id, &user.name)?;
        Ok(AuthResponse {
            user: AuthUser::new(user, token),
        })
    }

    pub async fn register(&self, input: &RegisterUser) -> Result<AuthResponse, ServiceError> {
        info!("Service: Registering user with email={}", input.email);

        let password_hash = hash_password(&input.password, self.hash_cost).await?;
        let user = self
            .users
            .create(NewUser {
                name: &input.name,
                last_name: &input.last_name,
                email: &input.email,
                location: &input.location,
                password_hash: &password_hash,
            })
            .await?;

        info!("Service: User registered with id={}", user.id);
        self.respond(user)
    }

    pub async fn login(&self, input: &LoginUser) -> Result<AuthResponse, ServiceError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ServiceError::ValidationFailure(
                "Please provide email and password".to_string(),
            ));
        }

        let Some(user) = self.users.find_by_email(input.email.trim()).await? else {
            warn!("Service: Login attempt for unknown email");
            return Err(invalid_credentials());
        };

        if !verify_password(&input.password, &user.password_hash).await? {
            warn!("Service: Wrong password for user id={}", user.id);
            return Err(invalid_credentials());
        }

        info!("Service: User id={} logged in", user.id);
        self.respond(user)
    }

    pub async fn update_user(
        &self,
        caller: &AuthenticatedUser,
        input: &UpdateUser,
    ) -> Result<AuthResponse, ServiceError> {
        caller.ensure_writable()?;

        let id = caller.owner.get();
        let user = self
            .users
            .update_profile(
                id,
                ProfileUpdate {
                    name: &input.name,
                    last_name: &input.last_name,
                    email: &input.email,
                    location: &input.location,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user with id {}", id)))?;

        info!("Service: User id={} updated profile", id);
        self.respond(user)
    }
}
