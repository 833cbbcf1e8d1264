use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::UserRow;

fn default_last_name() -> String {
    "lastName".to_string()
}

fn default_location() -> String {
    "my city".to_string()
}

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default = "default_last_name")]
    #[validate(length(max = 20, message = "Last name must be at most 20 characters"))]
    pub last_name: String,
    #[serde(default = "default_location")]
    #[validate(length(max = 20, message = "Location must be at most 20 characters"))]
    pub location: String,
}

/// Both fields default to empty so a missing one reaches the
/// "Please provide email and password" check instead of a parse error
#[derive(Deserialize, Debug, Default, Validate)]
pub struct LoginUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "Please provide all values"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Please provide all values"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 20, message = "Please provide all values"))]
    pub location: String,
}

/// Profile plus a fresh token, as the dashboard client expects it
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub email: String,
    pub last_name: String,
    pub location: String,
    pub name: String,
    pub token: String,
}

impl AuthUser {
    pub fn new(user: UserRow, token: String) -> Self {
        AuthUser {
            email: user.email,
            last_name: user.last_name,
            location: user.location,
            name: user.name,
            token,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub user: AuthUser,
}
