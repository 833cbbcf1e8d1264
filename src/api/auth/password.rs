// Password hashing, run off the async workers

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::api::error::ServiceError;

/// Hash with bcrypt at `cost` (default [`DEFAULT_COST`]) on the blocking pool
pub async fn hash_password(password: &str, cost: Option<u32>) -> Result<String, ServiceError> {
    let password = password.to_string();
    let cost = cost.unwrap_or(DEFAULT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| ServiceError::Internal(format!("hashing failed: {}", e)))
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("Task join error: {}", e)))?
}

/// `Ok(false)` on mismatch; `Err` only when the hash itself is unusable
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, ServiceError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed)
            .map_err(|e| ServiceError::Internal(format!("hash verification failed: {}", e)))
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("Task join error: {}", e)))?
}
