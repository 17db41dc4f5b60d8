//! Salted adaptive password hashing (bcrypt)

use bcrypt::DEFAULT_COST;
use tracing::warn;

use crate::store::error::{Result, StoreError};

/// Hash `password` with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, DEFAULT_COST)?)
}

/// Check `password` against a stored bcrypt hash
///
/// A stored hash that cannot be parsed never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    match bcrypt::verify(password, stored_hash) {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "stored password hash is unusable");
            Ok(false)
        }
    }
}

/// [`hash_password`] on the blocking pool
pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| StoreError::Hashing(e.to_string()))?
}

/// [`verify_password`] on the blocking pool
pub async fn verify_password_blocking(password: String, stored_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| StoreError::Hashing(e.to_string()))?
}
