use async_trait::async_trait;
use uuid::Uuid;

use crate::store::error::Result;
use crate::store::types::User;

/// User accounts and per-user chat history
///
/// Implemented by [`PgStore`](crate::store::PgStore) and
/// [`MemoryStore`](crate::store::MemoryStore).
#[async_trait]
pub trait Repository: Send + Sync {
    /// Hash the password and insert a new user
    ///
    /// Fails with `StoreError::Conflict` if the email is already registered.
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<User>;

    /// Look up by email and verify the password
    ///
    /// Unknown email and wrong password both fail with
    /// `StoreError::InvalidCredentials`.
    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<User>;

    /// Replace the user's stored history (upsert)
    async fn save_chat_history(&self, user_id: Uuid, messages: &[String]) -> Result<()>;

    /// The user's stored history, empty if none was saved
    async fn get_chat_history(&self, user_id: Uuid) -> Result<Vec<String>>;

    /// Delete the user's stored history; a no-op when there is none
    async fn clear_chat_history(&self, user_id: Uuid) -> Result<()>;
}
