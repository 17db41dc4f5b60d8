use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{
    error::{Result, StoreError},
    password,
    repository::Repository,
    types::{ChatHistory, NewUser, User},
};

/// In-process store
///
/// Used by tests and by the web front-end when started with `--memory-store`.
/// Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    chats: RwLock<HashMap<Uuid, ChatHistory>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let new_user = NewUser {
            username,
            email,
            password,
        }
        .validated()?;

        let password_hash = password::hash_password_blocking(new_user.password.to_string()).await?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                new_user.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.to_string(),
            email: new_user.email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        let user = {
            let users = self.users.read().await;
            users.values().find(|u| u.email == email).cloned()
        };
        let user = user.ok_or(StoreError::InvalidCredentials)?;

        let matches =
            password::verify_password_blocking(password.to_string(), user.password_hash.clone())
                .await?;
        if !matches {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(user)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<User> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
    }

    async fn save_chat_history(&self, user_id: Uuid, messages: &[String]) -> Result<()> {
        let now = Utc::now();
        let mut chats = self.chats.write().await;
        chats
            .entry(user_id)
            .and_modify(|chat| {
                chat.messages = messages.to_vec();
                chat.updated_at = now;
            })
            .or_insert_with(|| ChatHistory {
                id: Uuid::new_v4(),
                user_id,
                messages: messages.to_vec(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn get_chat_history(&self, user_id: Uuid) -> Result<Vec<String>> {
        let chats = self.chats.read().await;
        Ok(chats
            .get(&user_id)
            .map(|chat| chat.messages.clone())
            .unwrap_or_default())
    }

    async fn clear_chat_history(&self, user_id: Uuid) -> Result<()> {
        self.chats.write().await.remove(&user_id);
        Ok(())
    }
}
