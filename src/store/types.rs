use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The stored transcript of one user; at most one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Rendered lines, each "You: ..." or "AI: ..."
    pub messages: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> NewUser<'a> {
    /// Trim identifiers and reject blank fields
    pub fn validated(self) -> crate::store::Result<NewUser<'a>> {
        let username = self.username.trim();
        let email = self.email.trim();

        if username.is_empty() {
            return Err(crate::store::StoreError::Validation("username is required".to_string()));
        }
        if email.is_empty() {
            return Err(crate::store::StoreError::Validation("email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(crate::store::StoreError::Validation("password is required".to_string()));
        }

        Ok(NewUser {
            username,
            email,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["username"], "ada");
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_new_user_validation() {
        let ok = NewUser {
            username: "  ada ",
            email: " ada@example.com ",
            password: "pw",
        }
        .validated()
        .unwrap();
        assert_eq!(ok.username, "ada");
        assert_eq!(ok.email, "ada@example.com");

        let blank = NewUser {
            username: "ada",
            email: "   ",
            password: "pw",
        }
        .validated();
        assert!(blank.is_err());
    }
}
