use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::store::{
    error::{Result, StoreError},
    password,
    types::{NewUser, User},
};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get::<_, DateTime<Utc>>("created_at"),
    }
}

/// Insert a user with a freshly hashed password
///
/// # Errors
///
/// * `StoreError::Validation` - blank username, email or password
/// * `StoreError::Conflict` - email already registered
/// * `StoreError::Database` - any other SQL error
pub async fn create_user(pool: &Pool, new_user: NewUser<'_>) -> Result<User> {
    let new_user = new_user.validated()?;
    let password_hash = password::hash_password_blocking(new_user.password.to_string()).await?;

    let user = User {
        id: Uuid::new_v4(),
        username: new_user.username.to_string(),
        email: new_user.email.to_string(),
        password_hash,
        created_at: Utc::now(),
    };

    let conn = pool.get().await?;
    conn.execute(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES ($1, $2, $3, $4, $5)",
        &[
            &user.id,
            &user.username,
            &user.email,
            &user.password_hash,
            &user.created_at,
        ],
    )
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::Conflict(_) => {
            StoreError::Conflict(format!("email {} is already registered", user.email))
        }
        other => other,
    })?;

    Ok(user)
}

/// Look up a user by email and verify the password
pub async fn authenticate_user(pool: &Pool, email: &str, password: &str) -> Result<User> {
    let conn = pool.get().await?;
    let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    let row = conn.query_opt(&sql, &[&email.trim()]).await?;

    let user = match row {
        Some(row) => user_from_row(&row),
        None => return Err(StoreError::InvalidCredentials),
    };

    let matches =
        password::verify_password_blocking(password.to_string(), user.password_hash.clone())
            .await?;
    if !matches {
        return Err(StoreError::InvalidCredentials);
    }

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool, id: Uuid) -> Result<User> {
    let conn = pool.get().await?;
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let row = conn
        .query_opt(&sql, &[&id])
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

    Ok(user_from_row(&row))
}
