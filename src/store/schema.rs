use deadpool_postgres::Pool;

use crate::store::error::Result;

/// Tables for users and chat history
///
/// `chats.user_id` is unique so that saving history is an upsert.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    username      TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS chats (
    id         UUID PRIMARY KEY,
    user_id    UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    messages   JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
"#;

/// Create the tables if they do not exist yet
pub async fn init_schema(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;
    conn.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}
