use chrono::Utc;
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::store::error::Result;

/// Replace the user's history, inserting the row on first save
pub async fn save_chat_history(pool: &Pool, user_id: Uuid, messages: &[String]) -> Result<()> {
    let conn = pool.get().await?;
    let messages = serde_json::to_value(messages)?;
    let now = Utc::now();

    conn.execute(
        "INSERT INTO chats (id, user_id, messages, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $4) \
         ON CONFLICT (user_id) DO UPDATE \
         SET messages = EXCLUDED.messages, updated_at = EXCLUDED.updated_at",
        &[&Uuid::new_v4(), &user_id, &messages, &now],
    )
    .await?;

    Ok(())
}

pub async fn get_chat_history(pool: &Pool, user_id: Uuid) -> Result<Vec<String>> {
    let conn = pool.get().await?;
    let row = conn
        .query_opt("SELECT messages FROM chats WHERE user_id = $1", &[&user_id])
        .await?;

    match row {
        Some(row) => {
            let value: serde_json::Value = row.get("messages");
            Ok(serde_json::from_value(value)?)
        }
        None => Ok(Vec::new()),
    }
}

pub async fn clear_chat_history(pool: &Pool, user_id: Uuid) -> Result<()> {
    let conn = pool.get().await?;
    conn.execute("DELETE FROM chats WHERE user_id = $1", &[&user_id])
        .await?;
    Ok(())
}
