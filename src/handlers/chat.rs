// POST /chat and POST /new-chat handlers

use std::convert::Infallible;

use tracing::{error, info};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use super::{authenticate, text};
use crate::models::{ChatForm, ChatResponse, ServerEvent};
use crate::session::SessionId;
use crate::state::AppState;

pub async fn chat_handler(
    state: AppState,
    cookie: Option<String>,
    form: ChatForm,
) -> Result<Response, Infallible> {
    let Some((session, user)) = authenticate(&state, cookie.as_deref()).await else {
        return Ok(text("Unauthorized", StatusCode::UNAUTHORIZED));
    };

    if form.message.trim().is_empty() {
        return Ok(text("Message is required", StatusCode::BAD_REQUEST));
    }
    let message = form.message.as_str();

    info!(user_id = %user.id, chars = message.len(), "chat message");
    let Some(turn) = state.sessions.push_user(session, message).await else {
        return Ok(text("Unauthorized", StatusCode::UNAUTHORIZED));
    };

    // No session lock is held while waiting on the upstream API
    let reply = match state.provider.complete(message).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(user_id = %user.id, error = %e, "chat completion failed");
            return Ok(text("Error contacting the language model", StatusCode::BAD_GATEWAY));
        }
    };

    match state.sessions.push_ai(session, turn, &reply).await {
        Some(lines) => {
            if let Err(e) = state.store.save_chat_history(user.id, &lines).await {
                error!(user_id = %user.id, error = %e, "failed to save chat history");
            }

            if state.sessions.generation(session).await == Some(turn) {
                state.clients.broadcast(
                    session,
                    &ServerEvent::Turn {
                        user: message.to_string(),
                        reply: reply.clone(),
                    },
                );
            } else {
                // The chat was cleared while the save was in flight
                resync_history(&state, session, user.id).await;
            }
        }
        None => info!(user_id = %user.id, "reply dropped; chat was cleared while waiting"),
    }

    Ok(warp::reply::json(&ChatResponse { response: reply }).into_response())
}

pub async fn new_chat_handler(state: AppState, cookie: Option<String>) -> Result<Response, Infallible> {
    let Some((session, user)) = authenticate(&state, cookie.as_deref()).await else {
        return Ok(text("Unauthorized", StatusCode::UNAUTHORIZED));
    };

    state.sessions.clear(session).await;

    if let Err(e) = state.store.clear_chat_history(user.id).await {
        error!(user_id = %user.id, error = %e, "failed to clear chat history");
        return Ok(text("Error clearing chat history", StatusCode::INTERNAL_SERVER_ERROR));
    }

    state.clients.broadcast(session, &ServerEvent::Cleared);
    info!(user_id = %user.id, "chat cleared");

    Ok(StatusCode::OK.into_response())
}

/// Overwrite the stored history with the session's current transcript
async fn resync_history(state: &AppState, session: SessionId, user_id: Uuid) {
    let lines = state.sessions.snapshot(session).await.unwrap_or_default();
    let result = if lines.is_empty() {
        state.store.clear_chat_history(user_id).await
    } else {
        state.store.save_chat_history(user_id, &lines).await
    };
    if let Err(e) = result {
        error!(user_id = %user_id, error = %e, "failed to resync chat history");
    }
}
