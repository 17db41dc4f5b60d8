// GET /ws handler

use std::convert::Infallible;

use futures_util::{SinkExt, StreamExt};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info};
use warp::reply::Response;
use warp::ws::{Message, WebSocket, Ws};
use warp::Reply;

use crate::session::{parse_session_id, SessionId};
use crate::state::AppState;

pub async fn ws_handler(
    ws: Ws,
    state: AppState,
    cookie: Option<String>,
) -> Result<Response, Infallible> {
    // Sockets without a live session are accepted but never receive anything
    let session = match parse_session_id(cookie.as_deref()) {
        Some(id) if state.sessions.user_id(id).await.is_some() => Some(id),
        _ => None,
    };

    Ok(ws
        .on_upgrade(move |socket| client_connected(socket, state, session))
        .into_response())
}

async fn client_connected(socket: WebSocket, state: AppState, session: Option<SessionId>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (client_id, frames) = state.clients.register(session);
    info!(client = client_id, authenticated = session.is_some(), "websocket connected");

    tokio::spawn(async move {
        let mut frames = UnboundedReceiverStream::new(frames);
        while let Some(frame) = frames.next().await {
            if let Err(e) = ws_tx.send(Message::text(frame)).await {
                debug!(client = client_id, error = %e, "websocket send failed");
                break;
            }
        }
    });

    // Inbound messages are ignored; we only watch for the socket to close
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(msg) if msg.is_close() => break,
            Ok(_) => {}
            Err(e) => {
                debug!(client = client_id, error = %e, "websocket receive failed");
                break;
            }
        }
    }

    state.clients.unregister(client_id);
    info!(client = client_id, "websocket disconnected");
}
