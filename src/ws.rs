//! Registry of open WebSocket connections

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::debug;

use crate::models::ServerEvent;
use crate::session::SessionId;

pub type ClientId = u64;

struct Client {
    session: Option<SessionId>,
    sender: mpsc::UnboundedSender<String>,
}

/// Connected sockets, each tagged with the session that opened it
///
/// A single mutex guards registration, removal and broadcast iteration.
/// Sending never blocks: each socket has its own unbounded queue drained by
/// the connection task.
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<ClientId, Client>>,
    next_id: AtomicU64,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection; the receiver yields every frame broadcast to it
    pub fn register(
        &self,
        session: Option<SessionId>,
    ) -> (ClientId, mpsc::UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().insert(id, Client { session, sender });
        (id, receiver)
    }

    pub fn unregister(&self, id: ClientId) {
        self.lock().remove(&id);
    }

    /// Send `event` to every connection of `session`
    ///
    /// Connections whose receiving side is gone are dropped from the
    /// registry. Returns the number of connections the event was queued for.
    pub fn broadcast(&self, session: SessionId, event: &ServerEvent) -> usize {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(_) => return 0,
        };

        let mut clients = self.lock();
        let mut delivered = 0;
        clients.retain(|id, client| {
            if client.session != Some(session) {
                return true;
            }
            match client.sender.send(frame.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    debug!(client = id, "dropping closed websocket client");
                    false
                }
            }
        });
        delivered
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ClientId, Client>> {
        // A panic while holding the lock leaves the map itself intact
        self.clients.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
