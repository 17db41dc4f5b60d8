// Shared state handed to every web handler

use std::sync::Arc;

use crate::llm::ChatProvider;
use crate::session::SessionRegistry;
use crate::store::Repository;
use crate::ws::ClientRegistry;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ChatProvider>,
    pub store: Arc<dyn Repository>,
    pub sessions: Arc<SessionRegistry>,
    pub clients: Arc<ClientRegistry>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ChatProvider>, store: Arc<dyn Repository>) -> Self {
        Self {
            provider,
            store,
            sessions: Arc::new(SessionRegistry::new()),
            clients: Arc::new(ClientRegistry::new()),
        }
    }
}
