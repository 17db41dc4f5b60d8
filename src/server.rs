//! Web front-end startup

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use warp::Filter;

use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::ChatProvider;
use crate::routes::configure_routes;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Repository, StoreConfig};

/// Open the store the web front-end persists to
pub async fn open_store(database_url: &str, in_memory: bool) -> Result<Arc<dyn Repository>> {
    if in_memory {
        info!("using in-memory store; nothing will be persisted");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let config = StoreConfig::from_connection_string(database_url)?;
    Ok(Arc::new(PgStore::connect(config).await?))
}

/// The full route tree over a fresh [`AppState`]
///
/// The tree owns everything it serves, including its copy of `static_dir`.
pub fn app_routes(
    provider: Arc<dyn ChatProvider>,
    store: Arc<dyn Repository>,
    static_dir: &Path,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone + Send + Sync + 'static {
    configure_routes(AppState::new(provider, store), static_dir.to_path_buf())
}

/// Serve the web front-end until the process is stopped
pub async fn serve(
    provider: Arc<dyn ChatProvider>,
    store: Arc<dyn Repository>,
    static_dir: &Path,
    addr: SocketAddr,
) {
    let routes = app_routes(provider, store, static_dir);

    info!(%addr, static_dir = %static_dir.display(), "starting web server");
    warp::serve(routes).run(addr).await;
}

/// Start the web front-end described by `config`
pub async fn run(
    config: &AppConfig,
    provider: Arc<dyn ChatProvider>,
    in_memory: bool,
) -> Result<()> {
    let store = open_store(&config.database_url, in_memory).await?;
    serve(provider, store, &config.static_dir, config.bind_addr).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct NoProvider;

    #[async_trait]
    impl ChatProvider for NoProvider {
        async fn complete(&self, _prompt: &str) -> std::result::Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }
    }

    fn assert_serveable<F>(_routes: &F)
    where
        F: Filter + Clone + Send + Sync + 'static,
    {
    }

    #[tokio::test]
    async fn test_routes_outlive_static_dir_borrow() {
        let routes = {
            let dir = PathBuf::from("static");
            app_routes(Arc::new(NoProvider), Arc::new(MemoryStore::new()), &dir)
        };
        assert_serveable(&routes);

        let response = warp::test::request().method("GET").path("/").reply(&routes).await;
        assert_eq!(response.status(), warp::http::StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store("unused", true).await.unwrap();
        assert!(store.get_chat_history(uuid::Uuid::new_v4()).await.unwrap().is_empty());
    }
}
