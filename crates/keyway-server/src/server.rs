use std::sync::Arc;

use keyway_store::{InMemoryLedgerHistory, LedgerHistory};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Keyway ledger entry server.
pub struct KeywayServer {
    config: ServerConfig,
    history: Arc<dyn LedgerHistory>,
}

impl KeywayServer {
    pub fn new(config: ServerConfig, history: Arc<dyn LedgerHistory>) -> Self {
        Self { config, history }
    }

    /// Build a server over the fixture named in `config`, or over an empty
    /// history if there is none.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let history = match &config.fixture {
            Some(path) => {
                tracing::info!(fixture = %path.display(), "loading ledger fixture");
                InMemoryLedgerHistory::load_fixture(path)?
            }
            None => InMemoryLedgerHistory::new(),
        };
        Ok(Self::new(config, Arc::new(history)))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState {
            history: Arc::clone(&self.history),
            default_api_version: self.config.default_api_version,
        };
        build_router(state, &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Keyway server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
