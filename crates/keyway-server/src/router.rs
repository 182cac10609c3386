use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoint::endpoints;
use crate::handler::{self, AppState};

/// Build the axum router with all Keyway endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route(endpoints::RPC, post(handler::rpc_handler))
        .route(endpoints::LEDGER_ENTRY_RAW, post(handler::raw_ledger_entry_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.max_request_bytes)),
        );

    if config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}
