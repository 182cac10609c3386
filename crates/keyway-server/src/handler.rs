use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use keyway_rpc::{
    api_version, do_ledger_entry, get_ledger_entry, ErrorKind, RawLedgerEntryRequest,
    RawLedgerEntryResponse, RpcFault, Status,
};
use keyway_store::LedgerHistory;
use serde_json::{json, Map, Value};

use crate::endpoint::{HealthResponse, RpcRequest};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<dyn LedgerHistory>,
    pub default_api_version: u32,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// JSON-RPC entry point. Every outcome, including errors, is a 200 whose
/// body is `{"result": ...}`.
pub async fn rpc_handler(
    State(state): State<AppState>,
    Json(request): Json<RpcRequest>,
) -> Json<Value> {
    Json(json!({ "result": dispatch(&state, request) }))
}

fn dispatch(state: &AppState, request: RpcRequest) -> Value {
    if request.method != "ledger_entry" {
        tracing::debug!(method = %request.method, "unknown method");
        return ErrorKind::UnknownCommand.to_response();
    }
    let params = request
        .params
        .into_iter()
        .next()
        .unwrap_or_else(|| Value::Object(Map::new()));
    let version = match params.as_object() {
        Some(object) => match api_version(object, state.default_api_version) {
            Ok(version) => version,
            Err(kind) => return kind.to_response(),
        },
        None => state.default_api_version,
    };

    match do_ledger_entry(state.history.as_ref(), &params, version) {
        Ok(result) => result,
        Err(RpcFault::Coercion(fault)) => {
            tracing::warn!(%fault, "ledger_entry aborted");
            internal_error(fault.to_string())
        }
        Err(fault) => {
            tracing::error!(%fault, "ledger_entry failed");
            internal_error(fault.to_string())
        }
    }
}

fn internal_error(message: String) -> Value {
    let mut result = Map::new();
    ErrorKind::Internal.inject(&mut result);
    result.insert("error_exception".into(), Value::String(message));
    Value::Object(result)
}

/// Raw-key lookup. Failures map to 400, 404 or 500.
pub async fn raw_ledger_entry_handler(
    State(state): State<AppState>,
    Json(request): Json<RawLedgerEntryRequest>,
) -> Result<Json<RawLedgerEntryResponse>, StatusError> {
    get_ledger_entry(state.history.as_ref(), &request)
        .map(Json)
        .map_err(StatusError)
}

/// A raw lookup [`Status`] rendered as an HTTP response.
#[derive(Debug)]
pub struct StatusError(pub Status);

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let code = match self.0.code {
            keyway_rpc::StatusCode::InvalidArgument => StatusCode::BAD_REQUEST,
            keyway_rpc::StatusCode::NotFound => StatusCode::NOT_FOUND,
            keyway_rpc::StatusCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, Json(self.0)).into_response()
    }
}
