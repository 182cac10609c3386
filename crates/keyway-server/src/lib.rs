//! HTTP server for Keyway.
//!
//! Serves `ledger_entry` over JSON-RPC at `/`, raw-key lookups at
//! `/v1/ledger_entry/raw`, and a health check at `/v1/health`, all over a
//! shared read-only ledger history.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use endpoint::{endpoints, HealthResponse, RpcRequest};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::KeywayServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use keyway_crypto::keylet;
    use keyway_store::{FieldValue, InMemoryLedgerHistory, InMemorySnapshot, LedgerObject};
    use keyway_types::{AccountId, LedgerEntryType};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn owner() -> AccountId {
        AccountId::from_bytes([7; 20])
    }

    fn app_with(config: ServerConfig) -> Router {
        let history = InMemoryLedgerHistory::new();
        let entries = [(
            keylet::account(&owner()).key,
            LedgerObject::new(LedgerEntryType::AccountRoot)
                .with("Account", FieldValue::Account(owner())),
        )];
        history
            .add_closed(InMemorySnapshot::with_entries(10, entries).unwrap())
            .unwrap();
        history.set_validated(10).unwrap();
        KeywayServer::new(config, Arc::new(history)).router()
    }

    fn app() -> Router {
        app_with(ServerConfig::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn rpc(params: Value) -> Value {
        json!({"method": "ledger_entry", "params": [params]})
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn ledger_entry_over_rpc() {
        let (status, body) =
            send(app(), post_json("/", rpc(json!({"account_root": owner().to_base58()})))).await;
        assert_eq!(status, StatusCode::OK);
        let result = &body["result"];
        assert_eq!(result["status"], "success");
        assert_eq!(result["index"], keylet::account(&owner()).key.to_hex());
        assert_eq!(result["ledger_index"], 10);
        assert_eq!(result["validated"], true);
    }

    #[tokio::test]
    async fn rpc_errors_are_results() {
        let (status, body) = send(app(), post_json("/", rpc(json!({"did": "nope"})))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["error"], "malformedAddress");
    }

    #[tokio::test]
    async fn api_version_from_request_and_config() {
        let (_, body) = send(app(), post_json("/", rpc(json!({"foo": 1})))).await;
        assert_eq!(body["result"]["error"], "unknownOption");

        let (_, body) = send(app(), post_json("/", rpc(json!({"foo": 1, "api_version": 2})))).await;
        assert_eq!(body["result"]["error"], "invalidParams");

        let config = ServerConfig {
            default_api_version: 2,
            ..Default::default()
        };
        let (_, body) = send(app_with(config), post_json("/", rpc(json!({"foo": 1})))).await;
        assert_eq!(body["result"]["error"], "invalidParams");

        let (_, body) = send(app(), post_json("/", rpc(json!({"foo": 1, "api_version": 9})))).await;
        assert_eq!(body["result"]["error"], "invalid_API_version");
    }

    #[tokio::test]
    async fn coercion_fault_under_v1_is_internal() {
        let (status, body) =
            send(app(), post_json("/", rpc(json!({"account_root": {"a": 1}})))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["error"], "internal");
    }

    #[tokio::test]
    async fn unknown_method() {
        let (_, body) = send(app(), post_json("/", json!({"method": "ledger_data"}))).await;
        assert_eq!(body["result"]["error"], "unknownCmd");
    }

    #[tokio::test]
    async fn raw_lookup() {
        let key = keylet::account(&owner()).key;
        let (status, body) = send(
            app(),
            post_json("/v1/ledger_entry/raw", json!({"key": key.to_hex()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ledger_object"]["key"], key.to_hex());
        assert_eq!(body["ledger"], json!({"shortcut": "validated"}));
        let data = hex::decode(body["ledger_object"]["data"].as_str().unwrap()).unwrap();
        assert_eq!(
            LedgerObject::from_bytes(&data).unwrap().entry_type,
            LedgerEntryType::AccountRoot
        );
    }

    #[tokio::test]
    async fn raw_lookup_statuses() {
        let (status, body) = send(
            app(),
            post_json("/v1/ledger_entry/raw", json!({"key": "ABCD"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_argument");

        let (status, _) = send(
            app(),
            post_json("/v1/ledger_entry/raw", json!({"key": "00".repeat(32)})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            app(),
            post_json(
                "/v1/ledger_entry/raw",
                json!({"key": "00".repeat(32), "ledger": {"sequence": 99}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_request_rejected() {
        let config = ServerConfig {
            max_request_bytes: 64,
            ..Default::default()
        };
        let padding = "x".repeat(256);
        let (status, _) = send(
            app_with(config),
            post_json("/", rpc(json!({"account_root": padding}))),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
