use serde::{Deserialize, Serialize};

/// HTTP endpoint paths.
pub mod endpoints {
    pub const RPC: &str = "/";
    pub const LEDGER_ENTRY_RAW: &str = "/v1/ledger_entry/raw";
    pub const HEALTH: &str = "/v1/health";
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_versions: [u32; 2],
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            api_versions: [keyway_rpc::API_VERSION_MIN, keyway_rpc::API_VERSION_MAX],
        }
    }
}

/// A JSON-RPC request body: `{"method": ..., "params": [{...}]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        let h = HealthResponse::default();
        assert_eq!(h.status, "ok");
        assert_eq!(h.api_versions, [1, 2]);
    }

    #[test]
    fn rpc_request_params_optional() {
        let req: RpcRequest = serde_json::from_str(r#"{"method": "ledger_entry"}"#).unwrap();
        assert!(req.params.is_empty());
    }
}
