use serde_json::{Map, Value};

use crate::error::ErrorKind;

pub const API_VERSION_MIN: u32 = 1;
pub const API_VERSION_MAX: u32 = 2;

/// Read `api_version` from request params, falling back to `default`.
pub fn api_version(params: &Map<String, Value>, default: u32) -> Result<u32, ErrorKind> {
    let Some(value) = params.get("api_version") else {
        return Ok(default);
    };
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| (API_VERSION_MIN..=API_VERSION_MAX).contains(v))
        .ok_or(ErrorKind::InvalidApiVersion)
}
