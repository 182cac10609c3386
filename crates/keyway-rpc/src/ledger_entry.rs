//! The JSON `ledger_entry` handler.
//!
//! Pipeline: open ledger, resolve the request to a key, look the key up,
//! type-check, format. Exactly one error is reported per request.

use keyway_store::LedgerHistory;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, RpcResult};
use crate::format::{format_entry, OutputMode};
use crate::json::as_bool;
use crate::ledger::{ledger_fields, ledger_selector};
use crate::lookup::{lookup, LookupError};
use crate::resolve::{resolve, Resolution};

/// Handle one `ledger_entry` request.
///
/// Request errors come back as an `Ok` response carrying `error`. An `Err`
/// means the request could not be answered at all: a coercion fault under
/// API version 1, or a snapshot read failure.
pub fn do_ledger_entry(
    history: &dyn LedgerHistory,
    params: &Value,
    api_version: u32,
) -> RpcResult<Value> {
    let Some(params) = params.as_object() else {
        return Ok(ErrorKind::InvalidParams.to_response());
    };
    let selector = match ledger_selector(params) {
        Ok(selector) => selector,
        Err(kind) => return Ok(kind.to_response()),
    };
    let Some(ledger) = history.ledger(&selector)? else {
        return Ok(ErrorKind::LedgerNotFound.to_response());
    };

    let mut result = Map::new();
    ledger_fields(&ledger, &mut result);

    let spec = match resolve(params, api_version)? {
        Resolution::Resolved(spec) => spec,
        Resolution::Malformed(kind) => {
            kind.inject(&mut result);
            return Ok(Value::Object(result));
        }
    };

    let key = spec.key();
    let mode = OutputMode::from_flag(params.get("binary").is_some_and(as_bool));
    match lookup(ledger.view.as_ref(), &key, spec.expected_type()) {
        Ok(object) => {
            format_entry(&mut result, &key, &object, mode)?;
            result.insert("status".into(), Value::String("success".into()));
        }
        Err(LookupError::Store(e)) => return Err(e.into()),
        Err(err) => {
            tracing::debug!(%err, "ledger entry lookup failed");
            err.kind().unwrap_or(ErrorKind::Internal).inject(&mut result);
        }
    }
    Ok(Value::Object(result))
}
