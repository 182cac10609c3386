//! Choosing which ledger a JSON request reads from.

use keyway_store::{LedgerSelector, OpenLedger};
use keyway_types::Key256;
use serde_json::{Map, Value};

use crate::error::ErrorKind;

/// Pick a ledger from `ledger_hash` or `ledger_index`.
///
/// `ledger_hash` takes precedence. `ledger_index` accepts a sequence number
/// (as a number or a decimal string) or one of `current`, `closed` and
/// `validated`. With neither field the current ledger is used.
pub fn ledger_selector(params: &Map<String, Value>) -> Result<LedgerSelector, ErrorKind> {
    if let Some(hash) = params.get("ledger_hash") {
        return hash
            .as_str()
            .and_then(|text| Key256::from_hex(text).ok())
            .map(LedgerSelector::Hash)
            .ok_or(ErrorKind::InvalidParams);
    }
    let Some(index) = params.get("ledger_index") else {
        return Ok(LedgerSelector::Current);
    };
    match index {
        Value::Number(n) => n
            .as_u64()
            .and_then(|seq| u32::try_from(seq).ok())
            .map(LedgerSelector::Sequence)
            .ok_or(ErrorKind::InvalidParams),
        Value::String(text) => match text.as_str() {
            "current" => Ok(LedgerSelector::Current),
            "closed" => Ok(LedgerSelector::Closed),
            "validated" => Ok(LedgerSelector::Validated),
            other => other
                .parse()
                .map(LedgerSelector::Sequence)
                .map_err(|_| ErrorKind::InvalidParams),
        },
        _ => Err(ErrorKind::InvalidParams),
    }
}

/// Describe the opened ledger in a response.
pub fn ledger_fields(ledger: &OpenLedger, result: &mut Map<String, Value>) {
    let header = ledger.header();
    result.insert("ledger_index".into(), Value::from(header.seq));
    result.insert("ledger_hash".into(), Value::String(header.hash.to_hex()));
    result.insert("validated".into(), Value::Bool(ledger.validated));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn select(params: Value) -> Result<LedgerSelector, ErrorKind> {
        ledger_selector(params.as_object().unwrap())
    }

    #[test]
    fn defaults_to_current() {
        assert_eq!(select(json!({})), Ok(LedgerSelector::Current));
    }

    #[test]
    fn by_index() {
        assert_eq!(select(json!({"ledger_index": 5})), Ok(LedgerSelector::Sequence(5)));
        assert_eq!(select(json!({"ledger_index": "5"})), Ok(LedgerSelector::Sequence(5)));
        assert_eq!(
            select(json!({"ledger_index": "validated"})),
            Ok(LedgerSelector::Validated)
        );
        assert_eq!(select(json!({"ledger_index": "closed"})), Ok(LedgerSelector::Closed));
    }

    #[test]
    fn by_hash() {
        let hash = Key256::from_hash([4; 32]);
        assert_eq!(
            select(json!({"ledger_hash": hash.to_hex(), "ledger_index": 1})),
            Ok(LedgerSelector::Hash(hash))
        );
    }

    #[test]
    fn malformed_selectors() {
        for params in [
            json!({"ledger_hash": "abc"}),
            json!({"ledger_hash": 5}),
            json!({"ledger_index": -1}),
            json!({"ledger_index": 1.5}),
            json!({"ledger_index": "latest"}),
            json!({"ledger_index": [1]}),
        ] {
            assert_eq!(select(params), Err(ErrorKind::InvalidParams));
        }
    }
}
