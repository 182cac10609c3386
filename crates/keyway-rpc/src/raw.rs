//! Raw-key lookups.
//!
//! A lower-level path for binary transports: the caller supplies the key
//! bytes directly, so there is no classification, derivation or type check.
//! Failures are reported as a [`Status`] that separates bad input from
//! absence.

use bytes::Bytes;
use keyway_store::{LedgerHistory, LedgerSelector};
use keyway_types::Key256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerShortcut {
    Current,
    Closed,
    #[default]
    Validated,
}

/// Which ledger to read, as sent by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSpecifier {
    Sequence(u32),
    Hash(#[serde(with = "hex_bytes")] Bytes),
    Shortcut(LedgerShortcut),
}

impl Default for LedgerSpecifier {
    fn default() -> Self {
        Self::Shortcut(LedgerShortcut::default())
    }
}

impl LedgerSpecifier {
    fn selector(&self) -> Result<LedgerSelector, Status> {
        Ok(match self {
            Self::Sequence(seq) => LedgerSelector::Sequence(*seq),
            Self::Hash(bytes) => LedgerSelector::Hash(
                Key256::from_slice(bytes)
                    .map_err(|_| Status::invalid_argument("ledger hash malformed"))?,
            ),
            Self::Shortcut(LedgerShortcut::Current) => LedgerSelector::Current,
            Self::Shortcut(LedgerShortcut::Closed) => LedgerSelector::Closed,
            Self::Shortcut(LedgerShortcut::Validated) => LedgerSelector::Validated,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLedgerEntryRequest {
    #[serde(default)]
    pub ledger: LedgerSpecifier,
    #[serde(with = "hex_bytes")]
    pub key: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLedgerObject {
    #[serde(with = "hex_bytes")]
    pub key: Bytes,
    #[serde(with = "hex_bytes")]
    pub data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLedgerEntryResponse {
    /// The ledger reference from the request, echoed back.
    pub ledger: LedgerSpecifier,
    pub ledger_object: RawLedgerObject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    InvalidArgument,
    NotFound,
    Internal,
}

/// Transport-level failure of a raw lookup.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::NotFound,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::Internal,
            message: message.into(),
        }
    }
}

/// Look up the entry stored under the raw key in `request`.
pub fn get_ledger_entry(
    history: &dyn LedgerHistory,
    request: &RawLedgerEntryRequest,
) -> Result<RawLedgerEntryResponse, Status> {
    let selector = request.ledger.selector()?;
    let ledger = history
        .ledger(&selector)
        .map_err(|e| Status::internal(e.to_string()))?
        .ok_or_else(|| Status::not_found("ledger not found"))?;

    let key = Key256::from_slice(&request.key)
        .map_err(|_| Status::invalid_argument("index malformed"))?;

    let object = ledger
        .view
        .read(&key)
        .map_err(|e| Status::internal(e.to_string()))?
        .ok_or_else(|| {
            tracing::debug!(%key, "raw ledger entry not found");
            Status::not_found("object not found")
        })?;
    let data = object.to_bytes().map_err(|e| Status::internal(e.to_string()))?;

    Ok(RawLedgerEntryResponse {
        ledger: request.ledger.clone(),
        ledger_object: RawLedgerObject {
            key: request.key.clone(),
            data: Bytes::from(data),
        },
    })
}

mod hex_bytes {
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text)
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{acct, sample_history};
    use keyway_crypto::keylet;
    use keyway_store::LedgerObject;
    use keyway_types::LedgerEntryType;

    fn request(ledger: LedgerSpecifier, key: &[u8]) -> RawLedgerEntryRequest {
        RawLedgerEntryRequest {
            ledger,
            key: Bytes::copy_from_slice(key),
        }
    }

    #[test]
    fn found() {
        let key = keylet::account(&acct(1)).key;
        let req = request(LedgerSpecifier::Sequence(2), key.as_bytes());
        let resp = get_ledger_entry(&sample_history(), &req).unwrap();
        assert_eq!(resp.ledger, LedgerSpecifier::Sequence(2));
        assert_eq!(&resp.ledger_object.key[..], key.as_bytes());
        let object = LedgerObject::from_bytes(&resp.ledger_object.data).unwrap();
        assert_eq!(object.entry_type, LedgerEntryType::AccountRoot);
    }

    #[test]
    fn no_type_check() {
        // Any stored type is returned.
        let key = keylet::offer(&acct(1), 5).key;
        let req = request(LedgerSpecifier::default(), key.as_bytes());
        assert!(get_ledger_entry(&sample_history(), &req).is_ok());
    }

    #[test]
    fn wrong_key_width() {
        for width in [0, 31, 33] {
            let req = request(LedgerSpecifier::default(), &vec![1u8; width]);
            let status = get_ledger_entry(&sample_history(), &req).unwrap_err();
            assert_eq!(status.code, StatusCode::InvalidArgument);
            assert_eq!(status.message, "index malformed");
        }
    }

    #[test]
    fn absent_key() {
        let req = request(LedgerSpecifier::default(), &[0xEE; 32]);
        let status = get_ledger_entry(&sample_history(), &req).unwrap_err();
        assert_eq!(status, Status::not_found("object not found"));
    }

    #[test]
    fn ledger_failures() {
        let history = sample_history();
        let key = keylet::account(&acct(1)).key;

        let req = request(LedgerSpecifier::Hash(Bytes::from_static(&[1, 2, 3])), key.as_bytes());
        let status = get_ledger_entry(&history, &req).unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);

        let req = request(LedgerSpecifier::Sequence(40), key.as_bytes());
        let status = get_ledger_entry(&history, &req).unwrap_err();
        assert_eq!(status.code, StatusCode::NotFound);

        let req = request(LedgerSpecifier::Hash(Bytes::from(vec![9u8; 32])), key.as_bytes());
        let status = get_ledger_entry(&history, &req).unwrap_err();
        assert_eq!(status, Status::not_found("ledger not found"));
    }

    #[test]
    fn validated_is_default() {
        // The ticket exists only in ledger 2, which is not validated.
        let key = keylet::ticket(&acct(1), 9).key;
        let req = request(LedgerSpecifier::default(), key.as_bytes());
        assert_eq!(
            get_ledger_entry(&sample_history(), &req).unwrap_err().code,
            StatusCode::NotFound
        );
        let req = request(LedgerSpecifier::Shortcut(LedgerShortcut::Current), key.as_bytes());
        assert!(get_ledger_entry(&sample_history(), &req).is_ok());
    }

    #[test]
    fn json_wire_form() {
        let text = format!(r#"{{"key": "{}"}}"#, "AB".repeat(32));
        let req: RawLedgerEntryRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(req.ledger, LedgerSpecifier::Shortcut(LedgerShortcut::Validated));
        assert_eq!(req.key.len(), 32);

        let text = r#"{"ledger": {"sequence": 3}, "key": "00"}"#;
        let req: RawLedgerEntryRequest = serde_json::from_str(text).unwrap();
        assert_eq!(req.ledger, LedgerSpecifier::Sequence(3));

        let text = r#"{"ledger": {"shortcut": "closed"}, "key": ""}"#;
        let req: RawLedgerEntryRequest = serde_json::from_str(text).unwrap();
        assert_eq!(req.ledger, LedgerSpecifier::Shortcut(LedgerShortcut::Closed));
    }
}
