//! Decoding of request fields into typed identifiers.

use keyway_types::{AccountId, Currency, Issue, Key256, XChainBridge};
use serde_json::Value;
use thiserror::Error;

/// Why an issue or bridge descriptor could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0} must be an object")]
    NotObject(&'static str),

    #[error("currency must be a string")]
    CurrencyNotString,

    #[error("invalid currency {0:?}")]
    InvalidCurrency(String),

    #[error("native currency must not have an issuer")]
    NativeWithIssuer,

    #[error("issuer must be a string")]
    IssuerNotString,

    #[error("invalid issuer {0:?}")]
    InvalidIssuer(String),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("unexpected field {0}")]
    UnexpectedField(String),

    #[error("{field} must be a valid account")]
    InvalidDoor { field: &'static str },
}

pub fn parse_account(text: &str) -> Option<AccountId> {
    AccountId::from_base58(text).ok()
}

pub fn parse_digest(text: &str) -> Option<Key256> {
    Key256::from_hex(text).ok()
}

/// Parse a currency code. The ISO-coded native marker and the "no
/// currency" value are not accepted.
pub fn parse_currency(text: &str) -> Option<Currency> {
    Currency::from_code(text)
        .ok()
        .filter(|c| *c != Currency::bad_currency() && *c != Currency::no_currency())
}

/// Decode `{"currency": ..., "issuer": ...}`.
///
/// The native currency must not carry an issuer; any other currency must.
pub fn issue_from_json(value: &Value) -> Result<Issue, CodecError> {
    let object = value.as_object().ok_or(CodecError::NotObject("issue"))?;
    let currency = match object.get("currency") {
        Some(Value::String(code)) => code,
        _ => return Err(CodecError::CurrencyNotString),
    };
    let currency =
        parse_currency(currency).ok_or_else(|| CodecError::InvalidCurrency(currency.clone()))?;
    let issuer = object.get("issuer").filter(|v| !v.is_null());

    if currency.is_native() {
        return match issuer {
            None => Ok(Issue::native()),
            Some(_) => Err(CodecError::NativeWithIssuer),
        };
    }

    let issuer = match issuer {
        Some(Value::String(address)) => address,
        _ => return Err(CodecError::IssuerNotString),
    };
    let account =
        parse_account(issuer).ok_or_else(|| CodecError::InvalidIssuer(issuer.clone()))?;
    Ok(Issue::new(currency, account))
}

pub const LOCKING_CHAIN_DOOR: &str = "LockingChainDoor";
pub const LOCKING_CHAIN_ISSUE: &str = "LockingChainIssue";
pub const ISSUING_CHAIN_DOOR: &str = "IssuingChainDoor";
pub const ISSUING_CHAIN_ISSUE: &str = "IssuingChainIssue";

const BRIDGE_FIELDS: [&str; 4] = [
    LOCKING_CHAIN_DOOR,
    LOCKING_CHAIN_ISSUE,
    ISSUING_CHAIN_DOOR,
    ISSUING_CHAIN_ISSUE,
];

/// Decode a full bridge descriptor. Every leg must be present and no other
/// field is allowed.
pub fn bridge_from_json(value: &Value) -> Result<XChainBridge, CodecError> {
    let object = value.as_object().ok_or(CodecError::NotObject("bridge"))?;
    if let Some(extra) = object.keys().find(|k| !BRIDGE_FIELDS.contains(&k.as_str())) {
        return Err(CodecError::UnexpectedField(extra.clone()));
    }
    let door = |field: &'static str| -> Result<AccountId, CodecError> {
        match object.get(field) {
            Some(Value::String(address)) => {
                parse_account(address).ok_or(CodecError::InvalidDoor { field })
            }
            Some(_) => Err(CodecError::InvalidDoor { field }),
            None => Err(CodecError::MissingField(field)),
        }
    };
    let issue = |field: &'static str| -> Result<Issue, CodecError> {
        object
            .get(field)
            .ok_or(CodecError::MissingField(field))
            .and_then(issue_from_json)
    };
    Ok(XChainBridge::new(
        door(LOCKING_CHAIN_DOOR)?,
        issue(LOCKING_CHAIN_ISSUE)?,
        door(ISSUING_CHAIN_DOOR)?,
        issue(ISSUING_CHAIN_ISSUE)?,
    ))
}
