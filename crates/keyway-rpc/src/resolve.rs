//! Turns request fields into a [`RequestSpecifier`].
//!
//! Each category has its own validator. Structure is checked before any
//! field is decoded, and every failure maps to exactly one [`ErrorKind`].
//! A failed validation never carries a key.

use keyway_types::{AccountId, ChainType, Currency, Key256, XChainBridge};
use serde_json::{Map, Value};

use crate::classify::{classify, Category, ExpectedType, Selection};
use crate::codec::{
    bridge_from_json, issue_from_json, parse_account, parse_digest, ISSUING_CHAIN_DOOR,
    ISSUING_CHAIN_ISSUE, LOCKING_CHAIN_DOOR, LOCKING_CHAIN_ISSUE,
};
use crate::error::ErrorKind;
use crate::json::{as_string, as_u32, is_integral, CoercionError};
use crate::specifier::{DirectoryRoot, RequestSpecifier};

/// Outcome of resolving a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(RequestSpecifier),
    Malformed(ErrorKind),
}

impl Resolution {
    /// The derived key, if resolution succeeded.
    pub fn key(&self) -> Option<Key256> {
        match self {
            Self::Resolved(spec) => Some(spec.key()),
            Self::Malformed(_) => None,
        }
    }

    pub fn expected_type(&self) -> Option<ExpectedType> {
        match self {
            Self::Resolved(spec) => Some(spec.expected_type()),
            Self::Malformed(_) => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Self::Resolved(_) => None,
            Self::Malformed(kind) => Some(*kind),
        }
    }
}

/// Resolve request `params` into a specifier.
///
/// A value that cannot be coerced while reading fields is returned as an
/// error under API version 1 and reported as `invalidParams` from version 2.
pub fn resolve(
    params: &Map<String, Value>,
    api_version: u32,
) -> Result<Resolution, CoercionError> {
    let outcome = match classify(params) {
        Selection::Field { category, value } => parse_field(category, value, params),
        Selection::Legacy(index) => parse_digest(index)
            .map(|key| RequestSpecifier::Digest {
                category: Category::Index,
                key,
            })
            .ok_or(Reject::Malformed(ErrorKind::MalformedRequest)),
        Selection::Unrecognized if api_version < 2 => {
            Err(Reject::Malformed(ErrorKind::UnknownOption))
        }
        Selection::Unrecognized => Err(Reject::Malformed(ErrorKind::InvalidParams)),
    };

    match outcome {
        Ok(spec) => {
            tracing::debug!(%spec, key = %spec.key(), "resolved ledger entry request");
            Ok(Resolution::Resolved(spec))
        }
        Err(Reject::Malformed(kind)) => {
            tracing::debug!(error = %kind, "malformed ledger entry request");
            Ok(Resolution::Malformed(kind))
        }
        Err(Reject::Coercion(fault)) if api_version > 1 => {
            tracing::warn!(%fault, "request field coercion failed");
            Ok(Resolution::Malformed(ErrorKind::InvalidParams))
        }
        Err(Reject::Coercion(fault)) => {
            tracing::warn!(%fault, "request field coercion failed, propagating");
            Err(fault)
        }
    }
}

enum Reject {
    Malformed(ErrorKind),
    Coercion(CoercionError),
}

impl From<ErrorKind> for Reject {
    fn from(kind: ErrorKind) -> Self {
        Self::Malformed(kind)
    }
}

impl From<CoercionError> for Reject {
    fn from(fault: CoercionError) -> Self {
        Self::Coercion(fault)
    }
}

type Parse<T> = Result<T, Reject>;

const MALFORMED: Reject = Reject::Malformed(ErrorKind::MalformedRequest);

fn parse_field(
    category: Category,
    value: &Value,
    params: &Map<String, Value>,
) -> Parse<RequestSpecifier> {
    match category {
        Category::Index => digest(category, value),
        Category::AccountRoot => {
            nonzero_account(value, ErrorKind::MalformedAddress).map(RequestSpecifier::AccountRoot)
        }
        Category::Check | Category::PaymentChannel | Category::NftPage => {
            string_digest(category, value)
        }
        Category::DepositPreauth => deposit_preauth(value),
        Category::Directory => directory(value),
        Category::Escrow | Category::Offer | Category::Ticket => owned_sequence(category, value),
        Category::RippleState => ripple_state(value),
        Category::Amm => amm(value),
        Category::Bridge => bridge(value, params),
        Category::XChainOwnedClaimId | Category::XChainOwnedCreateAccountClaimId => {
            claim_id(category, value)
        }
        Category::Did => {
            nonzero_account(value, ErrorKind::MalformedAddress).map(RequestSpecifier::Did)
        }
        Category::Oracle => oracle(value),
    }
}

/// Any scalar, read as text and parsed as a 64-hex digest.
fn digest(category: Category, value: &Value) -> Parse<RequestSpecifier> {
    let text = as_string(value)?;
    let key = parse_digest(&text).ok_or(MALFORMED)?;
    Ok(RequestSpecifier::Digest { category, key })
}

/// Only a JSON string holding a 64-hex digest.
fn string_digest(category: Category, value: &Value) -> Parse<RequestSpecifier> {
    match value {
        Value::String(_) => digest(category, value),
        _ => Err(MALFORMED),
    }
}

fn account(value: &Value, kind: ErrorKind) -> Parse<AccountId> {
    let text = as_string(value)?;
    Ok(parse_account(&text).ok_or(kind)?)
}

fn nonzero_account(value: &Value, kind: ErrorKind) -> Parse<AccountId> {
    match account(value, kind)? {
        id if id.is_zero() => Err(kind.into()),
        id => Ok(id),
    }
}

fn string_member<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    object.get(name).and_then(Value::as_str)
}

fn deposit_preauth(value: &Value) -> Parse<RequestSpecifier> {
    let Some(object) = value.as_object() else {
        return string_digest(Category::DepositPreauth, value);
    };
    let (Some(owner), Some(authorized)) = (
        string_member(object, "owner"),
        string_member(object, "authorized"),
    ) else {
        return Err(MALFORMED);
    };
    let owner = parse_account(owner).ok_or(ErrorKind::MalformedOwner)?;
    let authorized = parse_account(authorized).ok_or(ErrorKind::MalformedAuthorized)?;
    Ok(RequestSpecifier::DepositPreauth { owner, authorized })
}

/// `sub_index` is checked before the `dir_root`/`owner` exclusivity rule.
fn directory(value: &Value) -> Parse<RequestSpecifier> {
    if value.is_null() {
        return Err(MALFORMED);
    }
    let Some(object) = value.as_object() else {
        return digest(Category::Directory, value);
    };
    let sub_index = match object.get("sub_index") {
        Some(sub) if !is_integral(sub) => return Err(MALFORMED),
        Some(sub) => u64::from(as_u32(sub)?),
        None => 0,
    };
    let root = match (object.get("dir_root"), object.get("owner")) {
        (Some(_), Some(_)) => return Err(MALFORMED),
        (Some(root), None) => {
            let text = as_string(root)?;
            DirectoryRoot::Root(parse_digest(&text).ok_or(MALFORMED)?)
        }
        (None, Some(owner)) => {
            DirectoryRoot::Owner(account(owner, ErrorKind::MalformedAddress)?)
        }
        (None, None) => return Err(MALFORMED),
    };
    Ok(RequestSpecifier::Directory { root, sub_index })
}

/// Escrow, offer and ticket: an account plus an integral sequence.
fn owned_sequence(category: Category, value: &Value) -> Parse<RequestSpecifier> {
    let Some(object) = value.as_object() else {
        return digest(category, value);
    };
    let (account_field, seq_field, bad_account) = match category {
        Category::Escrow => ("owner", "seq", ErrorKind::MalformedOwner),
        Category::Ticket => ("account", "ticket_seq", ErrorKind::MalformedAddress),
        _ => ("account", "seq", ErrorKind::MalformedAddress),
    };
    let (Some(owner), Some(seq)) = (object.get(account_field), object.get(seq_field)) else {
        return Err(MALFORMED);
    };
    if !is_integral(seq) {
        return Err(MALFORMED);
    }
    let account = account(owner, bad_account)?;
    let seq = as_u32(seq)?;
    Ok(match category {
        Category::Escrow => RequestSpecifier::Escrow { owner: account, seq },
        Category::Ticket => RequestSpecifier::Ticket {
            account,
            ticket_seq: seq,
        },
        _ => RequestSpecifier::Offer { account, seq },
    })
}

fn ripple_state(value: &Value) -> Parse<RequestSpecifier> {
    let object = value.as_object().ok_or(MALFORMED)?;
    let currency = object.get("currency").ok_or(MALFORMED)?;
    let [first, second] = match object.get("accounts").and_then(Value::as_array) {
        Some(accounts) if accounts.len() == 2 => match (&accounts[0], &accounts[1]) {
            (Value::String(a), Value::String(b)) if a != b => [a, b],
            _ => return Err(MALFORMED),
        },
        _ => return Err(MALFORMED),
    };
    let (Some(a), Some(b)) = (parse_account(first), parse_account(second)) else {
        return Err(ErrorKind::MalformedAddress.into());
    };
    let currency =
        Currency::from_code(&as_string(currency)?).map_err(|_| ErrorKind::MalformedCurrency)?;
    Ok(RequestSpecifier::RippleState {
        accounts: [a, b],
        currency,
    })
}

fn amm(value: &Value) -> Parse<RequestSpecifier> {
    let Some(object) = value.as_object() else {
        return digest(Category::Amm, value);
    };
    let (Some(asset), Some(asset2)) = (object.get("asset"), object.get("asset2")) else {
        return Err(MALFORMED);
    };
    let asset = issue_from_json(asset).map_err(|_| MALFORMED)?;
    let asset2 = issue_from_json(asset2).map_err(|_| MALFORMED)?;
    if asset == asset2 {
        return Err(MALFORMED);
    }
    Ok(RequestSpecifier::Amm { asset, asset2 })
}

/// The door named by top-level `bridge_account` picks the chain side.
fn bridge(value: &Value, params: &Map<String, Value>) -> Parse<RequestSpecifier> {
    let door = string_member(params, "bridge_account")
        .and_then(parse_account)
        .filter(|id| !id.is_zero())
        .ok_or(MALFORMED)?;
    let bridge = bridge_from_json(value).map_err(|_| MALFORMED)?;
    let chain = ChainType::src_chain(door == bridge.locking_chain_door);
    if door != bridge.door(chain) {
        return Err(MALFORMED);
    }
    Ok(RequestSpecifier::Bridge { bridge, chain })
}

/// Claim IDs take a digest string, or all four bridge legs plus a sequence
/// under the category's own field name.
fn claim_id(category: Category, value: &Value) -> Parse<RequestSpecifier> {
    if value.is_string() {
        return digest(category, value);
    }
    let object = value.as_object().ok_or(MALFORMED)?;
    let (Some(issuing_door), Some(locking_door)) = (
        string_member(object, ISSUING_CHAIN_DOOR),
        string_member(object, LOCKING_CHAIN_DOOR),
    ) else {
        return Err(MALFORMED);
    };
    let (Some(issuing_issue), Some(locking_issue), Some(seq)) = (
        object.get(ISSUING_CHAIN_ISSUE),
        object.get(LOCKING_CHAIN_ISSUE),
        object.get(category.field()),
    ) else {
        return Err(MALFORMED);
    };

    let locking_door = parse_account(locking_door).ok_or(MALFORMED)?;
    let issuing_door = parse_account(issuing_door).ok_or(MALFORMED)?;
    let locking_issue = issue_from_json(locking_issue).map_err(|_| MALFORMED)?;
    let issuing_issue = issue_from_json(issuing_issue).map_err(|_| MALFORMED)?;
    if !is_integral(seq) {
        return Err(MALFORMED);
    }
    let seq = u64::from(as_u32(seq)?);

    let bridge = XChainBridge::new(locking_door, locking_issue, issuing_door, issuing_issue);
    Ok(match category {
        Category::XChainOwnedCreateAccountClaimId => {
            RequestSpecifier::XChainOwnedCreateAccountClaimId { bridge, seq }
        }
        _ => RequestSpecifier::XChainOwnedClaimId { bridge, seq },
    })
}

fn oracle(value: &Value) -> Parse<RequestSpecifier> {
    let Some(object) = value.as_object() else {
        return digest(Category::Oracle, value);
    };
    let (Some(document_id), Some(account_value)) =
        (object.get("oracle_document_id"), object.get("account"))
    else {
        return Err(MALFORMED);
    };
    let document_id = parse_document_id(document_id);
    let account = nonzero_account(account_value, ErrorKind::MalformedAddress)?;
    let document_id = document_id.ok_or(ErrorKind::MalformedDocumentId)?;
    Ok(RequestSpecifier::Oracle {
        account,
        document_id,
    })
}

/// A non-negative integer that fits in `u32` (integral reals included), or a
/// decimal string of one.
fn parse_document_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(v))
                .map(|v| v as u32),
        },
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
