use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::json::CoercionError;

/// Every error a `ledger_entry` request can report to its caller.
///
/// Each kind is terminal and reported verbatim as its [`token`](Self::token).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedRequest,
    MalformedAddress,
    MalformedOwner,
    MalformedAuthorized,
    MalformedCurrency,
    MalformedDocumentId,
    EntryNotFound,
    UnexpectedLedgerType,
    UnknownOption,
    InvalidParams,
    LedgerNotFound,
    InvalidApiVersion,
    UnknownCommand,
    Internal,
}

impl ErrorKind {
    /// Wire token.
    pub fn token(self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformedRequest",
            Self::MalformedAddress => "malformedAddress",
            Self::MalformedOwner => "malformedOwner",
            Self::MalformedAuthorized => "malformedAuthorized",
            Self::MalformedCurrency => "malformedCurrency",
            Self::MalformedDocumentId => "malformedDocumentID",
            Self::EntryNotFound => "entryNotFound",
            Self::UnexpectedLedgerType => "unexpectedLedgerType",
            Self::UnknownOption => "unknownOption",
            Self::InvalidParams => "invalidParams",
            Self::LedgerNotFound => "lgrNotFound",
            Self::InvalidApiVersion => "invalid_API_version",
            Self::UnknownCommand => "unknownCmd",
            Self::Internal => "internal",
        }
    }

    /// Human-readable description sent as `error_message`.
    pub fn message(self) -> &'static str {
        match self {
            Self::MalformedRequest => "Malformed request.",
            Self::MalformedAddress => "Malformed address.",
            Self::MalformedOwner => "Malformed owner.",
            Self::MalformedAuthorized => "Malformed authorized address.",
            Self::MalformedCurrency => "Malformed currency.",
            Self::MalformedDocumentId => "Malformed oracle_document_id.",
            Self::EntryNotFound => "Entry not found.",
            Self::UnexpectedLedgerType => "Unexpected ledger type.",
            Self::UnknownOption => "Unknown option.",
            Self::InvalidParams => "Invalid parameters.",
            Self::LedgerNotFound => "ledgerNotFound",
            Self::InvalidApiVersion => "API version is invalid.",
            Self::UnknownCommand => "Unknown method.",
            Self::Internal => "Internal error.",
        }
    }

    /// Write `error`, `error_message` and `status` into a response body.
    pub fn inject(self, result: &mut Map<String, Value>) {
        result.insert("error".into(), Value::String(self.token().into()));
        result.insert("error_message".into(), Value::String(self.message().into()));
        result.insert("status".into(), Value::String("error".into()));
    }

    /// A response body holding only this error.
    pub fn to_response(self) -> Value {
        let mut result = Map::new();
        self.inject(&mut result);
        Value::Object(result)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A failure that escapes the request handler instead of becoming an
/// [`ErrorKind`] in the response.
#[derive(Debug, Error)]
pub enum RpcFault {
    /// A request field could not be coerced to the type being read. Only
    /// escapes under API version 1.
    #[error("{0}")]
    Coercion(#[from] CoercionError),

    /// The snapshot failed to read or decode an entry.
    #[error("store error: {0}")]
    Store(#[from] keyway_store::StoreError),
}

pub type RpcResult<T> = Result<T, RpcFault>;
