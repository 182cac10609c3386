use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid base58 address: {0}")]
    InvalidAddress(String),

    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("unknown ledger entry type: {0}")]
    UnknownEntryType(String),
}
