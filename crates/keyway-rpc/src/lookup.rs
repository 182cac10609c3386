use keyway_store::{LedgerObject, ReadView, StoreError};
use keyway_types::{Key256, LedgerEntryType};
use thiserror::Error;

use crate::classify::ExpectedType;
use crate::error::ErrorKind;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no entry at {0}")]
    NotFound(Key256),

    #[error("entry at {key} is {actual}, expected {expected}")]
    UnexpectedType {
        key: Key256,
        expected: LedgerEntryType,
        actual: LedgerEntryType,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LookupError {
    /// The reported error, or `None` for store failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NotFound(_) => Some(ErrorKind::EntryNotFound),
            Self::UnexpectedType { .. } => Some(ErrorKind::UnexpectedLedgerType),
            Self::Store(_) => None,
        }
    }
}

/// Read `key` without a type filter, then check the stored type.
pub fn lookup(
    view: &dyn ReadView,
    key: &Key256,
    expected: ExpectedType,
) -> Result<LedgerObject, LookupError> {
    let Some(object) = view.read(key)? else {
        tracing::debug!(%key, seq = view.header().seq, "ledger entry not found");
        return Err(LookupError::NotFound(*key));
    };
    match expected {
        ExpectedType::Exactly(expected) if expected != object.entry_type => {
            Err(LookupError::UnexpectedType {
                key: *key,
                expected,
                actual: object.entry_type,
            })
        }
        _ => Ok(object),
    }
}
