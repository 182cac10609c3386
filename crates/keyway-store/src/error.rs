use keyway_types::Key256;

/// Errors from snapshot and ledger history operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading snapshot data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes cannot be decoded as an entry.
    #[error("corrupt entry {key}: {reason}")]
    CorruptEntry { key: Key256, reason: String },

    /// Binary data that does not start with a known entry type code.
    #[error("unknown entry type code {0:#06x}")]
    UnknownEntryType(u16),

    /// Two ledgers with the same sequence number.
    #[error("duplicate ledger sequence {0}")]
    DuplicateLedger(u32),

    /// Reference to a ledger sequence the history does not hold.
    #[error("unknown ledger sequence {0}")]
    UnknownLedger(u32),

    /// The fixture describes an inconsistent history.
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
