//! Read-only ledger snapshots for Keyway.
//!
//! A snapshot is an immutable key-value view of the ledger state tree at one
//! point in history. Every entry is a [`LedgerObject`]: an entry type tag and
//! a set of named fields. Keys are 256-bit and the snapshot never interprets
//! them; any entry may live at any key.
//!
//! # Encodings
//!
//! - [`LedgerObject::to_bytes`] -- canonical binary form (entry type code +
//!   bincode-encoded fields)
//! - [`LedgerObject::to_json`] -- structured form with the entry type name and
//!   index
//!
//! # Backends
//!
//! - [`InMemorySnapshot`] -- `HashMap`-backed snapshot for tests and fixtures
//! - [`InMemoryLedgerHistory`] -- a sequence of snapshots selectable by
//!   sequence, hash, or shortcut
//!
//! # Design Rules
//!
//! 1. Snapshots are immutable once published; concurrent reads are always safe.
//! 2. Lookups are untyped: the caller type-checks what it reads.
//! 3. All decode errors are propagated, never silently ignored.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fixture::{FixtureEntry, FixtureLedger, LedgerFixture};
pub use memory::{InMemoryLedgerHistory, InMemorySnapshot};
pub use object::{Amount, FieldValue, LedgerObject};
pub use traits::{LedgerHeader, LedgerHistory, LedgerSelector, OpenLedger, ReadView};
