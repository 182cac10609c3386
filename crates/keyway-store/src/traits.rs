use std::sync::Arc;

use keyway_types::Key256;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::object::LedgerObject;

/// Identity of one ledger in the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHeader {
    pub seq: u32,
    pub hash: Key256,
}

/// Read-only view of the ledger state tree at one point in history.
///
/// All implementations must satisfy these invariants:
/// - The view never changes once published; concurrent reads are safe.
/// - Lookups are untyped. Any entry type may live at any key.
/// - Decode and I/O failures are returned as errors, never as "absent".
pub trait ReadView: Send + Sync {
    /// Which ledger this view belongs to.
    fn header(&self) -> &LedgerHeader;

    /// Read the entry stored under `key`.
    ///
    /// Returns `Ok(None)` if no entry exists at that key.
    fn read(&self, key: &Key256) -> StoreResult<Option<LedgerObject>>;

    /// Check whether an entry exists under `key`.
    fn exists(&self, key: &Key256) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

/// How a caller picks a ledger out of the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerSelector {
    Sequence(u32),
    Hash(Key256),
    /// The open ledger, or the newest closed one if none is open.
    Current,
    /// The newest closed ledger.
    Closed,
    /// The newest validated ledger.
    Validated,
}

/// A ledger opened from the history.
#[derive(Clone)]
pub struct OpenLedger {
    pub view: Arc<dyn ReadView>,
    pub validated: bool,
}

impl OpenLedger {
    pub fn header(&self) -> &LedgerHeader {
        self.view.header()
    }
}

impl std::fmt::Debug for OpenLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenLedger")
            .field("header", self.view.header())
            .field("validated", &self.validated)
            .finish()
    }
}

/// Source of ledger snapshots.
pub trait LedgerHistory: Send + Sync {
    /// Open the ledger picked by `selector`.
    ///
    /// Returns `Ok(None)` if the history holds no such ledger.
    fn ledger(&self, selector: &LedgerSelector) -> StoreResult<Option<OpenLedger>>;
}
