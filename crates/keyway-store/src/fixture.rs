//! JSON ledger fixtures.
//!
//! A fixture describes a small ledger history: a list of closed ledgers,
//! an optional open ledger, and the newest validated sequence.
//!
//! ```json
//! {
//!   "validated": 2,
//!   "ledgers": [
//!     { "seq": 2, "entries": [
//!       { "index": "2B6A...", "entry_type": "AccountRoot",
//!         "fields": { "Account": { "Account": "rHb9..." } } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A ledger without an explicit `hash` gets one computed from its contents.

use std::path::Path;

use keyway_types::Key256;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::memory::{InMemoryLedgerHistory, InMemorySnapshot};
use crate::object::LedgerObject;
use crate::traits::LedgerHeader;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFixture {
    #[serde(default)]
    pub ledgers: Vec<FixtureLedger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<FixtureLedger>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureLedger {
    pub seq: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Key256>,
    #[serde(default)]
    pub entries: Vec<FixtureEntry>,
}

/// One entry and the key it is stored under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureEntry {
    pub index: Key256,
    #[serde(flatten)]
    pub object: LedgerObject,
}

impl LedgerFixture {
    pub fn from_json(text: &str) -> StoreResult<Self> {
        serde_json::from_str(text).map_err(|e| StoreError::InvalidFixture(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Build the in-memory history this fixture describes.
    pub fn into_history(self) -> StoreResult<InMemoryLedgerHistory> {
        let history = InMemoryLedgerHistory::new();
        for ledger in self.ledgers {
            history.add_closed(ledger.into_snapshot()?)?;
        }
        if let Some(open) = self.open {
            history.set_open(open.into_snapshot()?);
        }
        if let Some(seq) = self.validated {
            history.set_validated(seq).map_err(|_| {
                StoreError::InvalidFixture(format!("validated ledger {seq} is not a closed ledger"))
            })?;
        }
        tracing::debug!(ledgers = history.len(), "loaded ledger fixture");
        Ok(history)
    }
}

impl FixtureLedger {
    fn into_snapshot(self) -> StoreResult<InMemorySnapshot> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.index) {
                return Err(StoreError::InvalidFixture(format!(
                    "ledger {} lists index {} twice",
                    self.seq, entry.index
                )));
            }
        }
        let entries = self.entries.into_iter().map(|e| (e.index, e.object));
        match self.hash {
            Some(hash) => {
                let mut snapshot = InMemorySnapshot::new(LedgerHeader {
                    seq: self.seq,
                    hash,
                });
                for (key, object) in entries {
                    snapshot.insert(key, object);
                }
                Ok(snapshot)
            }
            None => InMemorySnapshot::with_entries(self.seq, entries),
        }
    }
}

impl InMemoryLedgerHistory {
    pub fn from_fixture(fixture: LedgerFixture) -> StoreResult<Self> {
        fixture.into_history()
    }

    /// Read a JSON fixture file and build its history.
    pub fn load_fixture(path: impl AsRef<Path>) -> StoreResult<Self> {
        LedgerFixture::load(path)?.into_history()
    }
}
