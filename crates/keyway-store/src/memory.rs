use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use keyway_crypto::Sha512Half;
use keyway_types::Key256;

use crate::error::{StoreError, StoreResult};
use crate::object::LedgerObject;
use crate::traits::{LedgerHeader, LedgerHistory, LedgerSelector, OpenLedger, ReadView};

/// In-memory, HashMap-based snapshot.
///
/// Built up with [`insert`](Self::insert) and then shared behind an `Arc`;
/// once shared it is never mutated.
pub struct InMemorySnapshot {
    header: LedgerHeader,
    entries: HashMap<Key256, LedgerObject>,
}

impl InMemorySnapshot {
    /// Create an empty snapshot with an explicit header.
    pub fn new(header: LedgerHeader) -> Self {
        Self {
            header,
            entries: HashMap::new(),
        }
    }

    /// Create a snapshot whose hash is computed from its sequence and
    /// contents.
    pub fn with_entries(
        seq: u32,
        entries: impl IntoIterator<Item = (Key256, LedgerObject)>,
    ) -> StoreResult<Self> {
        let entries: HashMap<Key256, LedgerObject> = entries.into_iter().collect();
        let hash = content_hash(seq, &entries)?;
        Ok(Self {
            header: LedgerHeader { seq, hash },
            entries,
        })
    }

    /// Store `object` under `key`, returning whatever was there before.
    pub fn insert(&mut self, key: Key256, object: LedgerObject) -> Option<LedgerObject> {
        self.entries.insert(key, object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted list of every key in the snapshot.
    pub fn keys(&self) -> Vec<Key256> {
        let mut keys: Vec<Key256> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }
}

/// Hash of a ledger's sequence and every (key, entry) pair in key order.
fn content_hash(seq: u32, entries: &HashMap<Key256, LedgerObject>) -> StoreResult<Key256> {
    let mut sorted: Vec<(&Key256, &LedgerObject)> = entries.iter().collect();
    sorted.sort_by_key(|(key, _)| **key);
    let mut hasher = Sha512Half::new();
    hasher.update(&seq.to_be_bytes());
    for (key, object) in sorted {
        hasher.update(key.as_bytes());
        hasher.update(&object.to_bytes()?);
    }
    Ok(hasher.finalize())
}

impl ReadView for InMemorySnapshot {
    fn header(&self) -> &LedgerHeader {
        &self.header
    }

    fn read(&self, key: &Key256) -> StoreResult<Option<LedgerObject>> {
        Ok(self.entries.get(key).cloned())
    }
}

impl std::fmt::Debug for InMemorySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshot")
            .field("seq", &self.header.seq)
            .field("hash", &self.header.hash)
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

/// In-memory ledger history for tests, fixtures, and embedding.
///
/// Holds closed ledgers by sequence, an optional open ledger, and the
/// sequence of the newest validated ledger.
pub struct InMemoryLedgerHistory {
    inner: RwLock<HistoryState>,
}

#[derive(Default)]
struct HistoryState {
    closed: BTreeMap<u32, Arc<InMemorySnapshot>>,
    open: Option<Arc<InMemorySnapshot>>,
    validated: Option<u32>,
}

impl InMemoryLedgerHistory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HistoryState::default()),
        }
    }

    /// Add a closed ledger. Sequence numbers must be unique.
    pub fn add_closed(&self, snapshot: InMemorySnapshot) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        let seq = snapshot.header.seq;
        if state.closed.contains_key(&seq) {
            return Err(StoreError::DuplicateLedger(seq));
        }
        state.closed.insert(seq, Arc::new(snapshot));
        Ok(())
    }

    /// Replace the open ledger.
    pub fn set_open(&self, snapshot: InMemorySnapshot) {
        self.inner.write().expect("lock poisoned").open = Some(Arc::new(snapshot));
    }

    /// Mark closed ledger `seq` (and everything before it) validated.
    pub fn set_validated(&self, seq: u32) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        if !state.closed.contains_key(&seq) {
            return Err(StoreError::UnknownLedger(seq));
        }
        state.validated = Some(seq);
        Ok(())
    }

    /// Number of closed ledgers.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryLedgerHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    fn is_validated(&self, snapshot: &InMemorySnapshot) -> bool {
        let seq = snapshot.header.seq;
        let closed = self
            .closed
            .get(&seq)
            .is_some_and(|s| s.header.hash == snapshot.header.hash);
        closed && self.validated.is_some_and(|v| seq <= v)
    }

    fn select(&self, selector: &LedgerSelector) -> Option<Arc<InMemorySnapshot>> {
        match selector {
            LedgerSelector::Sequence(seq) => self.closed.get(seq).cloned().or_else(|| {
                self.open
                    .as_ref()
                    .filter(|open| open.header.seq == *seq)
                    .cloned()
            }),
            LedgerSelector::Hash(hash) => self
                .closed
                .values()
                .chain(self.open.iter())
                .find(|s| s.header.hash == *hash)
                .cloned(),
            LedgerSelector::Current => self
                .open
                .clone()
                .or_else(|| self.closed.values().next_back().cloned()),
            LedgerSelector::Closed => self.closed.values().next_back().cloned(),
            LedgerSelector::Validated => self.validated.and_then(|v| self.closed.get(&v).cloned()),
        }
    }
}

impl LedgerHistory for InMemoryLedgerHistory {
    fn ledger(&self, selector: &LedgerSelector) -> StoreResult<Option<OpenLedger>> {
        let state = self.inner.read().expect("lock poisoned");
        let Some(snapshot) = state.select(selector) else {
            tracing::debug!(?selector, "no ledger matches selector");
            return Ok(None);
        };
        let validated = state.is_validated(&snapshot);
        Ok(Some(OpenLedger {
            view: snapshot,
            validated,
        }))
    }
}

impl std::fmt::Debug for InMemoryLedgerHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryLedgerHistory")
            .field("closed_count", &state.closed.len())
            .field("has_open", &state.open.is_some())
            .field("validated", &state.validated)
            .finish()
    }
}
