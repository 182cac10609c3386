use keyway_types::{AccountId, Currency, Issue, Key256};
use sha2::{Digest, Sha512};

/// Incremental SHA-512 whose output is truncated to the first 256 bits.
#[derive(Clone, Default)]
pub struct Sha512Half {
    inner: Sha512,
}

impl Sha512Half {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    pub fn finalize(self) -> Key256 {
        let digest = self.inner.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest[..32]);
        Key256::from_hash(out)
    }

    /// One-shot hash of a byte string.
    pub fn digest(data: &[u8]) -> Key256 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// A value that can be fed into a [`Sha512Half`].
///
/// Integers are appended big-endian; identifiers as their raw bytes.
pub trait HashAppend {
    fn hash_append(&self, hasher: &mut Sha512Half);
}

impl HashAppend for u16 {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(&self.to_be_bytes());
    }
}

impl HashAppend for u32 {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(&self.to_be_bytes());
    }
}

impl HashAppend for u64 {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(&self.to_be_bytes());
    }
}

impl HashAppend for Key256 {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(self.as_bytes());
    }
}

impl HashAppend for AccountId {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(self.as_bytes());
    }
}

impl HashAppend for Currency {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        hasher.update(self.as_bytes());
    }
}

impl HashAppend for Issue {
    fn hash_append(&self, hasher: &mut Sha512Half) {
        self.currency.hash_append(hasher);
        self.account.hash_append(hasher);
    }
}

/// Namespaced index hasher.
///
/// Each hasher carries a one-character namespace that is hashed as a
/// big-endian `u16` ahead of the fields. Two categories fed identical fields
/// therefore never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexHasher {
    namespace: u8,
}

impl IndexHasher {
    pub const ACCOUNT: Self = Self::new(b'a');
    pub const DIR_NODE: Self = Self::new(b'd');
    pub const TRUST_LINE: Self = Self::new(b'r');
    pub const OFFER: Self = Self::new(b'o');
    pub const OWNER_DIR: Self = Self::new(b'O');
    pub const ESCROW: Self = Self::new(b'u');
    pub const TICKET: Self = Self::new(b'T');
    pub const CHECK: Self = Self::new(b'C');
    pub const DEPOSIT_PREAUTH: Self = Self::new(b'p');
    pub const PAY_CHANNEL: Self = Self::new(b'x');
    pub const AMM: Self = Self::new(b'A');
    pub const BRIDGE: Self = Self::new(b'H');
    pub const XCHAIN_CLAIM_ID: Self = Self::new(b'Q');
    pub const XCHAIN_CREATE_ACCOUNT_CLAIM_ID: Self = Self::new(b'K');
    pub const DID: Self = Self::new(b'I');
    pub const ORACLE: Self = Self::new(b'R');

    pub const fn new(namespace: u8) -> Self {
        Self { namespace }
    }

    /// Hash the namespace followed by `parts`, in order.
    pub fn hash(&self, parts: &[&dyn HashAppend]) -> Key256 {
        let mut hasher = Sha512Half::new();
        (self.namespace as u16).hash_append(&mut hasher);
        for part in parts {
            part.hash_append(&mut hasher);
        }
        hasher.finalize()
    }

    pub fn namespace(&self) -> char {
        self.namespace as char
    }
}
