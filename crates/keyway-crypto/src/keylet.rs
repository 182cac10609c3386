//! Per-category key derivation.
//!
//! Each function returns a [`Keylet`]: the derived key together with the
//! entry type expected to live there.

use keyway_types::{AccountId, ChainType, Currency, Issue, Key256, LedgerEntryType, XChainBridge};

use crate::hasher::IndexHasher;

/// A derived key and the entry type stored under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keylet {
    pub entry_type: LedgerEntryType,
    pub key: Key256,
}

impl Keylet {
    pub fn new(entry_type: LedgerEntryType, key: Key256) -> Self {
        Self { entry_type, key }
    }
}

pub fn account(id: &AccountId) -> Keylet {
    Keylet::new(LedgerEntryType::AccountRoot, IndexHasher::ACCOUNT.hash(&[id]))
}

/// Root page of the directory of entries owned by `id`.
pub fn owner_dir(id: &AccountId) -> Keylet {
    Keylet::new(LedgerEntryType::DirectoryNode, IndexHasher::OWNER_DIR.hash(&[id]))
}

/// Page `index` of the directory rooted at `root`. Page 0 is the root itself.
pub fn page(root: &Key256, index: u64) -> Keylet {
    if index == 0 {
        return Keylet::new(LedgerEntryType::DirectoryNode, *root);
    }
    Keylet::new(LedgerEntryType::DirectoryNode, IndexHasher::DIR_NODE.hash(&[root, &index]))
}

pub fn escrow(owner: &AccountId, seq: u32) -> Keylet {
    Keylet::new(LedgerEntryType::Escrow, IndexHasher::ESCROW.hash(&[owner, &seq]))
}

pub fn offer(account: &AccountId, seq: u32) -> Keylet {
    Keylet::new(LedgerEntryType::Offer, IndexHasher::OFFER.hash(&[account, &seq]))
}

pub fn ticket(account: &AccountId, ticket_seq: u32) -> Keylet {
    Keylet::new(LedgerEntryType::Ticket, IndexHasher::TICKET.hash(&[account, &ticket_seq]))
}

/// Trust line between two accounts in one currency.
///
/// The accounts are hashed low then high, so either argument order yields
/// the same key.
pub fn line(a: &AccountId, b: &AccountId, currency: &Currency) -> Keylet {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    Keylet::new(
        LedgerEntryType::RippleState,
        IndexHasher::TRUST_LINE.hash(&[low, high, currency]),
    )
}

pub fn deposit_preauth(owner: &AccountId, authorized: &AccountId) -> Keylet {
    Keylet::new(
        LedgerEntryType::DepositPreauth,
        IndexHasher::DEPOSIT_PREAUTH.hash(&[owner, authorized]),
    )
}

pub fn check(owner: &AccountId, seq: u32) -> Keylet {
    Keylet::new(LedgerEntryType::Check, IndexHasher::CHECK.hash(&[owner, &seq]))
}

pub fn pay_channel(src: &AccountId, dst: &AccountId, seq: u32) -> Keylet {
    Keylet::new(
        LedgerEntryType::PayChannel,
        IndexHasher::PAY_CHANNEL.hash(&[src, dst, &seq]),
    )
}

/// AMM instance for an unordered pair of issues.
pub fn amm(issue1: &Issue, issue2: &Issue) -> Keylet {
    let (min, max) = if issue1 <= issue2 { (issue1, issue2) } else { (issue2, issue1) };
    Keylet::new(
        LedgerEntryType::Amm,
        IndexHasher::AMM.hash(&[&min.account, &min.currency, &max.account, &max.currency]),
    )
}

/// Bridge entry held by the door account on `chain`.
///
/// A door can hold one bridge per currency on its own chain, so only the
/// door and that chain's currency take part in the key.
pub fn bridge(bridge: &XChainBridge, chain: ChainType) -> Keylet {
    let door = bridge.door(chain);
    let issue = bridge.issue(chain);
    Keylet::new(
        LedgerEntryType::Bridge,
        IndexHasher::BRIDGE.hash(&[&door, &issue.currency]),
    )
}

pub fn xchain_claim_id(bridge: &XChainBridge, seq: u64) -> Keylet {
    Keylet::new(
        LedgerEntryType::XChainOwnedClaimId,
        bridge_sequence_hash(IndexHasher::XCHAIN_CLAIM_ID, bridge, seq),
    )
}

pub fn xchain_create_account_claim_id(bridge: &XChainBridge, seq: u64) -> Keylet {
    Keylet::new(
        LedgerEntryType::XChainOwnedCreateAccountClaimId,
        bridge_sequence_hash(IndexHasher::XCHAIN_CREATE_ACCOUNT_CLAIM_ID, bridge, seq),
    )
}

fn bridge_sequence_hash(hasher: IndexHasher, bridge: &XChainBridge, seq: u64) -> Key256 {
    hasher.hash(&[
        &bridge.locking_chain_door,
        &bridge.locking_chain_issue,
        &bridge.issuing_chain_door,
        &bridge.issuing_chain_issue,
        &seq,
    ])
}

pub fn did(account: &AccountId) -> Keylet {
    Keylet::new(LedgerEntryType::Did, IndexHasher::DID.hash(&[account]))
}

pub fn oracle(account: &AccountId, document_id: u32) -> Keylet {
    Keylet::new(LedgerEntryType::Oracle, IndexHasher::ORACLE.hash(&[account, &document_id]))
}
