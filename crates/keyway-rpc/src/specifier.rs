use std::fmt;

use keyway_crypto::keylet;
use keyway_types::{AccountId, ChainType, Currency, Issue, Key256, XChainBridge};

use crate::classify::{Category, ExpectedType};

/// Where a directory lookup starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectoryRoot {
    Root(Key256),
    Owner(AccountId),
}

/// A fully decoded request: the category and the typed fields its key is
/// derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestSpecifier {
    /// A key given directly, checked against `category` after lookup.
    Digest { category: Category, key: Key256 },
    AccountRoot(AccountId),
    DepositPreauth { owner: AccountId, authorized: AccountId },
    Directory { root: DirectoryRoot, sub_index: u64 },
    Escrow { owner: AccountId, seq: u32 },
    Offer { account: AccountId, seq: u32 },
    RippleState { accounts: [AccountId; 2], currency: Currency },
    Ticket { account: AccountId, ticket_seq: u32 },
    Amm { asset: Issue, asset2: Issue },
    Bridge { bridge: XChainBridge, chain: ChainType },
    XChainOwnedClaimId { bridge: XChainBridge, seq: u64 },
    XChainOwnedCreateAccountClaimId { bridge: XChainBridge, seq: u64 },
    Did(AccountId),
    Oracle { account: AccountId, document_id: u32 },
}

impl RequestSpecifier {
    pub fn category(&self) -> Category {
        match self {
            Self::Digest { category, .. } => *category,
            Self::AccountRoot(_) => Category::AccountRoot,
            Self::DepositPreauth { .. } => Category::DepositPreauth,
            Self::Directory { .. } => Category::Directory,
            Self::Escrow { .. } => Category::Escrow,
            Self::Offer { .. } => Category::Offer,
            Self::RippleState { .. } => Category::RippleState,
            Self::Ticket { .. } => Category::Ticket,
            Self::Amm { .. } => Category::Amm,
            Self::Bridge { .. } => Category::Bridge,
            Self::XChainOwnedClaimId { .. } => Category::XChainOwnedClaimId,
            Self::XChainOwnedCreateAccountClaimId { .. } => {
                Category::XChainOwnedCreateAccountClaimId
            }
            Self::Did(_) => Category::Did,
            Self::Oracle { .. } => Category::Oracle,
        }
    }

    pub fn expected_type(&self) -> ExpectedType {
        self.category().expected_type()
    }

    /// Derive the canonical key.
    pub fn key(&self) -> Key256 {
        match self {
            Self::Digest { key, .. } => *key,
            Self::AccountRoot(id) => keylet::account(id).key,
            Self::DepositPreauth { owner, authorized } => {
                keylet::deposit_preauth(owner, authorized).key
            }
            Self::Directory { root, sub_index } => {
                let root = match root {
                    DirectoryRoot::Root(key) => *key,
                    DirectoryRoot::Owner(owner) => keylet::owner_dir(owner).key,
                };
                keylet::page(&root, *sub_index).key
            }
            Self::Escrow { owner, seq } => keylet::escrow(owner, *seq).key,
            Self::Offer { account, seq } => keylet::offer(account, *seq).key,
            Self::RippleState { accounts, currency } => {
                keylet::line(&accounts[0], &accounts[1], currency).key
            }
            Self::Ticket {
                account,
                ticket_seq,
            } => keylet::ticket(account, *ticket_seq).key,
            Self::Amm { asset, asset2 } => keylet::amm(asset, asset2).key,
            Self::Bridge { bridge, chain } => keylet::bridge(bridge, *chain).key,
            Self::XChainOwnedClaimId { bridge, seq } => keylet::xchain_claim_id(bridge, *seq).key,
            Self::XChainOwnedCreateAccountClaimId { bridge, seq } => {
                keylet::xchain_create_account_claim_id(bridge, *seq).key
            }
            Self::Did(id) => keylet::did(id).key,
            Self::Oracle {
                account,
                document_id,
            } => keylet::oracle(account, *document_id).key,
        }
    }
}

impl fmt::Display for RequestSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digest { category, key } => write!(f, "{category} {}", key.short_hex()),
            Self::AccountRoot(id) | Self::Did(id) => write!(f, "{} {id}", self.category()),
            Self::Escrow { owner, seq } => write!(f, "escrow {owner}/{seq}"),
            Self::Offer { account, seq } => write!(f, "offer {account}/{seq}"),
            Self::Ticket {
                account,
                ticket_seq,
            } => write!(f, "ticket {account}/{ticket_seq}"),
            Self::Oracle {
                account,
                document_id,
            } => write!(f, "oracle {account}/{document_id}"),
            Self::RippleState { accounts, currency } => {
                write!(f, "ripple_state {}/{} {currency}", accounts[0], accounts[1])
            }
            other => write!(f, "{}", other.category()),
        }
    }
}
