//! Foundation types for Keyway.
//!
//! This crate provides the identifier and descriptor types shared by every
//! other Keyway crate: the 256-bit ledger key, account identifiers and their
//! textual address form, currencies, issues, cross-chain bridge descriptors,
//! and the closed set of ledger entry types.
//!
//! # Key Types
//!
//! - [`Key256`] -- 256-bit key addressing an entry in the ledger state tree
//! - [`AccountId`] -- 160-bit account identifier with base58 address codec
//! - [`Currency`] -- 160-bit currency code (ISO-style or raw hex)
//! - [`Issue`] -- currency plus issuing account
//! - [`XChainBridge`] -- the two door/issue legs of a cross-chain bridge
//! - [`LedgerEntryType`] -- the stored category of a ledger entry

pub mod account;
pub mod bridge;
pub mod currency;
pub mod entry_type;
pub mod error;
pub mod issue;
pub mod key;

pub use account::AccountId;
pub use bridge::{ChainType, XChainBridge};
pub use currency::Currency;
pub use entry_type::LedgerEntryType;
pub use error::TypeError;
pub use issue::Issue;
pub use key::Key256;
