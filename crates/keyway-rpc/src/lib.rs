//! Ledger entry resolution for Keyway.
//!
//! Takes a client's typed description of a ledger entry, works out which
//! category it names, validates and decodes its fields, derives the
//! canonical key, reads that key from a snapshot, and renders the result.
//!
//! # Pipeline
//!
//! 1. [`classify`](classify::classify) -- pick the one request field that
//!    names a category (first match in a fixed order)
//! 2. [`resolve`](resolve::resolve) -- validate that field into a
//!    [`RequestSpecifier`], or a single [`ErrorKind`]
//! 3. [`lookup`](lookup::lookup) -- untyped read, then type check
//! 4. [`format_entry`](format::format_entry) -- `node` or `node_binary`,
//!    plus `index`
//!
//! [`do_ledger_entry`] runs the whole pipeline for JSON requests.
//! [`get_ledger_entry`] is the raw-key path: no classification, derivation
//! or type check.

pub mod classify;
pub mod codec;
pub mod error;
pub mod format;
pub mod json;
pub mod ledger;
pub mod ledger_entry;
pub mod lookup;
pub mod raw;
pub mod resolve;
pub mod specifier;
pub mod version;

#[cfg(test)]
mod testing;

pub use classify::{Category, ExpectedType};
pub use error::{ErrorKind, RpcFault, RpcResult};
pub use format::OutputMode;
pub use ledger_entry::do_ledger_entry;
pub use raw::{
    get_ledger_entry, LedgerShortcut, LedgerSpecifier, RawLedgerEntryRequest,
    RawLedgerEntryResponse, RawLedgerObject, Status, StatusCode,
};
pub use resolve::{resolve, Resolution};
pub use specifier::{DirectoryRoot, RequestSpecifier};
pub use version::{api_version, API_VERSION_MAX, API_VERSION_MIN};
