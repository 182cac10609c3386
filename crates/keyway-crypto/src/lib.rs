//! Key derivation for Keyway.
//!
//! Every entry in the ledger state tree lives under a 256-bit key computed
//! from its identifying fields. This crate holds the hashing primitive
//! ([`IndexHasher`], SHA-512 truncated to 256 bits with a one-character
//! namespace) and one derivation function per entry category in [`keylet`].
//!
//! The functions here are the single source of truth for key layout. Anything
//! that writes entries and anything that looks them up must agree on them
//! bit for bit.

pub mod hasher;
pub mod keylet;

pub use hasher::{HashAppend, IndexHasher, Sha512Half};
pub use keylet::Keylet;
