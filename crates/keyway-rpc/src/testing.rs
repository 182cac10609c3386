//! Shared fixtures for tests.

use keyway_crypto::keylet;
use keyway_store::{Amount, FieldValue, InMemoryLedgerHistory, InMemorySnapshot, LedgerObject};
use keyway_types::{AccountId, Key256, LedgerEntryType};

pub fn acct(n: u8) -> AccountId {
    AccountId::from_bytes([n; 20])
}

pub fn addr(n: u8) -> String {
    acct(n).to_base58()
}

fn base_entries() -> Vec<(Key256, LedgerObject)> {
    let owner = acct(1);
    vec![
        (
            keylet::account(&owner).key,
            LedgerObject::new(LedgerEntryType::AccountRoot)
                .with("Account", FieldValue::Account(owner))
                .with("Balance", FieldValue::Amount(Amount::Native(25_000_000)))
                .with("Sequence", FieldValue::UInt32(6))
                .with("OwnerCount", FieldValue::UInt32(1)),
        ),
        (
            keylet::offer(&owner, 5).key,
            LedgerObject::new(LedgerEntryType::Offer)
                .with("Account", FieldValue::Account(owner))
                .with("Sequence", FieldValue::UInt32(5)),
        ),
        (
            keylet::owner_dir(&owner).key,
            LedgerObject::new(LedgerEntryType::DirectoryNode)
                .with("Owner", FieldValue::Account(owner))
                .with(
                    "Indexes",
                    FieldValue::Vector256(vec![keylet::offer(&owner, 5).key]),
                ),
        ),
    ]
}

/// Two closed ledgers. Ledger 1 is validated; ledger 2 adds a ticket.
pub fn sample_history() -> InMemoryLedgerHistory {
    let history = InMemoryLedgerHistory::new();
    history
        .add_closed(InMemorySnapshot::with_entries(1, base_entries()).unwrap())
        .unwrap();

    let mut entries = base_entries();
    entries.push((
        keylet::ticket(&acct(1), 9).key,
        LedgerObject::new(LedgerEntryType::Ticket)
            .with("Account", FieldValue::Account(acct(1)))
            .with("TicketSequence", FieldValue::UInt32(9)),
    ));
    history
        .add_closed(InMemorySnapshot::with_entries(2, entries).unwrap())
        .unwrap();
    history.set_validated(1).unwrap();
    history
}
