//! Picks the one request field that says what to look up.

use std::fmt;

use keyway_types::LedgerEntryType;
use serde_json::{Map, Value};

/// The request shapes `ledger_entry` understands, one per top-level field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Index,
    AccountRoot,
    Check,
    DepositPreauth,
    Directory,
    Escrow,
    Offer,
    PaymentChannel,
    RippleState,
    Ticket,
    NftPage,
    Amm,
    Bridge,
    XChainOwnedClaimId,
    XChainOwnedCreateAccountClaimId,
    Did,
    Oracle,
}

/// Field precedence. The first field present in a request wins and every
/// other field is ignored.
pub const FIELDS: [(&str, Category); 17] = [
    ("index", Category::Index),
    ("account_root", Category::AccountRoot),
    ("check", Category::Check),
    ("deposit_preauth", Category::DepositPreauth),
    ("directory", Category::Directory),
    ("escrow", Category::Escrow),
    ("offer", Category::Offer),
    ("payment_channel", Category::PaymentChannel),
    ("ripple_state", Category::RippleState),
    ("ticket", Category::Ticket),
    ("nft_page", Category::NftPage),
    ("amm", Category::Amm),
    ("bridge", Category::Bridge),
    ("xchain_owned_claim_id", Category::XChainOwnedClaimId),
    (
        "xchain_owned_create_account_claim_id",
        Category::XChainOwnedCreateAccountClaimId,
    ),
    ("did", Category::Did),
    ("oracle", Category::Oracle),
];

/// Entry type a resolved key must hold, or none for raw-index lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    Any,
    Exactly(LedgerEntryType),
}

impl ExpectedType {
    pub fn accepts(self, actual: LedgerEntryType) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => expected == actual,
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Exactly(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl Category {
    pub fn field(self) -> &'static str {
        FIELDS
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(field, _)| *field)
            .unwrap_or("index")
    }

    pub fn expected_type(self) -> ExpectedType {
        use LedgerEntryType as T;
        ExpectedType::Exactly(match self {
            Self::Index => return ExpectedType::Any,
            Self::AccountRoot => T::AccountRoot,
            Self::Check => T::Check,
            Self::DepositPreauth => T::DepositPreauth,
            Self::Directory => T::DirectoryNode,
            Self::Escrow => T::Escrow,
            Self::Offer => T::Offer,
            Self::PaymentChannel => T::PayChannel,
            Self::RippleState => T::RippleState,
            Self::Ticket => T::Ticket,
            Self::NftPage => T::NfTokenPage,
            Self::Amm => T::Amm,
            Self::Bridge => T::Bridge,
            Self::XChainOwnedClaimId => T::XChainOwnedClaimId,
            Self::XChainOwnedCreateAccountClaimId => T::XChainOwnedCreateAccountClaimId,
            Self::Did => T::Did,
            Self::Oracle => T::Oracle,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Which shape a request has, borrowing the raw value that describes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection<'a> {
    /// A category field was present.
    Field { category: Category, value: &'a Value },
    /// Positional form: `params` holding exactly one string.
    Legacy(&'a str),
    /// Nothing recognised.
    Unrecognized,
}

/// Select the request shape. Presence alone decides; a field holding `null`
/// still selects its category.
pub fn classify(params: &Map<String, Value>) -> Selection<'_> {
    for (field, category) in FIELDS {
        if let Some(value) = params.get(field) {
            return Selection::Field { category, value };
        }
    }
    match params.get("params") {
        Some(Value::Array(items)) if items.len() == 1 => match &items[0] {
            Value::String(index) => Selection::Legacy(index),
            _ => Selection::Unrecognized,
        },
        _ => Selection::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn select(value: Value) -> Option<Category> {
        match classify(value.as_object().unwrap()) {
            Selection::Field { category, .. } => Some(category),
            _ => None,
        }
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            select(json!({"offer": {}, "escrow": {}, "oracle": {}})),
            Some(Category::Escrow)
        );
        assert_eq!(
            select(json!({"did": "x", "account_root": "y"})),
            Some(Category::AccountRoot)
        );
        assert_eq!(select(json!({"index": "x", "check": "y"})), Some(Category::Index));
    }

    #[test]
    fn every_field_selects_its_category() {
        for (field, category) in FIELDS {
            let mut map = Map::new();
            map.insert(field.into(), json!(null));
            map.insert("binary".into(), json!(true));
            assert_eq!(select(Value::Object(map)), Some(category));
            assert_eq!(category.field(), field);
        }
    }

    #[test]
    fn legacy_positional_form() {
        let params = json!({"params": ["ABCD"]});
        assert_eq!(
            classify(params.as_object().unwrap()),
            Selection::Legacy("ABCD")
        );
    }

    #[test]
    fn legacy_form_must_be_single_string() {
        for params in [
            json!({"params": ["a", "b"]}),
            json!({"params": [1]}),
            json!({"params": []}),
            json!({"params": "ABCD"}),
            json!({"ledger_index": "validated"}),
        ] {
            assert_eq!(
                classify(params.as_object().unwrap()),
                Selection::Unrecognized
            );
        }
    }

    #[test]
    fn expected_types() {
        assert_eq!(Category::Index.expected_type(), ExpectedType::Any);
        assert_eq!(
            Category::PaymentChannel.expected_type(),
            ExpectedType::Exactly(LedgerEntryType::PayChannel)
        );
        assert!(ExpectedType::Any.accepts(LedgerEntryType::Offer));
        assert!(!ExpectedType::Exactly(LedgerEntryType::Escrow).accepts(LedgerEntryType::Offer));
    }
}
