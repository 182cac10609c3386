use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::currency::Currency;

/// A currency together with the account that issues it.
///
/// The native asset has no issuer; its account is the zero account. Issues
/// order by currency first, then by issuer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Issue {
    pub currency: Currency,
    pub account: AccountId,
}

impl Issue {
    pub fn new(currency: Currency, account: AccountId) -> Self {
        Self { currency, account }
    }

    /// The native asset.
    pub fn native() -> Self {
        Self {
            currency: Currency::native(),
            account: AccountId::zero(),
        }
    }

    pub fn is_native(&self) -> bool {
        self.currency.is_native()
    }
}

impl fmt::Debug for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Issue({self})")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "{}", self.currency)
        } else {
            write!(f, "{}/{}", self.currency, self.account)
        }
    }
}
