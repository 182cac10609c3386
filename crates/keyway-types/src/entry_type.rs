use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! ledger_entry_types {
    ($($variant:ident = $code:literal, $name:literal;)+) => {
        /// The stored category of a ledger entry.
        ///
        /// Every entry in a snapshot carries exactly one of these tags. The
        /// numeric code is the tag's value in the binary encoding.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum LedgerEntryType {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl LedgerEntryType {
            pub const ALL: &'static [LedgerEntryType] = &[$(Self::$variant,)+];

            pub fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Name used in structured output (`LedgerEntryType` field).
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for LedgerEntryType {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(TypeError::UnknownEntryType(other.to_string())),
                }
            }
        }
    };
}

ledger_entry_types! {
    AccountRoot = 0x0061, "AccountRoot";
    DirectoryNode = 0x0064, "DirectoryNode";
    RippleState = 0x0072, "RippleState";
    Ticket = 0x0054, "Ticket";
    SignerList = 0x0053, "SignerList";
    Offer = 0x006f, "Offer";
    LedgerHashes = 0x0068, "LedgerHashes";
    Amendments = 0x0066, "Amendments";
    FeeSettings = 0x0073, "FeeSettings";
    Escrow = 0x0075, "Escrow";
    PayChannel = 0x0078, "PayChannel";
    Check = 0x0043, "Check";
    DepositPreauth = 0x0070, "DepositPreauth";
    NegativeUnl = 0x004e, "NegativeUNL";
    NfTokenPage = 0x0050, "NFTokenPage";
    NfTokenOffer = 0x0037, "NFTokenOffer";
    Amm = 0x0079, "AMM";
    Bridge = 0x0069, "Bridge";
    XChainOwnedClaimId = 0x0071, "XChainOwnedClaimID";
    XChainOwnedCreateAccountClaimId = 0x0074, "XChainOwnedCreateAccountClaimID";
    Did = 0x0049, "DID";
    Oracle = 0x0080, "Oracle";
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
