use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::issue::Issue;

/// Which side of a cross-chain bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    Locking,
    Issuing,
}

impl ChainType {
    /// The chain a transfer originates from, given whether it was sent from
    /// the locking chain.
    pub fn src_chain(was_locking_chain_send: bool) -> Self {
        if was_locking_chain_send {
            Self::Locking
        } else {
            Self::Issuing
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Locking => Self::Issuing,
            Self::Issuing => Self::Locking,
        }
    }
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locking => write!(f, "locking"),
            Self::Issuing => write!(f, "issuing"),
        }
    }
}

/// Descriptor of a cross-chain bridge: one door account and one issue on
/// each chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct XChainBridge {
    pub locking_chain_door: AccountId,
    pub locking_chain_issue: Issue,
    pub issuing_chain_door: AccountId,
    pub issuing_chain_issue: Issue,
}

impl XChainBridge {
    pub fn new(
        locking_chain_door: AccountId,
        locking_chain_issue: Issue,
        issuing_chain_door: AccountId,
        issuing_chain_issue: Issue,
    ) -> Self {
        Self {
            locking_chain_door,
            locking_chain_issue,
            issuing_chain_door,
            issuing_chain_issue,
        }
    }

    pub fn door(&self, chain: ChainType) -> AccountId {
        match chain {
            ChainType::Locking => self.locking_chain_door,
            ChainType::Issuing => self.issuing_chain_door,
        }
    }

    pub fn issue(&self, chain: ChainType) -> Issue {
        match chain {
            ChainType::Locking => self.locking_chain_issue,
            ChainType::Issuing => self.issuing_chain_issue,
        }
    }
}
