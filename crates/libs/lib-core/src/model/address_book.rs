//! # Address Book
//!
//! Resolves the Sablier contract address for the chain the wallet is connected to.
//!
//! The table is read from a JSON file keyed by decimal chain id:
//!
//! ```json
//! {
//!   "1": { "sablier": "0xa4fc358455febe425536fd1878be67ffdbdec59a" },
//!   "4": { "sablier": "0xc04ad234e01327b24a831e3718dbfcbe245904cc" }
//! }
//! ```

use crate::error::{AppError, ConnectionError, Result};
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Contract addresses deployed on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAddresses {
    pub sablier: Address,
}

/// Contract deployments by chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    chains: BTreeMap<u64, ChainAddresses>,
}

impl AddressBook {
    /// Sablier v1 deployments on mainnet and the public testnets.
    pub fn builtin() -> Self {
        let testnet = ChainAddresses {
            sablier: address!("0xc04ad234e01327b24a831e3718dbfcbe245904cc"),
        };
        let mut chains = BTreeMap::new();
        chains.insert(
            1,
            ChainAddresses {
                sablier: address!("0xa4fc358455febe425536fd1878be67ffdbdec59a"),
            },
        );
        for chain_id in [3, 4, 5, 42] {
            chains.insert(chain_id, testnet);
        }
        Self { chains }
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("Invalid address book: {}", e)))
    }

    pub fn insert(&mut self, chain_id: u64, addresses: ChainAddresses) {
        self.chains.insert(chain_id, addresses);
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainAddresses> {
        self.chains.get(&chain_id)
    }

    /// Sablier address on `chain_id`, or `UnsupportedChain` when none is configured.
    pub fn sablier(&self, chain_id: u64) -> Result<Address> {
        self.get(chain_id)
            .map(|c| c.sablier)
            .ok_or(AppError::Connection(ConnectionError::UnsupportedChain(chain_id)))
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }
}
