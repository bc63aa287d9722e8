use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vault_core::core::bits::{Address, Symbol};
use vault_core::core::json_file::read_from_json_file;
use vault_core::deployment::params::{FactoryParams, PlatformAddresses};

/// Well-known accounts and tokens for one chain.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainBookEntry {
    pub platform: PlatformAddresses,
    pub vault_owner: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<FactoryParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub tokens: HashMap<Symbol, Address>,
}

/// Address book keyed by chain name, the file-backed complement to the
/// deployment manifest.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddressBook {
    pub chains: HashMap<Symbol, ChainBookEntry>,
}

impl AddressBook {
    pub fn load(path: &str) -> eyre::Result<Self> {
        read_from_json_file(path)
    }

    pub fn chain(&self, chain: &Symbol) -> Option<&ChainBookEntry> {
        self.chains.get(chain)
    }

    pub fn token(&self, chain: &Symbol, token: &Symbol) -> Option<Address> {
        self.chain(chain)
            .and_then(|entry| entry.tokens.get(token).copied())
    }
}
