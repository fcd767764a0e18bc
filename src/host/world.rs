//! The four contracts plus chain metadata, loaded and saved as a unit

use crate::config::{Config, ConfigError};
use crate::market::ResourceMarket;
use crate::mining::MiningSimulation;
use crate::mission::SpaceDataRegistry;
use crate::storage::{load, save, KvStore, StorageError};
use crate::token::AsteroidMiningToken;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const TOKEN_CONTRACT: &str = "asteroid-mining-token";
pub const MINING_CONTRACT: &str = "mining-simulation";
pub const MARKET_CONTRACT: &str = "resource-market";
pub const MISSION_CONTRACT: &str = "space-data-integration";
pub const CHAIN_KEY: &str = "chain";

/// Names of every contract the host can dispatch to
pub const CONTRACTS: [&str; 4] = [
    TOKEN_CONTRACT,
    MINING_CONTRACT,
    MARKET_CONTRACT,
    MISSION_CONTRACT,
];

/// Chain metadata kept alongside contract state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    /// Height used when a caller does not supply one
    pub block_height: u64,
}

/// Complete contract state
#[derive(Debug, Clone)]
pub struct World {
    pub token: AsteroidMiningToken,
    pub mining: MiningSimulation,
    pub market: ResourceMarket,
    pub missions: SpaceDataRegistry,
    pub chain: ChainState,
}

impl World {
    /// Freshly deployed contracts; the config is validated first
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            token: AsteroidMiningToken::new(&config.contract_owner, &config.token),
            mining: MiningSimulation::new(&config.mining),
            market: ResourceMarket::new(&config.contract_owner),
            missions: SpaceDataRegistry::new(&config.contract_owner),
            chain: ChainState::default(),
        })
    }

    /// Load every contract from `store`; missing ones start fresh
    pub fn load(store: &dyn KvStore, config: &Config) -> Result<Self, StorageError> {
        let fresh = Self::new(config).map_err(|e| StorageError::InvalidData(e.to_string()))?;
        Ok(Self {
            token: load(store, TOKEN_CONTRACT)?.unwrap_or(fresh.token),
            mining: load(store, MINING_CONTRACT)?.unwrap_or(fresh.mining),
            market: load(store, MARKET_CONTRACT)?.unwrap_or(fresh.market),
            missions: load(store, MISSION_CONTRACT)?.unwrap_or(fresh.missions),
            chain: load(store, CHAIN_KEY)?.unwrap_or(fresh.chain),
        })
    }

    /// Whether `store` holds any deployed state
    pub fn exists_in(store: &dyn KvStore) -> Result<bool, StorageError> {
        for key in CONTRACTS.iter().chain(std::iter::once(&CHAIN_KEY)) {
            if store.contains(key)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Write every contract to `store`, one key each
    pub fn save(&self, store: &mut dyn KvStore) -> Result<(), StorageError> {
        save(store, TOKEN_CONTRACT, &self.token)?;
        save(store, MINING_CONTRACT, &self.mining)?;
        save(store, MARKET_CONTRACT, &self.market)?;
        save(store, MISSION_CONTRACT, &self.missions)?;
        save(store, CHAIN_KEY, &self.chain)?;
        log::debug!("World saved at height {}", self.chain.block_height);
        Ok(())
    }

    /// Move the default block height forward
    pub fn advance(&mut self, blocks: u64) -> u64 {
        self.chain.block_height = self.chain.block_height.saturating_add(blocks);
        self.chain.block_height
    }

    /// SHA-256 over the canonical JSON of every contract, hex encoded
    ///
    /// Two worlds with equal contract state have equal digests; chain
    /// metadata is excluded.
    pub fn state_digest(&self) -> Result<String, StorageError> {
        let mut hasher = Sha256::new();
        for (name, doc) in [
            (TOKEN_CONTRACT, serde_json::to_vec(&self.token)?),
            (MINING_CONTRACT, serde_json::to_vec(&self.mining)?),
            (MARKET_CONTRACT, serde_json::to_vec(&self.market)?),
            (MISSION_CONTRACT, serde_json::to_vec(&self.missions)?),
        ] {
            hasher.update(name.as_bytes());
            hasher.update((doc.len() as u64).to_be_bytes());
            hasher.update(&doc);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
