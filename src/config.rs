//! Host configuration
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use crate::mining::asteroid::MAX_RATING;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Principal that deploys the contracts by default
pub const DEFAULT_CONTRACT_OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// Blocks produced per day (one every ten minutes)
pub const DEFAULT_BLOCKS_PER_DAY: u64 = 144;

/// Resources yielded per simulation tick for richness == difficulty
pub const DEFAULT_YIELD_SCALE: u128 = 100;

/// Share cap per asteroid
pub const DEFAULT_MAX_SHARES_PER_ASTEROID: u128 = 1_000_000;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Token identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Initial metadata URI
    pub uri: Option<String>,
    /// Tokens charged per asteroid share
    pub share_price: u128,
    /// Maximum shares issued per asteroid
    pub max_shares_per_asteroid: u128,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Asteroid Mining Token".to_string(),
            symbol: "AMT".to_string(),
            decimals: 6,
            uri: None,
            share_price: 1,
            max_shares_per_asteroid: DEFAULT_MAX_SHARES_PER_ASTEROID,
        }
    }
}

/// Mining simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub blocks_per_day: u64,
    pub yield_scale: u128,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            blocks_per_day: DEFAULT_BLOCKS_PER_DAY,
            yield_scale: DEFAULT_YIELD_SCALE,
        }
    }
}

/// Full host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Privileged principal for administrative operations
    pub contract_owner: String,
    pub token: TokenConfig,
    pub mining: MiningConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contract_owner: DEFAULT_CONTRACT_OWNER.to_string(),
            token: TokenConfig::default(),
            mining: MiningConfig::default(),
        }
    }
}

impl Config {
    /// Default configuration with a different owner
    pub fn with_owner(owner: impl Into<String>) -> Self {
        Self {
            contract_owner: owner.into(),
            ..Default::default()
        }
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_owner.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "contract_owner must not be empty".to_string(),
            ));
        }
        if self.mining.blocks_per_day == 0 {
            return Err(ConfigError::Invalid(
                "blocks_per_day must be greater than 0".to_string(),
            ));
        }
        if self.mining.yield_scale > u128::MAX / u128::from(MAX_RATING) {
            return Err(ConfigError::Invalid(format!(
                "yield_scale must be at most {}",
                u128::MAX / u128::from(MAX_RATING)
            )));
        }
        if self.token.max_shares_per_asteroid == 0 {
            return Err(ConfigError::Invalid(
                "max_shares_per_asteroid must be greater than 0".to_string(),
            ));
        }
        if self.token.decimals > 18 {
            return Err(ConfigError::Invalid("decimals must be 0-18".to_string()));
        }
        Ok(())
    }
}
