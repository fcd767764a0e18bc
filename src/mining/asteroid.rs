//! Asteroid catalog
//!
//! Asteroids are registered once and never change afterwards.

use crate::core::validate::{require_label, MAX_NAME_LEN};
use crate::core::{CallContext, ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound for richness and difficulty ratings
pub const MAX_RATING: u64 = 100;

/// A mineable body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u64,
    pub name: String,
    pub size: u64,
    /// 0-100, how much ore each unit of size holds
    pub resource_richness: u64,
    /// 1-100, how hard extraction is
    pub mining_difficulty: u64,
    pub registered_by: String,
    pub registered_at: u64,
}

impl Asteroid {
    /// Total resources the asteroid holds
    pub fn reserves(&self) -> u128 {
        self.size as u128 * self.resource_richness as u128
    }

    /// Resources one simulation tick extracts, before clamping to reserves
    pub fn extraction_yield(&self, yield_scale: u128) -> ContractResult<u128> {
        let scaled = (self.resource_richness as u128)
            .checked_mul(yield_scale)
            .ok_or(ContractError::Overflow)?;
        // difficulty is validated non-zero at registration
        Ok(scaled / self.mining_difficulty.max(1) as u128)
    }
}

/// Registry of asteroids keyed by sequential id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsteroidRegistry {
    asteroids: BTreeMap<u64, Asteroid>,
    /// Last assigned id
    last_id: u64,
}

impl AsteroidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new asteroid and return its id
    pub fn register(
        &mut self,
        ctx: &CallContext,
        name: &str,
        size: u64,
        resource_richness: u64,
        mining_difficulty: u64,
    ) -> ContractResult<u64> {
        require_label("name", name, MAX_NAME_LEN)?;
        if size == 0 {
            return Err(ContractError::InvalidArgument(
                "size must be greater than 0".to_string(),
            ));
        }
        if resource_richness > MAX_RATING {
            return Err(ContractError::InvalidArgument(format!(
                "resource richness must be 0-{}",
                MAX_RATING
            )));
        }
        if mining_difficulty == 0 || mining_difficulty > MAX_RATING {
            return Err(ContractError::InvalidArgument(format!(
                "mining difficulty must be 1-{}",
                MAX_RATING
            )));
        }

        let id = self.last_id.checked_add(1).ok_or(ContractError::Overflow)?;
        self.asteroids.insert(
            id,
            Asteroid {
                id,
                name: name.to_string(),
                size,
                resource_richness,
                mining_difficulty,
                registered_by: ctx.sender.clone(),
                registered_at: ctx.block_height,
            },
        );
        self.last_id = id;

        log::info!("Asteroid {} registered as {}", name, id);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&Asteroid> {
        self.asteroids.get(&id)
    }

    pub fn exists(&self, id: u64) -> bool {
        self.asteroids.contains_key(&id)
    }

    pub fn list(&self) -> Vec<&Asteroid> {
        self.asteroids.values().collect()
    }

    pub fn count(&self) -> usize {
        self.asteroids.len()
    }
}
