//! Fractional asteroid ownership
//!
//! Shares are issued per asteroid up to a fixed cap. The sum of all
//! holdings for an asteroid always equals its issued count.

use crate::core::{ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A holder's stake in one asteroid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsteroidOwnership {
    pub owner: String,
    pub shares: u128,
}

/// Share book for every asteroid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRegistry {
    /// Cap on issued shares per asteroid
    max_per_asteroid: u128,
    /// asteroid_id -> shares issued so far
    issued: BTreeMap<u64, u128>,
    /// asteroid_id -> (holder -> shares)
    holdings: BTreeMap<u64, BTreeMap<String, u128>>,
}

impl ShareRegistry {
    pub fn new(max_per_asteroid: u128) -> Self {
        Self {
            max_per_asteroid,
            issued: BTreeMap::new(),
            holdings: BTreeMap::new(),
        }
    }

    pub fn max_per_asteroid(&self) -> u128 {
        self.max_per_asteroid
    }

    /// Shares issued for an asteroid
    pub fn issued(&self, asteroid_id: u64) -> u128 {
        self.issued.get(&asteroid_id).copied().unwrap_or(0)
    }

    /// Shares still available for an asteroid
    pub fn available(&self, asteroid_id: u64) -> u128 {
        self.max_per_asteroid.saturating_sub(self.issued(asteroid_id))
    }

    pub fn shares_of(&self, asteroid_id: u64, owner: &str) -> u128 {
        self.holdings
            .get(&asteroid_id)
            .and_then(|holders| holders.get(owner))
            .copied()
            .unwrap_or(0)
    }

    pub fn ownership(&self, asteroid_id: u64, owner: &str) -> Option<AsteroidOwnership> {
        match self.shares_of(asteroid_id, owner) {
            0 => None,
            shares => Some(AsteroidOwnership {
                owner: owner.to_string(),
                shares,
            }),
        }
    }

    /// All holders of an asteroid, ordered by principal
    pub fn holders(&self, asteroid_id: u64) -> Vec<AsteroidOwnership> {
        self.holdings
            .get(&asteroid_id)
            .map(|holders| {
                holders
                    .iter()
                    .map(|(owner, &shares)| AsteroidOwnership {
                        owner: owner.clone(),
                        shares,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check that `shares` more can be issued without touching state
    pub fn check_issue(&self, asteroid_id: u64, shares: u128) -> ContractResult<()> {
        let available = self.available(asteroid_id);
        if shares > available {
            return Err(ContractError::InsufficientShares {
                asteroid_id,
                available,
                requested: shares,
            });
        }
        Ok(())
    }

    /// Issue shares to a holder, returning the holder's new total
    pub fn issue(&mut self, asteroid_id: u64, owner: &str, shares: u128) -> ContractResult<u128> {
        self.check_issue(asteroid_id, shares)?;

        *self.issued.entry(asteroid_id).or_insert(0) += shares;
        let holding = self
            .holdings
            .entry(asteroid_id)
            .or_default()
            .entry(owner.to_string())
            .or_insert(0);
        *holding += shares;

        Ok(*holding)
    }
}
