//! Resource market contract
//!
//! Tracks a price and an available supply per resource id. Listings are
//! created lazily by the first price update or supply addition.

use crate::core::validate::require_positive;
use crate::core::{CallContext, ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price and supply of one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceListing {
    pub resource_id: u64,
    pub price: u128,
    pub supply: u128,
}

/// The resource-market contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMarket {
    /// Principal allowed to set prices
    owner: String,
    listings: BTreeMap<u64, ResourceListing>,
}

impl ResourceMarket {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            listings: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn listing_mut(&mut self, resource_id: u64) -> &mut ResourceListing {
        self.listings
            .entry(resource_id)
            .or_insert_with(|| ResourceListing {
                resource_id,
                ..Default::default()
            })
    }

    /// Set the price of a resource (owner only)
    pub fn update_resource_price(
        &mut self,
        ctx: &CallContext,
        resource_id: u64,
        new_price: u128,
    ) -> ContractResult<()> {
        if !ctx.is(&self.owner) {
            log::warn!(
                "Rejected price update for resource {} by non-owner {}",
                resource_id,
                ctx.sender
            );
            return Err(ContractError::unauthorized(&ctx.sender, "update resource price"));
        }

        self.listing_mut(resource_id).price = new_price;
        log::info!("Resource {} price set to {}", resource_id, new_price);
        Ok(())
    }

    /// Increase the supply of a resource, returning the new supply
    pub fn add_resource_supply(
        &mut self,
        ctx: &CallContext,
        resource_id: u64,
        amount: u128,
    ) -> ContractResult<u128> {
        require_positive("amount", amount)?;

        let listing = self.listing_mut(resource_id);
        listing.supply = listing
            .supply
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        log::info!(
            "{} added {} supply to resource {} (now {})",
            ctx.sender,
            amount,
            resource_id,
            listing.supply
        );
        Ok(listing.supply)
    }

    /// Decrease the supply of a resource, returning the new supply
    pub fn remove_resource_supply(
        &mut self,
        ctx: &CallContext,
        resource_id: u64,
        amount: u128,
    ) -> ContractResult<u128> {
        require_positive("amount", amount)?;

        let have = self.get_resource_supply(resource_id).unwrap_or(0);
        if amount > have {
            return Err(ContractError::InsufficientSupply {
                resource_id,
                have,
                need: amount,
            });
        }

        let listing = self.listing_mut(resource_id);
        listing.supply -= amount;

        log::info!(
            "{} removed {} supply from resource {} (now {})",
            ctx.sender,
            amount,
            resource_id,
            listing.supply
        );
        Ok(listing.supply)
    }

    pub fn get_resource_price(&self, resource_id: u64) -> Option<u128> {
        self.listings.get(&resource_id).map(|l| l.price)
    }

    pub fn get_resource_supply(&self, resource_id: u64) -> Option<u128> {
        self.listings.get(&resource_id).map(|l| l.supply)
    }

    pub fn get_listing(&self, resource_id: u64) -> Option<&ResourceListing> {
        self.listings.get(&resource_id)
    }

    pub fn listings(&self) -> Vec<&ResourceListing> {
        self.listings.values().collect()
    }

    /// Price times supply summed over all listings
    pub fn total_value(&self) -> Option<u128> {
        self.listings
            .values()
            .try_fold(0u128, |acc, l| acc.checked_add(l.price.checked_mul(l.supply)?))
    }
}
