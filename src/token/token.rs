//! Asteroid mining token
//!
//! A fungible token with owner-gated minting, sender-authorised transfers
//! and a share book for fractional asteroid ownership.

use crate::config::TokenConfig;
use crate::core::validate::require_positive;
use crate::core::{CallContext, ContractError, ContractResult};
use crate::token::shares::{AsteroidOwnership, ShareRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of transfer events kept in memory
pub const TRANSFER_HISTORY_LIMIT: usize = 100;

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Asteroid Mining Token")
    pub name: String,
    /// Token symbol (e.g., "AMT")
    pub symbol: String,
    /// Decimal places
    pub decimals: u8,
}

/// Emitted when tokens are minted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintEvent {
    pub recipient: String,
    pub amount: u128,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when tokens move between accounts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: String,
    pub to: String,
    pub amount: u128,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when a principal buys asteroid shares
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharesAcquiredEvent {
    pub asteroid_id: u64,
    pub buyer: String,
    pub shares: u128,
    /// Tokens paid to the contract owner
    pub cost: u128,
    /// Buyer's holding after the purchase
    pub total_shares: u128,
    pub block_height: u64,
    pub timestamp: DateTime<Utc>,
}

/// The asteroid-mining-token contract
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AsteroidMiningToken {
    /// Principal allowed to mint and set the URI
    owner: String,
    pub metadata: TokenMetadata,
    token_uri: Option<String>,
    total_supply: u128,
    /// Balances: principal -> amount
    balances: BTreeMap<String, u128>,
    /// Tokens charged per share
    share_price: u128,
    shares: ShareRegistry,
    /// Recent transfers, not persisted
    #[serde(skip)]
    transfer_history: Vec<TransferEvent>,
}

impl AsteroidMiningToken {
    /// Create an empty ledger owned by `owner`
    pub fn new(owner: &str, config: &TokenConfig) -> Self {
        Self {
            owner: owner.to_string(),
            metadata: TokenMetadata {
                name: config.name.clone(),
                symbol: config.symbol.clone(),
                decimals: config.decimals,
            },
            token_uri: config.uri.clone(),
            total_supply: 0,
            balances: BTreeMap::new(),
            share_price: config.share_price,
            shares: ShareRegistry::new(config.max_shares_per_asteroid),
            transfer_history: Vec::new(),
        }
    }

    // =========================================================================
    // Read-only functions
    // =========================================================================

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn share_price(&self) -> u128 {
        self.share_price
    }

    /// Balance of an account; unknown accounts hold nothing
    pub fn get_balance(&self, account: &str) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Accounts with a non-zero balance
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    pub fn get_token_uri(&self) -> Option<&str> {
        self.token_uri.as_deref()
    }

    /// A principal's stake in an asteroid, if any
    pub fn get_asteroid_ownership(&self, asteroid_id: u64, owner: &str) -> Option<AsteroidOwnership> {
        self.shares.ownership(asteroid_id, owner)
    }

    pub fn shares(&self) -> &ShareRegistry {
        &self.shares
    }

    pub fn transfer_history(&self) -> &[TransferEvent] {
        &self.transfer_history
    }

    // =========================================================================
    // Public functions
    // =========================================================================

    /// Mint new tokens (owner only)
    pub fn mint(
        &mut self,
        ctx: &CallContext,
        amount: u128,
        recipient: &str,
    ) -> ContractResult<MintEvent> {
        if !ctx.is(&self.owner) {
            log::warn!("Rejected mint of {} by non-owner {}", amount, ctx.sender);
            return Err(ContractError::unauthorized(&ctx.sender, "mint"));
        }
        require_positive("amount", amount)?;

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        *self.balances.entry(recipient.to_string()).or_insert(0) += amount;
        self.total_supply = new_supply;

        log::info!("Minted {} {} to {}", amount, self.metadata.symbol, recipient);

        Ok(MintEvent {
            recipient: recipient.to_string(),
            amount,
            block_height: ctx.block_height,
            timestamp: Utc::now(),
        })
    }

    /// Transfer tokens; the caller must be the sender
    ///
    /// # Arguments
    /// * `amount` - Amount to transfer
    /// * `sender` - Account debited, must equal the transaction sender
    /// * `recipient` - Account credited
    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        amount: u128,
        sender: &str,
        recipient: &str,
    ) -> ContractResult<TransferEvent> {
        if !ctx.is(sender) {
            log::warn!(
                "Rejected transfer from {} submitted by {}",
                sender,
                ctx.sender
            );
            return Err(ContractError::unauthorized(&ctx.sender, "transfer"));
        }
        require_positive("amount", amount)?;
        if sender == recipient {
            return Err(ContractError::InvalidArgument(
                "cannot transfer to self".to_string(),
            ));
        }

        self.move_balance(sender, recipient, amount)?;

        let event = TransferEvent {
            from: sender.to_string(),
            to: recipient.to_string(),
            amount,
            block_height: ctx.block_height,
            timestamp: Utc::now(),
        };
        self.record_transfer(event.clone());

        log::info!("Transferred {} from {} to {}", amount, sender, recipient);
        Ok(event)
    }

    /// Buy shares of an asteroid at `share_price` tokens each
    ///
    /// Payment goes to the contract owner. Fails with an insufficient-funds
    /// error when the caller cannot pay or the asteroid's share cap would be
    /// exceeded; state is untouched on failure.
    pub fn acquire_asteroid_shares(
        &mut self,
        ctx: &CallContext,
        asteroid_id: u64,
        shares: u128,
    ) -> ContractResult<SharesAcquiredEvent> {
        if asteroid_id == 0 {
            return Err(ContractError::InvalidArgument(
                "asteroid id must be greater than 0".to_string(),
            ));
        }
        require_positive("shares", shares)?;
        self.shares.check_issue(asteroid_id, shares)?;

        let cost = shares
            .checked_mul(self.share_price)
            .ok_or(ContractError::Overflow)?;
        let balance = self.get_balance(&ctx.sender);
        if balance < cost {
            return Err(ContractError::InsufficientBalance {
                have: balance,
                need: cost,
            });
        }

        if cost > 0 && !ctx.is(&self.owner) {
            let owner = self.owner.clone();
            self.move_balance(&ctx.sender, &owner, cost)?;
        }
        let total_shares = self.shares.issue(asteroid_id, &ctx.sender, shares)?;

        log::info!(
            "{} acquired {} shares of asteroid {} for {}",
            ctx.sender,
            shares,
            asteroid_id,
            cost
        );

        Ok(SharesAcquiredEvent {
            asteroid_id,
            buyer: ctx.sender.clone(),
            shares,
            cost,
            total_shares,
            block_height: ctx.block_height,
            timestamp: Utc::now(),
        })
    }

    /// Replace the metadata URI (owner only)
    pub fn set_token_uri(&mut self, ctx: &CallContext, uri: &str) -> ContractResult<()> {
        if !ctx.is(&self.owner) {
            log::warn!("Rejected token URI update by non-owner {}", ctx.sender);
            return Err(ContractError::unauthorized(&ctx.sender, "set token uri"));
        }
        self.token_uri = Some(uri.to_string());
        log::info!("Token URI set to {}", uri);
        Ok(())
    }

    fn move_balance(&mut self, from: &str, to: &str, amount: u128) -> ContractResult<()> {
        let from_balance = self.get_balance(from);
        if from_balance < amount {
            return Err(ContractError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;
        Ok(())
    }

    fn record_transfer(&mut self, event: TransferEvent) {
        self.transfer_history.push(event);
        if self.transfer_history.len() > TRANSFER_HISTORY_LIMIT {
            self.transfer_history.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const USER: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";

    fn create_test_token() -> AsteroidMiningToken {
        AsteroidMiningToken::new(OWNER, &TokenConfig::default())
    }

    fn owner_ctx() -> CallContext {
        CallContext::new(OWNER, 1)
    }

    fn total_balances(token: &AsteroidMiningToken) -> u128 {
        token.holders().iter().map(|(_, &b)| b).sum()
    }

    #[test]
    fn test_token_creation() {
        let token = create_test_token();

        assert_eq!(token.name(), "Asteroid Mining Token");
        assert_eq!(token.symbol(), "AMT");
        assert_eq!(token.decimals(), 6);
        assert_eq!(token.total_supply(), 0);
        assert_eq!(token.get_balance(OWNER), 0);
        assert_eq!(token.get_token_uri(), None);
    }

    #[test]
    fn test_mint_by_owner() {
        let mut token = create_test_token();

        let event = token.mint(&owner_ctx(), 1000, USER).unwrap();

        assert_eq!(event.amount, 1000);
        assert_eq!(token.get_balance(USER), 1000);
        assert_eq!(token.total_supply(), 1000);
    }

    #[test]
    fn test_mint_by_non_owner() {
        let mut token = create_test_token();

        let result = token.mint(&CallContext::new(USER, 1), 1000, USER);
        let err = result.unwrap_err();
        assert_eq!(err.code(), 403);
        assert_eq!(token.get_balance(USER), 0);
        assert_eq!(token.total_supply(), 0);
    }

    #[test]
    fn test_mint_zero_amount() {
        let mut token = create_test_token();

        let result = token.mint(&owner_ctx(), 0, USER);
        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    #[test]
    fn test_transfer() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 1000, OWNER).unwrap();

        let event = token.transfer(&owner_ctx(), 500, OWNER, USER).unwrap();

        assert_eq!(event.from, OWNER);
        assert_eq!(event.to, USER);
        assert_eq!(token.get_balance(OWNER), 500);
        assert_eq!(token.get_balance(USER), 500);
        assert_eq!(token.transfer_history().len(), 1);
    }

    #[test]
    fn test_transfer_conserves_supply() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 1000, OWNER).unwrap();
        token.mint(&owner_ctx(), 300, USER).unwrap();

        let before = total_balances(&token);
        token.transfer(&owner_ctx(), 250, OWNER, USER).unwrap();
        token
            .transfer(&CallContext::new(USER, 2), 550, USER, "ST3THIRD")
            .unwrap();
        let _ = token.transfer(&owner_ctx(), 10_000, OWNER, USER);

        assert_eq!(total_balances(&token), before);
        assert_eq!(token.total_supply(), before);
    }

    #[test]
    fn test_transfer_wrong_sender() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 1000, USER).unwrap();

        // The caller is the owner, but the declared sender is USER
        let result = token.transfer(&owner_ctx(), 500, USER, OWNER);
        assert_eq!(result.unwrap_err().code(), 403);
        assert_eq!(token.get_balance(USER), 1000);
    }

    #[test]
    fn test_transfer_wrong_sender_without_balance() {
        let mut token = create_test_token();

        let result = token.transfer(&owner_ctx(), 500, USER, OWNER);
        assert_eq!(result.unwrap_err().code(), 403);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 100, OWNER).unwrap();

        let result = token.transfer(&owner_ctx(), 500, OWNER, USER);
        assert!(matches!(
            result,
            Err(ContractError::InsufficientBalance { have: 100, need: 500 })
        ));
    }

    #[test]
    fn test_self_transfer() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 100, OWNER).unwrap();

        let result = token.transfer(&owner_ctx(), 10, OWNER, OWNER);
        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    #[test]
    fn test_acquire_shares() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 500, USER).unwrap();
        let user = CallContext::new(USER, 5);

        let event = token.acquire_asteroid_shares(&user, 1, 100).unwrap();

        assert_eq!(event.cost, 100);
        assert_eq!(event.total_shares, 100);
        assert_eq!(token.get_balance(USER), 400);
        assert_eq!(token.get_balance(OWNER), 100);
        assert_eq!(
            token.get_asteroid_ownership(1, USER),
            Some(AsteroidOwnership {
                owner: USER.to_string(),
                shares: 100
            })
        );
        assert_eq!(token.total_supply(), 500);
    }

    #[test]
    fn test_acquire_shares_insufficient_balance() {
        let mut token = create_test_token();
        token.mint(&owner_ctx(), 500, USER).unwrap();
        let user = CallContext::new(USER, 5);

        let result = token.acquire_asteroid_shares(&user, 1, 1_000_000);
        assert_eq!(result.unwrap_err().code(), 401);
        assert_eq!(token.get_balance(USER), 500);
        assert_eq!(token.get_asteroid_ownership(1, USER), None);
    }

    #[test]
    fn test_acquire_shares_cap() {
        let config = TokenConfig {
            max_shares_per_asteroid: 150,
            ..Default::default()
        };
        let mut token = AsteroidMiningToken::new(OWNER, &config);
        token.mint(&owner_ctx(), 1000, USER).unwrap();
        let user = CallContext::new(USER, 5);

        token.acquire_asteroid_shares(&user, 1, 100).unwrap();
        let result = token.acquire_asteroid_shares(&user, 1, 51);
        assert!(matches!(
            result,
            Err(ContractError::InsufficientShares { available: 50, .. })
        ));
        assert_eq!(token.get_balance(USER), 900);
    }

    #[test]
    fn test_token_uri() {
        let mut token = create_test_token();
        let uri = "https://example.com/metadata/asteroid-mining-token";

        token.set_token_uri(&owner_ctx(), uri).unwrap();
        assert_eq!(token.get_token_uri(), Some(uri));

        let result = token.set_token_uri(&CallContext::new(USER, 1), "https://evil");
        assert_eq!(result.unwrap_err().code(), 403);
        assert_eq!(token.get_token_uri(), Some(uri));
    }
}
