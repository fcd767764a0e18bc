//! Asteroid mining token
//!
//! Provides the fungible ledger contract with:
//! - Balances per principal and owner-gated minting
//! - Transfers authorised by the sending principal
//! - Asteroid shares bought with tokens, capped per asteroid
//! - A mutable metadata URI
//!
//! # Example
//!
//! ```rust
//! use asteroid_mining::config::TokenConfig;
//! use asteroid_mining::core::CallContext;
//! use asteroid_mining::token::AsteroidMiningToken;
//!
//! let owner = CallContext::new("owner", 1);
//! let mut token = AsteroidMiningToken::new("owner", &TokenConfig::default());
//!
//! token.mint(&owner, 1000, "owner").unwrap();
//! token.transfer(&owner, 250, "owner", "alice").unwrap();
//!
//! assert_eq!(token.get_balance("alice"), 250);
//! ```

pub mod shares;
pub mod token;

pub use shares::{AsteroidOwnership, ShareRegistry};
pub use token::{
    AsteroidMiningToken, MintEvent, SharesAcquiredEvent, TokenMetadata, TransferEvent,
    TRANSFER_HISTORY_LIMIT,
};
