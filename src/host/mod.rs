//! Contract host
//!
//! Exposes every contract through one synchronous call interface:
//! `(contract_name, function_name, args[]) -> result`, where the caller
//! and block height arrive in a [`CallContext`](crate::core::CallContext).
//!
//! # Example
//!
//! ```rust
//! use asteroid_mining::config::Config;
//! use asteroid_mining::core::CallContext;
//! use asteroid_mining::host::{Host, MINING_CONTRACT};
//! use serde_json::json;
//!
//! let mut host = Host::new(&Config::with_owner("owner")).unwrap();
//! let ctx = CallContext::new("owner", 123_456);
//!
//! let result = host.call(
//!     &ctx,
//!     MINING_CONTRACT,
//!     "register-asteroid",
//!     &[json!("Ceres"), json!(1000), json!(80), json!(50)],
//! );
//! assert_eq!(result.to_json(), json!({"success": true, "value": 1}));
//! ```

pub mod args;
pub mod error;
pub mod host;
pub mod response;
pub mod world;

pub use args::Args;
pub use error::HostError;
pub use host::Host;
pub use response::{amount_value, CallResponse, CallResult};
pub use world::{
    ChainState, World, CHAIN_KEY, CONTRACTS, MARKET_CONTRACT, MINING_CONTRACT, MISSION_CONTRACT,
    TOKEN_CONTRACT,
};
