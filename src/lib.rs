//! Asteroid Mining: a deterministic ledger and mining simulation core
//!
//! This crate provides four cooperating contracts:
//! - A fungible token with owner-gated minting and asteroid shares
//! - A mining simulation bounded by block height
//! - A resource market tracking price and supply
//! - A registry of space missions
//!
//! Each contract owns its state, every call receives the caller and block
//! height explicitly, and the whole world persists to a key-value store.
//!
//! # Example
//!
//! ```rust
//! use asteroid_mining::config::Config;
//! use asteroid_mining::core::CallContext;
//! use asteroid_mining::host::World;
//!
//! let config = Config::with_owner("owner");
//! let mut world = World::new(&config).unwrap();
//! let ctx = CallContext::new("owner", 123_456);
//!
//! // Register an asteroid and mine it for 30 days
//! let asteroid = world.mining.register_asteroid(&ctx, "Ceres", 1000, 80, 50).unwrap();
//! let operation = world.mining.start_mining_operation(&ctx, asteroid, 30).unwrap();
//! let tick = world.mining.simulate_mining(&ctx, operation).unwrap();
//! println!("Extracted {} units", tick.extracted);
//!
//! let op = world.mining.get_mining_operation(operation).unwrap();
//! assert_eq!(op.end_block, 123_456 + 30 * 144);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod host;
pub mod market;
pub mod mining;
pub mod mission;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use config::Config;
pub use core::{CallContext, ContractError};
pub use host::{CallResult, Host, HostError, World};
pub use market::ResourceMarket;
pub use mining::{Asteroid, MiningOperation, MiningSimulation, OperationStatus};
pub use mission::{SpaceDataRegistry, SpaceMission};
pub use storage::{FileStore, KvStore, MemoryStore, StorageError};
pub use token::{AsteroidMiningToken, AsteroidOwnership};
