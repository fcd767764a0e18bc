//! Mining simulation
//!
//! Provides the asteroid catalog and block-height-bounded extraction runs.

pub mod asteroid;
pub mod operation;
pub mod simulation;

pub use asteroid::{Asteroid, AsteroidRegistry, MAX_RATING};
pub use operation::{MiningOperation, OperationStatus};
pub use simulation::{MiningSimulation, MiningTick};
