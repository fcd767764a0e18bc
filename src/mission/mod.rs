//! Space mission registry

pub mod registry;

pub use registry::{SpaceDataRegistry, SpaceMission};
