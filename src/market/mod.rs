//! Resource market

pub mod market;

pub use market::{ResourceListing, ResourceMarket};
