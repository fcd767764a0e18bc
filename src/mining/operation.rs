//! Mining operations and their lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an operation relative to the current block height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// Height is still below `start_block`
    Pending,
    /// `start_block <= height <= end_block`
    Active,
    /// Height has passed `end_block`
    Ended,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::Pending => write!(f, "pending"),
            OperationStatus::Active => write!(f, "active"),
            OperationStatus::Ended => write!(f, "ended"),
        }
    }
}

/// A time-bounded extraction run on one asteroid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningOperation {
    pub id: u64,
    pub asteroid_id: u64,
    pub operator: String,
    pub start_block: u64,
    pub end_block: u64,
    pub resources_extracted: u128,
}

impl MiningOperation {
    pub fn status(&self, height: u64) -> OperationStatus {
        if height < self.start_block {
            OperationStatus::Pending
        } else if height > self.end_block {
            OperationStatus::Ended
        } else {
            OperationStatus::Active
        }
    }

    pub fn has_ended(&self, height: u64) -> bool {
        self.status(height) == OperationStatus::Ended
    }

    /// Blocks left until the operation ends
    pub fn blocks_remaining(&self, height: u64) -> u64 {
        self.end_block.saturating_sub(height)
    }

    /// Add extracted resources, never exceeding `reserves`. Returns the
    /// amount actually added.
    pub(crate) fn extract(&mut self, amount: u128, reserves: u128) -> u128 {
        let room = reserves.saturating_sub(self.resources_extracted);
        let added = amount.min(room);
        self.resources_extracted += added;
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation() -> MiningOperation {
        MiningOperation {
            id: 1,
            asteroid_id: 1,
            operator: "op".to_string(),
            start_block: 100,
            end_block: 200,
            resources_extracted: 0,
        }
    }

    #[test]
    fn test_status_transitions() {
        let op = operation();
        assert_eq!(op.status(99), OperationStatus::Pending);
        assert_eq!(op.status(100), OperationStatus::Active);
        assert_eq!(op.status(200), OperationStatus::Active);
        assert_eq!(op.status(201), OperationStatus::Ended);
        assert!(op.has_ended(201));
        assert_eq!(op.blocks_remaining(150), 50);
        assert_eq!(op.blocks_remaining(250), 0);
    }

    #[test]
    fn test_extract_clamps_to_reserves() {
        let mut op = operation();
        assert_eq!(op.extract(60, 100), 60);
        assert_eq!(op.extract(60, 100), 40);
        assert_eq!(op.extract(60, 100), 0);
        assert_eq!(op.resources_extracted, 100);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OperationStatus::Active.to_string(), "active");
        assert_eq!(
            serde_json::to_string(&OperationStatus::Ended).unwrap(),
            "\"ended\""
        );
    }
}
