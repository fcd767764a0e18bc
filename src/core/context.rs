//! Execution context threaded into every contract call

use serde::{Deserialize, Serialize};

/// Ambient values a host supplies with each call: who is calling and at
/// what block height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Transaction sender
    pub sender: String,
    /// Current block height
    pub block_height: u64,
}

impl CallContext {
    pub fn new(sender: impl Into<String>, block_height: u64) -> Self {
        Self {
            sender: sender.into(),
            block_height,
        }
    }

    /// Same sender, different height
    pub fn at_height(&self, block_height: u64) -> Self {
        Self {
            sender: self.sender.clone(),
            block_height,
        }
    }

    /// Same height, different sender
    pub fn as_sender(&self, sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            block_height: self.block_height,
        }
    }

    pub fn is(&self, principal: &str) -> bool {
        self.sender == principal
    }
}
