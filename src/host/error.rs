//! Dispatch errors

use crate::core::{ContractError, ERR_INVALID_STATE, ERR_NOT_FOUND};
use thiserror::Error;

/// Errors raised while routing a call to a contract
#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("Unknown contract: {0}")]
    UnknownContract(String),
    #[error("Unknown function {function} on contract {contract}")]
    UnknownFunction { contract: String, function: String },
    #[error("{function}: expected {expected} argument(s), got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },
    #[error("{function}: invalid argument {index}: {reason}")]
    InvalidArgument {
        function: String,
        index: usize,
        reason: String,
    },
}

impl HostError {
    /// Numeric status code reported to callers
    pub fn code(&self) -> u16 {
        match self {
            HostError::Contract(err) => err.code(),
            HostError::UnknownContract(_) | HostError::UnknownFunction { .. } => ERR_NOT_FOUND,
            HostError::ArgumentCount { .. } | HostError::InvalidArgument { .. } => {
                ERR_INVALID_STATE
            }
        }
    }
}
