//! Contract-level errors
//!
//! Every failure a contract call can produce, each mapped onto one of the
//! numeric status codes callers observe (400, 401, 403, 404).

use thiserror::Error;

/// Operation attempted outside its valid lifecycle window or with bad input
pub const ERR_INVALID_STATE: u16 = 400;
/// Requested quantity exceeds the available balance, supply or shares
pub const ERR_INSUFFICIENT: u16 = 401;
/// Caller lacks the required privilege
pub const ERR_UNAUTHORIZED: u16 = 403;
/// Referenced entity does not exist
pub const ERR_NOT_FOUND: u16 = 404;

/// Contract errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized { caller: String, action: &'static str },
    #[error("Asteroid not found: {0}")]
    AsteroidNotFound(u64),
    #[error("Mining operation not found: {0}")]
    OperationNotFound(u64),
    #[error("Space mission not found: {0}")]
    MissionNotFound(u64),
    #[error("Mining operation {id} starts at block {start_block} (current height {height})")]
    OperationNotStarted {
        id: u64,
        start_block: u64,
        height: u64,
    },
    #[error("Mining operation {id} ended at block {end_block} (current height {height})")]
    OperationEnded { id: u64, end_block: u64, height: u64 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient supply for resource {resource_id}: have {have}, need {need}")]
    InsufficientSupply {
        resource_id: u64,
        have: u128,
        need: u128,
    },
    #[error("Insufficient shares for asteroid {asteroid_id}: {available} left, {requested} requested")]
    InsufficientShares {
        asteroid_id: u64,
        available: u128,
        requested: u128,
    },
}

impl ContractError {
    /// Numeric status code reported to callers
    pub fn code(&self) -> u16 {
        match self {
            ContractError::Unauthorized { .. } => ERR_UNAUTHORIZED,
            ContractError::AsteroidNotFound(_)
            | ContractError::OperationNotFound(_)
            | ContractError::MissionNotFound(_) => ERR_NOT_FOUND,
            ContractError::OperationNotStarted { .. }
            | ContractError::OperationEnded { .. }
            | ContractError::InvalidArgument(_)
            | ContractError::Overflow => ERR_INVALID_STATE,
            ContractError::InsufficientBalance { .. }
            | ContractError::InsufficientSupply { .. }
            | ContractError::InsufficientShares { .. } => ERR_INSUFFICIENT,
        }
    }

    pub(crate) fn unauthorized(caller: &str, action: &'static str) -> Self {
        ContractError::Unauthorized {
            caller: caller.to_string(),
            action,
        }
    }
}

/// Result alias used by every contract operation
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ContractError::unauthorized("x", "mint").code(), 403);
        assert_eq!(ContractError::AsteroidNotFound(999).code(), 404);
        assert_eq!(ContractError::OperationNotFound(999).code(), 404);
        assert_eq!(ContractError::MissionNotFound(999).code(), 404);
        assert_eq!(
            ContractError::OperationEnded {
                id: 1,
                end_block: 10,
                height: 11
            }
            .code(),
            400
        );
        assert_eq!(
            ContractError::OperationNotStarted {
                id: 1,
                start_block: 10,
                height: 9
            }
            .code(),
            400
        );
        assert_eq!(
            ContractError::InsufficientSupply {
                resource_id: 1,
                have: 5,
                need: 6
            }
            .code(),
            401
        );
        assert_eq!(
            ContractError::InsufficientBalance { have: 0, need: 1 }.code(),
            401
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ContractError::InsufficientBalance { have: 10, need: 20 };
        assert_eq!(err.to_string(), "Insufficient balance: have 10, need 20");
    }
}
