//! Core contract plumbing
//!
//! This module contains the pieces every contract shares:
//! - Call context (transaction sender and block height)
//! - Error taxonomy with numeric status codes
//! - Input validation helpers

pub mod context;
pub mod error;
pub mod validate;

pub use context::CallContext;
pub use error::{
    ContractError, ContractResult, ERR_INSUFFICIENT, ERR_INVALID_STATE, ERR_NOT_FOUND,
    ERR_UNAUTHORIZED,
};
pub use validate::{MAX_DATA_LEN, MAX_NAME_LEN};
