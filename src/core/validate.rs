//! Input validation shared by the registries

use crate::core::error::{ContractError, ContractResult};

/// Maximum length of names and short labels
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length of free-form mission data
pub const MAX_DATA_LEN: usize = 1024;

/// Require a non-empty string of at most `max` characters
pub fn require_label(field: &str, value: &str, max: usize) -> ContractResult<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(ContractError::InvalidArgument(format!(
            "{} must be 1-{} characters",
            field, max
        )));
    }
    Ok(())
}

/// Require a string of at most `max` characters (may be empty)
pub fn require_max_len(field: &str, value: &str, max: usize) -> ContractResult<()> {
    if value.chars().count() > max {
        return Err(ContractError::InvalidArgument(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Require a strictly positive amount
pub fn require_positive(field: &str, amount: u128) -> ContractResult<()> {
    if amount == 0 {
        return Err(ContractError::InvalidArgument(format!(
            "{} must be greater than 0",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert!(require_label("name", "Ceres", MAX_NAME_LEN).is_ok());
        assert!(require_label("name", "", MAX_NAME_LEN).is_err());
        assert!(require_label("name", &"x".repeat(65), MAX_NAME_LEN).is_err());
        assert!(require_max_len("data", "", MAX_DATA_LEN).is_ok());
        assert!(require_max_len("data", &"x".repeat(1025), MAX_DATA_LEN).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(require_positive("amount", 1).is_ok());
        assert!(matches!(
            require_positive("amount", 0),
            Err(ContractError::InvalidArgument(_))
        ));
    }
}
