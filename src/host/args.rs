//! Positional argument decoding for dispatched calls

use crate::host::error::HostError;
use serde_json::Value;

/// Arguments of one call, decoded on demand
pub struct Args<'a> {
    function: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(function: &'a str, values: &'a [Value]) -> Self {
        Self { function, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Require exactly `expected` arguments
    pub fn expect(&self, expected: usize) -> Result<(), HostError> {
        self.expect_range(expected, expected)
    }

    /// Require between `min` and `max` arguments
    pub fn expect_range(&self, min: usize, max: usize) -> Result<(), HostError> {
        let got = self.values.len();
        if got < min || got > max {
            return Err(HostError::ArgumentCount {
                function: self.function.to_string(),
                expected: min,
                got,
            });
        }
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&'a Value, HostError> {
        self.values.get(index).ok_or_else(|| HostError::ArgumentCount {
            function: self.function.to_string(),
            expected: index + 1,
            got: self.values.len(),
        })
    }

    fn invalid(&self, index: usize, reason: String) -> HostError {
        HostError::InvalidArgument {
            function: self.function.to_string(),
            index,
            reason,
        }
    }

    /// Unsigned integer; accepts JSON numbers and decimal strings
    pub fn u128(&self, index: usize, name: &str) -> Result<u128, HostError> {
        match self.get(index)? {
            Value::Number(n) => n
                .as_u64()
                .map(u128::from)
                .ok_or_else(|| self.invalid(index, format!("{} must be an unsigned integer", name))),
            Value::String(s) => s
                .trim()
                .parse::<u128>()
                .map_err(|_| self.invalid(index, format!("{} must be an unsigned integer", name))),
            other => Err(self.invalid(index, format!("{} must be a number, got {}", name, other))),
        }
    }

    pub fn u64(&self, index: usize, name: &str) -> Result<u64, HostError> {
        let value = self.u128(index, name)?;
        u64::try_from(value).map_err(|_| self.invalid(index, format!("{} is out of range", name)))
    }

    pub fn str(&self, index: usize, name: &str) -> Result<&'a str, HostError> {
        match self.get(index)? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(self.invalid(index, format!("{} must be a string, got {}", name, other))),
        }
    }

    /// Non-empty principal
    pub fn principal(&self, index: usize, name: &str) -> Result<&'a str, HostError> {
        let principal = self.str(index, name)?;
        if principal.trim().is_empty() {
            return Err(self.invalid(index, format!("{} must not be empty", name)));
        }
        Ok(principal)
    }
}
