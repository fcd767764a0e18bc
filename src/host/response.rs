//! Call results as seen by callers

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a state-changing call, or of a read-only call that reports
/// a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<u16>,
}

impl CallResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
        }
    }

    pub fn ok_value(value: Value) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn err(code: u16) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(code),
        }
    }
}

/// What a host call returns: a response envelope, or a bare record
/// (`null` when absent) for read-only lookups
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallResult {
    Response(CallResponse),
    Record(Value),
}

impl CallResult {
    pub fn ok() -> Self {
        CallResult::Response(CallResponse::ok())
    }

    pub fn ok_value(value: Value) -> Self {
        CallResult::Response(CallResponse::ok_value(value))
    }

    pub fn err(code: u16) -> Self {
        CallResult::Response(CallResponse::err(code))
    }

    /// Failed responses are unsuccessful; records always succeed
    pub fn is_success(&self) -> bool {
        match self {
            CallResult::Response(response) => response.success,
            CallResult::Record(_) => true,
        }
    }

    pub fn error_code(&self) -> Option<u16> {
        match self {
            CallResult::Response(response) => response.error,
            CallResult::Record(_) => None,
        }
    }

    /// The response value or the record itself
    pub fn value(&self) -> Option<&Value> {
        match self {
            CallResult::Response(response) => response.value.as_ref(),
            CallResult::Record(record) => Some(record),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CallResult::Record(Value::Null))
    }

    pub fn to_json(&self) -> Value {
        match self {
            CallResult::Response(response) => {
                serde_json::to_value(response).unwrap_or(Value::Null)
            }
            CallResult::Record(record) => record.clone(),
        }
    }
}

/// JSON form of an amount; values beyond `u64` become decimal strings
pub fn amount_value(amount: u128) -> Value {
    match u64::try_from(amount) {
        Ok(small) => Value::from(small),
        Err(_) => Value::String(amount.to_string()),
    }
}
