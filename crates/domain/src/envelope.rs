//! The uniform backend response wrapper.
//!
//! Every portal endpoint responds with the same shape:
//! `{ "success": bool, "message": string, "data": T, "errors": ... }`.
//! When `success` is false the payload must not be used; the message is
//! what gets shown to the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the backend accepted the operation.
    pub success: bool,
    /// Human-readable outcome, surfaced to the user on failure.
    #[serde(default)]
    pub message: String,
    /// The payload; only meaningful when `success` is true.
    #[serde(default)]
    pub data: Option<T>,
    /// Per-field validation details, shape owned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload of an accepted response.
    ///
    /// # Errors
    ///
    /// Returns the backend's message when `success` is false, or a fallback
    /// when a successful response arrived without a payload.
    pub fn into_result(self) -> Result<T, Rejection> {
        if !self.success {
            return Err(Rejection::new(self.message, self.errors));
        }
        self.data.ok_or_else(|| Rejection {
            message: "backend accepted the request but returned no data".to_string(),
            errors: None,
        })
    }

    /// Unwraps acceptance only, discarding any payload.
    ///
    /// For endpoints whose data is an acknowledgement with no usable shape
    /// (logout, account deletion).
    ///
    /// # Errors
    ///
    /// Returns the backend's message when `success` is false.
    pub fn into_ack(self) -> Result<(), Rejection> {
        if self.success {
            Ok(())
        } else {
            Err(Rejection::new(self.message, self.errors))
        }
    }
}

/// A 2xx response whose envelope reported failure.
///
/// This is a business-logic rejection, not a transport failure; the message
/// comes from the backend and is fit for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// The backend's message.
    pub message: String,
    /// Per-field validation details, if any.
    pub errors: Option<Value>,
}

impl Rejection {
    /// Builds a rejection, substituting a displayable fallback when the
    /// backend sent an empty message.
    fn new(message: String, errors: Option<Value>) -> Self {
        Self {
            message: if message.is_empty() {
                "request rejected by the backend".to_string()
            } else {
                message
            },
            errors,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_with_data_yields_payload() {
        let envelope: Envelope<i32> = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "ok",
            "data": 42
        }))
        .unwrap();
        assert_eq!(envelope.into_result().unwrap(), 42);
    }

    #[test]
    fn failure_carries_backend_message() {
        let envelope: Envelope<i32> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "Invalid credentials"
        }))
        .unwrap();
        let rejection = envelope.into_result().unwrap_err();
        assert_eq!(rejection.message, "Invalid credentials");
    }

    #[test]
    fn failure_payload_is_never_surfaced() {
        // Backends have been seen returning stale data alongside
        // success=false; it must be discarded.
        let envelope: Envelope<i32> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "nope",
            "data": 42
        }))
        .unwrap();
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn ack_ignores_data_shape() {
        let envelope: Envelope<Value> = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "logged out",
            "data": {"whatever": []}
        }))
        .unwrap();
        assert_eq!(envelope.into_ack(), Ok(()));
    }

    #[test]
    fn missing_message_gets_a_fallback() {
        let envelope: Envelope<i32> = serde_json::from_value(serde_json::json!({
            "success": false
        }))
        .unwrap();
        let rejection = envelope.into_result().unwrap_err();
        assert!(!rejection.message.is_empty());
    }

    #[test]
    fn rejected_ack_gets_the_same_fallback() {
        let envelope: Envelope<Value> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": ""
        }))
        .unwrap();
        let rejection = envelope.into_ack().unwrap_err();
        assert!(!rejection.message.is_empty());
    }
}
