//! JSON envelopes the gateway answers with.

use serde::{Deserialize, Serialize};

/// Body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthEnvelope {
    pub status: String,
    pub environment: String,
}

impl HealthEnvelope {
    pub fn ok(environment: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            environment: environment.into(),
        }
    }
}

/// Body of every gateway-generated error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn not_found() -> Self {
        Self {
            error: "Route not found".to_string(),
        }
    }

    /// The only message a client ever sees for a server-side fault.
    pub fn internal() -> Self {
        Self {
            error: "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_status_and_environment() {
        let json = serde_json::to_value(HealthEnvelope::ok("staging")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok", "environment": "staging"}));
    }

    #[test]
    fn error_envelopes_have_fixed_messages() {
        assert_eq!(
            serde_json::to_string(&ErrorEnvelope::not_found()).unwrap(),
            r#"{"error":"Route not found"}"#
        );
        assert_eq!(
            serde_json::to_string(&ErrorEnvelope::internal()).unwrap(),
            r#"{"error":"Internal server error"}"#
        );
    }
}
