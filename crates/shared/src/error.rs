use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses.
///
/// The backend sends either a single `message` or a per-field `errors` map
/// (field validation failures); both are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// Human readable summary: `message`, else the field errors joined by newlines.
    pub fn summary(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        let errors = self.errors.as_ref().filter(|errors| !errors.is_empty())?;
        Some(errors.values().cloned().collect::<Vec<_>>().join("\n"))
    }

    /// Best-effort message for a raw response body, falling back to `fallback`.
    pub fn message_from_body(body: &str, fallback: &str) -> String {
        serde_json::from_str::<ApiError>(body)
            .ok()
            .and_then(|err| err.summary())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_takes_precedence_over_field_errors() {
        let body = r#"{"message":"Código duplicado","errors":{"price":"must be >= 10"}}"#;
        assert_eq!(
            ApiError::message_from_body(body, "500 Internal Server Error"),
            "Código duplicado"
        );
    }

    #[test]
    fn field_errors_are_joined_by_newline() {
        let body = r#"{"errors":{"name":"required","price":"must be >= 10"}}"#;
        assert_eq!(
            ApiError::message_from_body(body, "400 Bad Request"),
            "required\nmust be >= 10"
        );
    }

    #[test]
    fn unparseable_body_uses_fallback() {
        assert_eq!(
            ApiError::message_from_body("<html>oops</html>", "502 Bad Gateway"),
            "502 Bad Gateway"
        );
    }
}
