use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::ApiError;

pub static MISSING_FIELDS: &str =
    "Missing required fields. Please provide 'topic' and 'personal_message'";

#[derive(Deserialize, ToSchema, Debug, PartialEq, Eq)]
pub struct GenerateRequest {
    pub topic: String,
    pub personal_message: String,
}

impl GenerateRequest {
    /// Only the presence of both fields is checked; empty strings pass.
    /// Non-string values are kept as their JSON text.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(missing_fields());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::UpstreamError(e.to_string()))?;

        let Value::Object(fields) = value else {
            return Err(missing_fields());
        };

        let (Some(topic), Some(personal_message)) =
            (fields.get("topic"), fields.get("personal_message"))
        else {
            return Err(missing_fields());
        };

        Ok(Self {
            topic: field_text(topic),
            personal_message: field_text(personal_message),
        })
    }
}

fn missing_fields() -> ApiError {
    ApiError::ValidationError(MISSING_FIELDS.to_string())
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn is_missing_fields(result: Result<GenerateRequest, ApiError>) -> bool {
        matches!(
            result,
            Err(ApiError::ValidationError(m)) if m == MISSING_FIELDS
        )
    }

    #[test]
    fn test_accepts_present_fields() {
        // Act
        let request = GenerateRequest::from_body(
            br#"{
                "topic": "USA Stock Market",
                "personal_message": "Hello",
                "extra": 1
            }"#,
        );

        // Assert
        assert_eq!(
            request.ok(),
            Some(GenerateRequest {
                topic: "USA Stock Market".to_string(),
                personal_message: "Hello".to_string(),
            })
        );
    }

    #[test]
    fn test_accepts_empty_and_non_string_values() {
        // Act
        let request = GenerateRequest::from_body(
            br#"{"topic": "", "personal_message": 42}"#,
        )
        .ok()
        .unwrap();

        // Assert
        assert_eq!(request.topic, "");
        assert_eq!(request.personal_message, "42");
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert!(is_missing_fields(GenerateRequest::from_body(b"{}")));
        assert!(is_missing_fields(GenerateRequest::from_body(
            br#"{"topic": "Rust"}"#
        )));
        assert!(is_missing_fields(GenerateRequest::from_body(
            br#"{"personal_message": "Hi"}"#
        )));
        assert!(is_missing_fields(GenerateRequest::from_body(b"")));
        assert!(is_missing_fields(GenerateRequest::from_body(b"null")));
        assert!(is_missing_fields(GenerateRequest::from_body(b"[]")));
    }

    #[test]
    fn test_malformed_json_is_not_a_validation_error() {
        // Act
        let result = GenerateRequest::from_body(b"{topic:");

        // Assert
        assert!(matches!(result, Err(ApiError::UpstreamError(_))));
    }
}
