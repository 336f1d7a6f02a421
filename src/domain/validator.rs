//! Schema-validated parsing of raw model output
//!
//! Model output is untrusted and occasionally malformed, so every failure
//! mode here is a recoverable `None`, never an error: callers branch on the
//! result instead of unwinding.

use serde::de::DeserializeOwned;

use crate::domain::schema::SchemaDescriptor;

/// Parse raw chat-model text against the expected schema.
///
/// Returns `None` when the text is not valid JSON, when a required field
/// is missing or mistyped, or when the value cannot be deserialized into
/// `T`. No retries happen here.
pub fn parse_structured<T: DeserializeOwned>(raw: &str, schema: &SchemaDescriptor) -> Option<T> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "model reply is not valid JSON");
            return None;
        }
    };

    if !schema.validate(&value) {
        tracing::warn!(schema = schema.name(), "model reply does not match schema");
        return None;
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::warn!(%error, schema = schema.name(), "model reply failed to deserialize");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::StructuredAnswer;

    #[test]
    fn test_valid_reply() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> =
            parse_structured(r#"{"answer": "Paris"}"#, &schema);

        assert_eq!(parsed.unwrap().answer, "Paris");
    }

    #[test]
    fn test_invalid_json_yields_none() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> =
            parse_structured("The answer is Paris.", &schema);

        assert!(parsed.is_none());
    }

    #[test]
    fn test_missing_required_field_yields_none() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> =
            parse_structured(r#"{"reply": "Paris"}"#, &schema);

        assert!(parsed.is_none());
    }

    #[test]
    fn test_mistyped_field_yields_none() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> = parse_structured(r#"{"answer": 7}"#, &schema);

        assert!(parsed.is_none());
    }

    #[test]
    fn test_truncated_json_yields_none() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> = parse_structured(r#"{"answer": "Par"#, &schema);

        assert!(parsed.is_none());
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let schema = StructuredAnswer::schema();
        let parsed: Option<StructuredAnswer> =
            parse_structured(r#"{"answer": "Paris", "confidence": 0.99}"#, &schema);

        assert_eq!(parsed.unwrap().answer, "Paris");
    }
}
