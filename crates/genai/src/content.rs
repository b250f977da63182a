//! Parsing and validation of generated content payloads.

use serde_json::Value as JsonValue;

use playforge_core::ContentType;

use crate::text::GenerationError;

/// Validated output of one generation call.
///
/// Carries exactly what the item needs beyond identity: the (possibly
/// service-chosen) content type, the language, and the opaque spec payload.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub content_type: ContentType,
    pub lang: String,
    pub spec: JsonValue,
}

/// Parse the raw completion text as a content payload.
///
/// The text must be a JSON object with at least `type`, `lang` and `spec`;
/// anything else is a format failure and the task fails without persisting.
pub fn parse_generated_content(text: &str) -> Result<GeneratedContent, GenerationError> {
    let value: JsonValue = serde_json::from_str(text.trim())
        .map_err(|e| GenerationError::Format(format!("completion is not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| GenerationError::Format("completion is not a JSON object".to_string()))?;

    let type_value = object
        .get("type")
        .ok_or_else(|| GenerationError::Format("missing required key: type".to_string()))?;
    let content_type: ContentType = serde_json::from_value(type_value.clone())
        .map_err(|_| GenerationError::Format(format!("unknown content type: {type_value}")))?;

    let lang = object
        .get("lang")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| GenerationError::Format("missing required key: lang".to_string()))?
        .to_string();

    let spec = object
        .get("spec")
        .cloned()
        .ok_or_else(|| GenerationError::Format("missing required key: spec".to_string()))?;

    Ok(GeneratedContent {
        content_type,
        lang,
        spec,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_a_well_formed_payload() {
        let text = r#"{"type":"quiz_mcq","lang":"en","spec":{"questions":[1,2,3,4,5]}}"#;
        let content = parse_generated_content(text).unwrap();
        assert_eq!(content.content_type, ContentType::QuizMcq);
        assert_eq!(content.lang, "en");
        assert_eq!(content.spec["questions"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let text = "\n  {\"type\":\"true_false\",\"lang\":\"en\",\"spec\":{\"statements\":[1]}}  \n";
        assert!(parse_generated_content(text).is_ok());
    }

    #[test]
    fn rejects_non_json_and_non_object() {
        assert!(parse_generated_content("here is your game!").is_err());
        assert!(parse_generated_content("[1,2,3]").is_err());
        assert!(parse_generated_content("\"quiz\"").is_err());
    }

    #[test]
    fn rejects_missing_keys() {
        assert!(parse_generated_content(r#"{"lang":"en","spec":{}}"#).is_err());
        assert!(parse_generated_content(r#"{"type":"quiz_mcq","spec":{}}"#).is_err());
        assert!(parse_generated_content(r#"{"type":"quiz_mcq","lang":"en"}"#).is_err());
    }

    #[test]
    fn rejects_unknown_content_type() {
        let text = r#"{"type":"crossword","lang":"en","spec":{"x":1}}"#;
        let err = parse_generated_content(text).unwrap_err();
        assert!(matches!(err, GenerationError::Format(_)));
    }

    #[test]
    fn spec_payload_is_carried_verbatim() {
        let text = r#"{"type":"jigsaw","lang":"en","spec":{"imageUrl":"pending","rows":4,"cols":4}}"#;
        let content = parse_generated_content(text).unwrap();
        assert_eq!(
            content.spec,
            json!({"imageUrl": "pending", "rows": 4, "cols": 4})
        );
    }
}
