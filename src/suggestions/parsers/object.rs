//! Parser for object-shaped responses (`{"<key>": [suggestions...]}`).

use serde_json::Value;

use super::{json_type, string_entries};
use crate::suggestions::error::ParseError;

/// Pull the string suggestions out of the array stored under `key` of a
/// top-level JSON object.
///
/// # Errors
/// Returns a [`ParseError`] if the body is not a JSON object, lacks `key`,
/// or the value under `key` is not an array.
pub fn parse(input: &str, key: &str) -> Result<Vec<String>, ParseError> {
    let root: Value = serde_json::from_str(input)?;
    let mut fields = match root {
        Value::Object(fields) => fields,
        other => {
            return Err(ParseError::new(format!(
                "expected a top-level object, found {}",
                json_type(&other)
            )));
        }
    };

    match fields.remove(key) {
        Some(Value::Array(entries)) => Ok(string_entries(entries)),
        Some(other) => Err(ParseError::new(format!(
            "expected an array under \"{key}\", found {}",
            json_type(&other)
        ))),
        None => Err(ParseError::new(format!("missing key \"{key}\""))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_list_under_key() {
        let parsed = parse(r#"{"suggestions":["x","y"]}"#, "suggestions");
        assert_eq!(parsed, Ok(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let parsed = parse(r#"{"items":["a"],"suggestions":["b"],"meta":{}}"#, "items");
        assert_eq!(parsed, Ok(vec!["a".to_string()]));
    }

    #[test]
    fn test_drops_non_string_entries() {
        let parsed = parse(r#"{"items":[1.5,"a",false,"b",null]}"#, "items");
        assert_eq!(parsed, Ok(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_missing_key() {
        let err = parse(r#"{"results":["a"]}"#, "suggestions").err();
        assert_eq!(err, Some(ParseError::new("missing key \"suggestions\"")));
    }

    #[test]
    fn test_key_not_an_array() {
        let err = parse(r#"{"items":"a"}"#, "items").err();
        assert!(err.is_some_and(|e| e.reason().contains("found string")));
    }

    #[test]
    fn test_top_level_array() {
        let err = parse(r#"["q",["a"]]"#, "items").err();
        assert!(err.is_some_and(|e| e.reason().contains("top-level object")));
    }
}
