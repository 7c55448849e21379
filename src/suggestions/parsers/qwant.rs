//! Parser for Qwant suggestion responses.
//!
//! Qwant wraps its suggestions in an envelope:
//! `{"status": "success", "data": {"items": [{"value": "...", "suggestType": 3}]}}`

use serde_json::Value;

use super::json_type;
use crate::suggestions::error::ParseError;

/// Pull the `value` field of every item in `data.items`.
///
/// Items that are not objects, or whose `value` is missing or not a string,
/// are dropped.
///
/// # Errors
/// Returns a [`ParseError`] if `data` is missing or not an object, or if
/// `data.items` is missing or not an array.
pub fn parse(input: &str) -> Result<Vec<String>, ParseError> {
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

    let mut data = match fields.remove("data") {
        Some(Value::Object(data)) => data,
        Some(other) => {
            return Err(ParseError::new(format!(
                "expected an object under \"data\", found {}",
                json_type(&other)
            )));
        }
        None => return Err(ParseError::new("missing key \"data\"")),
    };

    let items = match data.remove("items") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ParseError::new(format!(
                "expected an array under \"data.items\", found {}",
                json_type(&other)
            )));
        }
        None => return Err(ParseError::new("missing key \"data.items\"")),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut item) => match item.remove("value") {
                Some(Value::String(value)) => Some(value),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_values() {
        let parsed = parse(r#"{"data":{"items":[{"value":"p"},{"value":"q"}]}}"#);
        assert_eq!(parsed, Ok(vec!["p".to_string(), "q".to_string()]));
    }

    #[test]
    fn test_drops_items_without_string_value() {
        let parsed = parse(
            r#"{"data":{"items":[{"value":"a"},"b",{"label":"c"},{"value":7},null,{"value":"d"}]}}"#,
        );
        assert_eq!(parsed, Ok(vec!["a".to_string(), "d".to_string()]));
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(parse(r#"{"status":"success","data":{"items":[]}}"#), Ok(Vec::new()));
    }

    #[test]
    fn test_missing_data() {
        let err = parse(r#"{"status":"error"}"#).err();
        assert_eq!(err, Some(ParseError::new("missing key \"data\"")));
    }

    #[test]
    fn test_missing_items() {
        let err = parse(r#"{"data":{}}"#).err();
        assert_eq!(err, Some(ParseError::new("missing key \"data.items\"")));
    }

    #[test]
    fn test_data_not_an_object() {
        let err = parse(r#"{"data":[{"value":"a"}]}"#).err();
        assert!(err.is_some_and(|e| e.reason().contains("found array")));
    }

    #[test]
    fn test_items_not_an_array() {
        let err = parse(r#"{"data":{"items":{"value":"a"}}}"#).err();
        assert!(err.is_some_and(|e| e.reason().contains("found object")));
    }
}
