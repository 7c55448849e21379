//! Parser for array-shaped responses.
//!
//! `OpenSearch` suggestion endpoints (Google, Bing, `DuckDuckGo`, Wikipedia...)
//! answer with `[query, [suggestions...], descriptions?, urls?]`.

use serde_json::Value;

use super::{json_type, string_entries};
use crate::suggestions::error::ParseError;

/// Pull the string suggestions out of the array stored at `index` of a
/// top-level JSON array.
///
/// # Errors
/// Returns a [`ParseError`] if the body is not a JSON array, has no element
/// at `index`, or that element is not an array.
pub fn parse(input: &str, index: usize) -> Result<Vec<String>, ParseError> {
    let root: Value = serde_json::from_str(input)?;
    let items = match root {
        Value::Array(items) => items,
        other => {
            return Err(ParseError::new(format!(
                "expected a top-level array, found {}",
                json_type(&other)
            )));
        }
    };

    let len = items.len();
    match items.into_iter().nth(index) {
        Some(Value::Array(entries)) => Ok(string_entries(entries)),
        Some(other) => Err(ParseError::new(format!(
            "expected an array at index {index}, found {}",
            json_type(&other)
        ))),
        None => Err(ParseError::new(format!(
            "no element at index {index} (array has {len})"
        ))),
    }
}
