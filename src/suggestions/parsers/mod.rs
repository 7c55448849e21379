//! Response parsers for search suggestion endpoints.
//!
//! Engines answer suggestion requests in one of a few JSON shapes. Each
//! shape gets its own module; [`select_response_parser`] maps an engine
//! name to the parser for its shape.

pub mod array;
pub mod object;
pub mod qwant;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::suggestions::error::ParseError;

/// Index of the suggestion list in an `OpenSearch`-style array response.
pub const DEFAULT_RESULTS_INDEX: usize = 1;

/// Key holding the suggestion list in Azerdict responses.
pub const AZERDICT_RESULTS_KEY: &str = "suggestions";

/// Key holding the suggestion list in Daum responses.
pub const DAUM_RESULTS_KEY: &str = "items";

/// Engine name that selects [`ResponseParser::Azerdict`].
pub const AZERDICT_ENGINE: &str = "Azerdict";

/// Engine name that selects [`ResponseParser::Daum`].
pub const DAUM_ENGINE: &str = "다음지도";

/// Engine name that selects [`ResponseParser::Qwant`].
pub const QWANT_ENGINE: &str = "Qwant";

/// The fixed set of suggestion response parsers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseParser {
    /// `[query, [suggestions...], ...]`, used by every unlisted engine.
    #[default]
    Default,
    /// `{"suggestions": [...]}`.
    Azerdict,
    /// `{"items": [...]}`.
    Daum,
    /// `{"data": {"items": [{"value": ...}, ...]}}`.
    Qwant,
}

impl ResponseParser {
    /// Every parser, in declaration order.
    pub const ALL: [Self; 4] = [Self::Default, Self::Azerdict, Self::Daum, Self::Qwant];

    /// Short identifier of the parser.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Azerdict => "azerdict",
            Self::Daum => "daum",
            Self::Qwant => "qwant",
        }
    }

    /// Extract the ordered suggestion list from a raw response body.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the body is not valid JSON or does not
    /// have the shape this parser expects.
    pub fn parse(&self, input: &str) -> Result<Vec<String>, ParseError> {
        match self {
            Self::Default => array::parse(input, DEFAULT_RESULTS_INDEX),
            Self::Azerdict => object::parse(input, AZERDICT_RESULTS_KEY),
            Self::Daum => object::parse(input, DAUM_RESULTS_KEY),
            Self::Qwant => qwant::parse(input),
        }
    }
}

impl fmt::Display for ResponseParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the parser for a search engine by its display name.
///
/// Names are matched exactly. Any name not listed here gets
/// [`ResponseParser::Default`].
#[must_use]
pub fn select_response_parser(engine_name: &str) -> ResponseParser {
    match engine_name {
        AZERDICT_ENGINE => ResponseParser::Azerdict,
        DAUM_ENGINE => ResponseParser::Daum,
        QWANT_ENGINE => ResponseParser::Qwant,
        _ => ResponseParser::Default,
    }
}

/// Keep the string entries of a JSON array, dropping everything else.
fn string_entries(entries: Vec<Value>) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Human-readable JSON type name for error messages.
const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
