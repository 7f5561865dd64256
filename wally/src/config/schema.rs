//! Field declarations, coercion rules, and defaults.
//!
//! Each rule returns either the coerced value or a [`Rejection`]. Rejection
//! reasons never mention the field they came from; the pipeline attaches the
//! field when it turns a rejection into a [`ConfigIssue`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::issue::{ConfigIssue, IssueCode};

pub const DEFAULT_LIMIT: f64 = 0.0;
pub const DEFAULT_WAIT: f64 = 3.0;
pub const DEFAULT_AGENT: &str = "build";
pub const DEFAULT_MODEL: &str = "opencode/grok-code-fast-1";

pub const REQUIRED: &str = "is required";
pub const FILE_DOES_NOT_EXIST: &str = "file does not exist";

/// A recognized configuration field.
///
/// Variant order is declaration order, which is also the order issues are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Prompt,
    Check,
    Limit,
    Wait,
    Agent,
    Model,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Prompt,
        Field::Check,
        Field::Limit,
        Field::Wait,
        Field::Agent,
        Field::Model,
    ];

    /// Key under which the field is looked up in raw input.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Prompt => "prompt",
            Field::Check => "check",
            Field::Limit => "limit",
            Field::Wait => "wait",
            Field::Agent => "agent",
            Field::Model => "model",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule failure that is not yet attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub code: IssueCode,
    pub reason: String,
}

impl Rejection {
    pub fn required() -> Self {
        Self {
            code: IssueCode::InvalidType,
            reason: REQUIRED.to_string(),
        }
    }

    pub fn missing_file() -> Self {
        Self {
            code: IssueCode::Custom,
            reason: FILE_DOES_NOT_EXIST.to_string(),
        }
    }

    /// Wrong-shaped value. The code keyword is part of the reason so it
    /// survives into `--flag reason` output.
    pub fn type_mismatch(expected: &str, received: &str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            reason: format!(
                "expected {expected}, received {received} ({})",
                IssueCode::InvalidType
            ),
        }
    }

    pub fn attach(self, field: Field) -> ConfigIssue {
        ConfigIssue {
            path: Some(field),
            code: self.code,
            reason: self.reason,
        }
    }
}

/// Look up a field, treating JSON `null` the same as an absent key.
pub fn lookup<'a>(input: &'a serde_json::Map<String, Value>, field: Field) -> Option<&'a Value> {
    input.get(field.as_str()).filter(|value| !value.is_null())
}

/// Required string holding a path. Existence is checked separately.
pub fn required_path(value: Option<&Value>) -> Result<String, Rejection> {
    match value {
        Some(Value::String(path)) => Ok(path.clone()),
        _ => Err(Rejection::required()),
    }
}

/// Optional number, coerced from strings and booleans.
pub fn number_or(value: Option<&Value>, default: f64) -> Result<f64, Rejection> {
    let coerced = match value {
        None => return Ok(default),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => parse_number(raw),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(other) => return Err(Rejection::type_mismatch("number", kind(other))),
    };
    match coerced {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(Rejection::type_mismatch("number", &received(value))),
    }
}

/// Optional opaque string.
pub fn string_or(value: Option<&Value>, default: &str) -> Result<String, Rejection> {
    match value {
        None => Ok(default.to_string()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(Rejection::type_mismatch("string", kind(other))),
    }
}

/// Blank strings coerce to zero; anything `f64` cannot parse is rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

fn received(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(raw)) => format!("{raw:?}"),
        Some(other) => kind(other).to_string(),
        None => "undefined".to_string(),
    }
}

/// Short name of a JSON value's type, used in mismatch reasons.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_order_matches_declaration() {
        let mut sorted = Field::ALL;
        sorted.sort();
        assert_eq!(sorted, Field::ALL);
        assert_eq!(
            Field::ALL.map(Field::as_str),
            ["prompt", "check", "limit", "wait", "agent", "model"]
        );
    }

    #[test]
    fn required_path_rejects_missing_and_non_strings() {
        assert_eq!(required_path(None), Err(Rejection::required()));
        assert_eq!(required_path(Some(&json!(5))), Err(Rejection::required()));
        assert_eq!(
            required_path(Some(&json!("PROMPT.md"))),
            Ok("PROMPT.md".to_string())
        );
    }

    #[test]
    fn number_or_coerces_strings() {
        assert_eq!(number_or(Some(&json!("5")), DEFAULT_LIMIT), Ok(5.0));
        assert_eq!(number_or(Some(&json!(" 2.5 ")), DEFAULT_WAIT), Ok(2.5));
        assert_eq!(number_or(Some(&json!("")), DEFAULT_WAIT), Ok(0.0));
        assert_eq!(number_or(Some(&json!(10)), DEFAULT_WAIT), Ok(10.0));
        assert_eq!(number_or(Some(&json!(true)), DEFAULT_WAIT), Ok(1.0));
    }

    #[test]
    fn number_or_applies_default_when_absent() {
        assert_eq!(number_or(None, DEFAULT_LIMIT), Ok(0.0));
        assert_eq!(number_or(None, DEFAULT_WAIT), Ok(3.0));
    }

    #[test]
    fn number_or_rejects_non_numeric_and_non_finite() {
        let rejection = number_or(Some(&json!("many")), DEFAULT_LIMIT).expect_err("reject");
        assert_eq!(rejection.code, IssueCode::InvalidType);
        assert!(rejection.reason.contains("invalid_type"));
        assert!(rejection.reason.contains("\"many\""));

        for raw in ["inf", "-Infinity", "NaN"] {
            assert!(number_or(Some(&json!(raw)), DEFAULT_WAIT).is_err(), "{raw}");
        }

        let rejection = number_or(Some(&json!([1])), DEFAULT_WAIT).expect_err("reject");
        assert!(rejection.reason.contains("received array"));
    }

    #[test]
    fn string_or_keeps_value_or_defaults() {
        assert_eq!(string_or(None, DEFAULT_AGENT), Ok("build".to_string()));
        assert_eq!(
            string_or(Some(&json!("review")), DEFAULT_AGENT),
            Ok("review".to_string())
        );
        let rejection = string_or(Some(&json!(7)), DEFAULT_MODEL).expect_err("reject");
        assert_eq!(rejection.code, IssueCode::InvalidType);
    }

    #[test]
    fn lookup_treats_null_as_absent() {
        let input = json!({ "limit": null, "wait": "1" });
        let map = input.as_object().expect("object");
        assert_eq!(lookup(map, Field::Limit), None);
        assert_eq!(lookup(map, Field::Wait), Some(&json!("1")));
    }

    #[test]
    fn reasons_never_name_the_field() {
        let reasons = [
            Rejection::required().reason,
            Rejection::missing_file().reason,
            Rejection::type_mismatch("number", "\"x\"").reason,
        ];
        for reason in reasons {
            for field in Field::ALL {
                assert!(!reason.contains(field.as_str()), "{reason}");
            }
        }
    }
}
