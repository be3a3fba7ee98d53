//! Parsing and validation of classifier output.
//!
//! 1. Strict JSON parse of the whole response.
//! 2. Otherwise, the block from the first `{` to the last `}`.
//! 3. Otherwise, `ClassifierError::ParseFailure`.
//!
//! A parsed object must carry `masked_text` (string) and `mapping` (object).

use cloak_core::errors::ClassifierError;
use cloak_core::models::ClassifierResponse;
use cloak_core::{PiiMapping, Placeholder};
use serde_json::{Map, Value};

/// Parse raw classifier output into a validated response.
pub fn parse_classifier_output(raw: &str) -> Result<ClassifierResponse, ClassifierError> {
    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(v) => v,
        Err(strict_err) => {
            let block = extract_json_block(raw).ok_or_else(|| ClassifierError::ParseFailure {
                reason: format!("no JSON object found ({strict_err})"),
                raw_len: raw.len(),
            })?;
            serde_json::from_str::<Value>(block).map_err(|e| ClassifierError::ParseFailure {
                reason: e.to_string(),
                raw_len: raw.len(),
            })?
        }
    };

    let Value::Object(obj) = value else {
        return Err(ClassifierError::ParseFailure {
            reason: "top-level JSON value is not an object".to_string(),
            raw_len: raw.len(),
        });
    };

    let masked_text = match obj.get("masked_text") {
        None | Some(Value::Null) => {
            return Err(ClassifierError::FieldMissing {
                field: "masked_text".to_string(),
            })
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ClassifierError::ParseFailure {
                reason: "`masked_text` is not a string".to_string(),
                raw_len: raw.len(),
            })
        }
    };

    let mapping = match obj.get("mapping") {
        None | Some(Value::Null) => {
            return Err(ClassifierError::FieldMissing {
                field: "mapping".to_string(),
            })
        }
        Some(Value::Object(map)) => parse_mapping(map, raw.len())?,
        Some(_) => {
            return Err(ClassifierError::ParseFailure {
                reason: "`mapping` is not an object".to_string(),
                raw_len: raw.len(),
            })
        }
    };

    Ok(ClassifierResponse {
        masked_text,
        mapping,
    })
}

/// Greedy first-`{`-to-last-`}` extraction.
fn extract_json_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Validate mapping entries. Keys must be `<KIND_N>` tokens; an inverted
/// entry (`"John": "<NAME_1>"`) is accepted and flipped. Numeric values are
/// accepted as their decimal text.
fn parse_mapping(map: &Map<String, Value>, raw_len: usize) -> Result<PiiMapping, ClassifierError> {
    let mut mapping = PiiMapping::new();
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(ClassifierError::ParseFailure {
                    reason: format!("mapping value for `{key}` is not a string"),
                    raw_len,
                })
            }
        };

        let (placeholder, original) = if Placeholder::parse(key).is_some() {
            (key.clone(), value)
        } else if Placeholder::parse(&value).is_some() {
            (value, key.clone())
        } else {
            return Err(ClassifierError::InvalidPlaceholder { token: key.clone() });
        };

        if original.is_empty() {
            return Err(ClassifierError::ParseFailure {
                reason: format!("empty original value for {placeholder}"),
                raw_len,
            });
        }
        mapping.insert_if_absent(placeholder, original);
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_parses() {
        let r = parse_classifier_output(
            r#"{"masked_text": "Hi <NAME_1>", "mapping": {"<NAME_1>": "Bob"}}"#,
        )
        .unwrap();
        assert_eq!(r.masked_text, "Hi <NAME_1>");
        assert_eq!(r.mapping.get("<NAME_1>"), Some("Bob"));
    }

    #[test]
    fn commentary_around_json_is_tolerated() {
        let raw = "Sure! Here is the result:\n```json\n{\"masked_text\": \"Hi <NAME_1>\", \"mapping\": {\"<NAME_1>\": \"Bob\"}}\n```\nLet me know.";
        let r = parse_classifier_output(raw).unwrap();
        assert_eq!(r.mapping.len(), 1);
    }

    #[test]
    fn no_json_is_a_parse_failure() {
        let err = parse_classifier_output("I cannot help with that.").unwrap_err();
        assert!(matches!(err, ClassifierError::ParseFailure { .. }));
    }

    #[test]
    fn broken_block_is_a_parse_failure() {
        let err = parse_classifier_output("here {\"masked_text\": \"x\", } oops").unwrap_err();
        assert!(matches!(err, ClassifierError::ParseFailure { .. }));
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let err = parse_classifier_output(r#"{"mapping": {}}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::FieldMissing { ref field } if field == "masked_text"));

        let err = parse_classifier_output(r#"{"masked_text": "hello"}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::FieldMissing { ref field } if field == "mapping"));
    }

    #[test]
    fn inverted_entries_are_flipped() {
        let r = parse_classifier_output(
            r#"{"masked_text": "Hi <NAME_1>", "mapping": {"Bob": "<NAME_1>"}}"#,
        )
        .unwrap();
        assert_eq!(r.mapping.get("<NAME_1>"), Some("Bob"));
    }

    #[test]
    fn numeric_values_become_text() {
        let r = parse_classifier_output(
            r#"{"masked_text": "ref <ID_1>", "mapping": {"<ID_1>": 98765}}"#,
        )
        .unwrap();
        assert_eq!(r.mapping.get("<ID_1>"), Some("98765"));
    }

    #[test]
    fn non_placeholder_keys_are_rejected() {
        let err = parse_classifier_output(
            r#"{"masked_text": "Hi [NAME]", "mapping": {"[NAME]": "Bob"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidPlaceholder { .. }));
    }

    #[test]
    fn empty_mapping_is_valid() {
        let r = parse_classifier_output(r#"{"masked_text": "nothing here", "mapping": {}}"#).unwrap();
        assert!(r.mapping.is_empty());
    }
}
