//! Per-field decoding of JSON request bodies.
//!
//! Bodies are read into `Option<Value>` fields so a value of the wrong type
//! becomes a message on that field instead of failing the whole request.
//! `None` means the key was absent; `Some(Value::Null)` is an explicit null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::application::dto::ads::CategoryRef;
use crate::application::validation::{FieldErrors, NULL};

pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_BOOLEAN: &str = "Must be a valid boolean.";

/// `deserialize_with` target that keeps an explicit `null` as `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub fn incorrect_pk_type(value: &Value) -> String {
    let kind = match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    };
    format!("Incorrect type. Expected pk value, received {kind}.")
}

pub fn text(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Null => {
            errors.add(field, NULL);
            None
        }
        _ => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

/// Choices are matched on their text form, so `5` is reported as `"5"`.
pub fn choice_text(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Null => {
            errors.add(field, NULL);
            None
        }
        other => Some(other.to_string()),
    }
}

/// Integer ids, also accepted as numeric strings.
pub fn pk(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<i64> {
    let value = value?;
    if value.is_null() {
        errors.add(field, NULL);
        return None;
    }
    match parse_pk(&value) {
        Some(id) => Some(id),
        None => {
            errors.add(field, incorrect_pk_type(&value));
            None
        }
    }
}

/// Nullable id reference: absent keeps, `null` clears.
pub fn pk_ref(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> CategoryRef {
    match value {
        None => CategoryRef::Unchanged,
        Some(Value::Null) => CategoryRef::Clear,
        Some(value) => match parse_pk(&value) {
            Some(id) => CategoryRef::Set(id),
            None => {
                errors.add(field, incorrect_pk_type(&value));
                CategoryRef::Unchanged
            }
        },
    }
}

pub fn boolean(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<bool> {
    let parsed = match value? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "t" | "T" | "yes" | "Yes" | "y" | "Y" | "on" | "On"
            | "1" => Some(true),
            "false" | "False" | "FALSE" | "f" | "F" | "no" | "No" | "n" | "N" | "off" | "Off"
            | "0" => Some(false),
            _ => None,
        },
        Value::Null => {
            errors.add(field, NULL);
            return None;
        }
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, NOT_A_BOOLEAN);
    }
    parsed
}

fn parse_pk(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let mut errors = FieldErrors::default();
        assert_eq!(pk(&mut errors, "a", Some(json!(3))), Some(3));
        assert_eq!(pk(&mut errors, "b", Some(json!("3"))), Some(3));
        assert_eq!(pk(&mut errors, "c", None), None);
        assert!(errors.is_empty());

        assert_eq!(pk(&mut errors, "d", Some(json!("abc"))), None);
        assert_eq!(pk(&mut errors, "e", Some(json!(true))), None);
        assert_eq!(pk(&mut errors, "f", Some(json!(null))), None);
        assert_eq!(
            errors.messages("d"),
            ["Incorrect type. Expected pk value, received str."]
        );
        assert_eq!(
            errors.messages("e"),
            ["Incorrect type. Expected pk value, received bool."]
        );
        assert_eq!(errors.messages("f"), [NULL]);
    }

    #[test]
    fn category_reference_has_three_states() {
        let mut errors = FieldErrors::default();
        assert_eq!(pk_ref(&mut errors, "category_id", None), CategoryRef::Unchanged);
        assert_eq!(pk_ref(&mut errors, "category_id", Some(json!(null))), CategoryRef::Clear);
        assert_eq!(pk_ref(&mut errors, "category_id", Some(json!("2"))), CategoryRef::Set(2));
        assert!(errors.is_empty());
        pk_ref(&mut errors, "category_id", Some(json!([1])));
        assert!(errors.contains("category_id"));
    }

    #[test]
    fn text_and_flags_report_wrong_types() {
        let mut errors = FieldErrors::default();
        assert_eq!(text(&mut errors, "title", Some(json!(5))), None);
        assert_eq!(boolean(&mut errors, "is_active", Some(json!("maybe"))), None);
        assert_eq!(boolean(&mut errors, "flag", Some(json!("0"))), Some(false));
        assert_eq!(
            choice_text(&mut errors, "condition", Some(json!(5))).as_deref(),
            Some("5")
        );
        assert_eq!(errors.messages("title"), [NOT_A_STRING]);
        assert_eq!(errors.messages("is_active"), [NOT_A_BOOLEAN]);
        assert!(!errors.contains("flag"));
    }

    #[test]
    fn present_keeps_explicit_null() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "present")]
            field: Option<Value>,
        }
        let absent: Body = serde_json::from_value(json!({})).unwrap();
        let null: Body = serde_json::from_value(json!({ "field": null })).unwrap();
        assert_eq!(absent.field, None);
        assert_eq!(null.field, Some(Value::Null));
    }
}
