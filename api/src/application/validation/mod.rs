use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";
pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";

/// Field name -> messages, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

pub fn invalid_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

pub fn does_not_exist(pk: i64) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}

/// Required, non-blank text bounded by `max` characters.
///
/// Like the other validators it yields `None` for a field that already has an
/// error, e.g. one whose JSON value had the wrong type.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    if errors.contains(field) {
        return None;
    }
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(v) => bounded(errors, field, v, max),
    }
}

/// Optional text that may be blank but is still bounded by `max` characters.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<Option<String>> {
    if errors.contains(field) {
        return None;
    }
    match value {
        None => Some(None),
        Some(v) => bounded(errors, field, v, max).map(Some),
    }
}

pub fn choice<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<Option<T>> {
    if errors.contains(field) {
        return None;
    }
    match value {
        None => Some(None),
        Some(v) => match v.parse::<T>() {
            Ok(parsed) => Some(Some(parsed)),
            Err(_) => {
                errors.add(field, invalid_choice(v));
                None
            }
        },
    }
}

pub fn required_id(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i64> {
    if errors.contains(field) {
        return None;
    }
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

/// Postgres text columns cannot hold `\0`.
pub fn free_of_nul(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.contains('\0') {
        errors.add(field, NULL_CHARACTERS);
        false
    } else {
        true
    }
}

fn bounded(errors: &mut FieldErrors, field: &str, value: &str, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if !free_of_nul(errors, field, trimmed) {
        None
    } else if trimmed.chars().count() > max {
        errors.add(field, too_long(max));
        None
    } else {
        Some(trimmed.to_string())
    }
}
