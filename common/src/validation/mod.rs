//! Turns a raw `CafeSubmission` into a `NewCafe` or a set of field errors.
//!
//! Validation is pure: it never touches storage, and a failed submission
//! reports every offending field at once rather than stopping at the first.

pub mod rules;

use crate::model::cafe::{NewCafe, NAME_MAX_LEN, TEXT_MAX_LEN, URL_MAX_LEN};
use crate::requests::CafeSubmission;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field name → human-readable messages, keyed by `Cafe` field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Names of the offending fields, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates every field of a submission.
///
/// - Text fields must be present and non-blank; values are stored trimmed.
/// - `map_url` and `img_url` must also be well-formed URLs.
/// - Boolean fields follow checkbox semantics (absent means `false`).
/// - Lengths are capped at the column sizes of the `cafe` table.
pub fn validate_submission(submission: &CafeSubmission) -> Result<NewCafe, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = text_field(&mut errors, "name", submission.name.as_deref(), NAME_MAX_LEN);
    let location = text_field(
        &mut errors,
        "location",
        submission.location.as_deref(),
        TEXT_MAX_LEN,
    );
    let map_url = url_field(&mut errors, "map_url", submission.map_url.as_deref());
    let img_url = url_field(&mut errors, "img_url", submission.img_url.as_deref());
    let has_sockets = bool_field(&mut errors, "has_sockets", submission.has_sockets.as_deref());
    let has_toilet = bool_field(&mut errors, "has_toilet", submission.has_toilet.as_deref());
    let has_wifi = bool_field(&mut errors, "has_wifi", submission.has_wifi.as_deref());
    let can_take_calls =
        bool_field(&mut errors, "can_take_calls", submission.can_take_calls.as_deref());
    let seats = text_field(&mut errors, "seats", submission.seats.as_deref(), TEXT_MAX_LEN);
    let coffee_price = text_field(
        &mut errors,
        "coffee_price",
        submission.coffee_price.as_deref(),
        TEXT_MAX_LEN,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewCafe {
        name,
        map_url,
        img_url,
        location,
        seats,
        has_toilet,
        has_wifi,
        has_sockets,
        can_take_calls,
        coffee_price,
    })
}

fn text_field(errors: &mut ValidationErrors, field: &str, raw: Option<&str>, max: usize) -> String {
    let checked = rules::required_text(raw).and_then(|value| {
        rules::max_length(&value, max)?;
        Ok(value)
    });
    match checked {
        Ok(value) => value,
        Err(message) => {
            errors.add(field, message);
            String::new()
        }
    }
}

fn url_field(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> String {
    let checked = rules::required_text(raw).and_then(|value| {
        rules::max_length(&value, URL_MAX_LEN)?;
        rules::url(&value)?;
        Ok(value)
    });
    match checked {
        Ok(value) => value,
        Err(message) => {
            errors.add(field, message);
            String::new()
        }
    }
}

fn bool_field(errors: &mut ValidationErrors, field: &str, raw: Option<&str>) -> bool {
    rules::boolean(raw).unwrap_or_else(|message| {
        errors.add(field, message);
        false
    })
}
