//! Album payload validation
//!
//! Payloads arrive as loosely typed JSON. Validation walks the fields in a
//! fixed order and reports the first violated constraint as an
//! `Invariant` error, so the message a client sees is deterministic.

use crate::error::{MelodiaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Earliest accepted release year
pub const MIN_YEAR: i64 = 1900;

/// Latest accepted release year
pub const MAX_YEAR: i64 = 2022;

const KNOWN_FIELDS: &[&str] = &["name", "year", "coverUrl"];

/// A validated album payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPayload {
    pub name: String,
    pub year: i32,
    pub cover_url: Option<String>,
}

/// Validator for album create/update payloads
pub struct AlbumPayloadValidator;

impl AlbumPayloadValidator {
    /// Validate a candidate payload
    ///
    /// `name` must be a non-empty string, `year` an integer in
    /// `[MIN_YEAR, MAX_YEAR]` (numeric strings are accepted), and `coverUrl`,
    /// when present, a string. Unknown fields are rejected.
    pub fn validate(payload: &Value) -> Result<AlbumPayload> {
        let object = payload
            .as_object()
            .ok_or_else(|| MelodiaError::invariant("\"value\" must be of type object"))?;

        let name = validate_name(object)?;
        let year = validate_year(object)?;
        let cover_url = validate_cover_url(object)?;

        if let Some(unknown) = object.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
            return Err(MelodiaError::invariant(format!(
                "\"{}\" is not allowed",
                unknown
            )));
        }

        Ok(AlbumPayload {
            name,
            year,
            cover_url,
        })
    }
}

fn validate_name(object: &Map<String, Value>) -> Result<String> {
    match object.get("name") {
        None => Err(MelodiaError::invariant("\"name\" is required")),
        Some(Value::String(name)) if name.is_empty() => Err(MelodiaError::invariant(
            "\"name\" is not allowed to be empty",
        )),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(_) => Err(MelodiaError::invariant("\"name\" must be a string")),
    }
}

fn validate_year(object: &Map<String, Value>) -> Result<i32> {
    let value = object
        .get("year")
        .ok_or_else(|| MelodiaError::invariant("\"year\" is required"))?;

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
    .ok_or_else(|| MelodiaError::invariant("\"year\" must be a number"))?;

    if number.fract() != 0.0 {
        return Err(MelodiaError::invariant("\"year\" must be an integer"));
    }
    if number < MIN_YEAR as f64 {
        return Err(MelodiaError::invariant(format!(
            "\"year\" must be greater than or equal to {}",
            MIN_YEAR
        )));
    }
    if number > MAX_YEAR as f64 {
        return Err(MelodiaError::invariant(format!(
            "\"year\" must be less than or equal to {}",
            MAX_YEAR
        )));
    }

    // Bounded by MIN_YEAR..=MAX_YEAR above
    Ok(number as i32)
}

fn validate_cover_url(object: &Map<String, Value>) -> Result<Option<String>> {
    match object.get("coverUrl") {
        None => Ok(None),
        Some(Value::String(url)) if url.is_empty() => Err(MelodiaError::invariant(
            "\"coverUrl\" is not allowed to be empty",
        )),
        Some(Value::String(url)) => Ok(Some(url.clone())),
        Some(_) => Err(MelodiaError::invariant("\"coverUrl\" must be a string")),
    }
}
