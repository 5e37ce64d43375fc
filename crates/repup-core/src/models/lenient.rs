// ABOUTME: Serde helpers accepting numbers, numeric strings and loose dates
// ABOUTME: HTML form inputs arrive as strings even when the field is numeric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::{DateTime, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Deserialize an `f64` from a JSON number or a numeric string
///
/// # Errors
///
/// Returns an error if the value is not numeric or not finite
pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got \"{text}\"")))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(D::Error::custom("expected a finite number"))
    }
}

/// Deserialize a whole non-negative `u32` from a JSON number or a numeric string
///
/// # Errors
///
/// Returns an error if the value is fractional, negative or too large
pub fn u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64(deserializer)?;
    if value.fract().abs() > f64::EPSILON || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "expected a whole non-negative number, got {value}"
        )));
    }
    Ok(value as u32)
}

/// Deserialize optional free text, mapping blank strings to `None`
///
/// # Errors
///
/// Returns an error if the value is neither a string nor null
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.and_then(|t| {
        let trimmed = t.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }))
}

/// Deserialize an optional calendar date from `YYYY-MM-DD` or RFC 3339
///
/// Blank strings and null map to `None`.
///
/// # Errors
///
/// Returns an error if the string is in neither format
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| D::Error::custom(format!("invalid date \"{text}\", expected YYYY-MM-DD")))
}
