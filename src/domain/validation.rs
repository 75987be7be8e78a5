// src/domain/validation.rs

use crate::domain::property::{Price, PropertyStatus};
use serde_json::{Map, Value};

/// Typed location, status and price of a partial payload that passed
/// validation. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckedFields {
    pub location: Option<String>,
    pub status: Option<PropertyStatus>,
    pub price: Option<Price>,
}

/// Full check (create): location, status and price must all be present.
///
/// On failure returns human-readable messages in field order (location,
/// status, price). A key that is present with a `null` value counts as
/// present and is rejected by its rule.
pub fn check_required(
    payload: &Map<String, Value>,
) -> Result<(String, PropertyStatus, Price), Vec<String>> {
    let location = location(payload).unwrap_or_else(|| Err("Location is required".to_string()));
    let status = status(payload).unwrap_or_else(|| Err("Status is required".to_string()));
    let price = price(payload).unwrap_or_else(|| Err("Price is required".to_string()));

    match (location, status, price) {
        (Ok(location), Ok(status), Ok(price)) => Ok((location, status, price)),
        (location, status, price) => Err(collect_errors([
            location.err(),
            status.err(),
            price.err(),
        ])),
    }
}

/// Partial check (update): only the keys that are present get checked.
pub fn check_fields(payload: &Map<String, Value>) -> Result<CheckedFields, Vec<String>> {
    let location = location(payload).transpose();
    let status = status(payload).transpose();
    let price = price(payload).transpose();

    match (location, status, price) {
        (Ok(location), Ok(status), Ok(price)) => Ok(CheckedFields {
            location,
            status,
            price,
        }),
        (location, status, price) => Err(collect_errors([
            location.err(),
            status.err(),
            price.err(),
        ])),
    }
}

fn collect_errors(errors: [Option<String>; 3]) -> Vec<String> {
    errors.into_iter().flatten().collect()
}

/// `None` when the key is absent; otherwise the parsed value or its rule message.
fn location(payload: &Map<String, Value>) -> Option<Result<String, String>> {
    payload.get("location").map(|value| {
        parse_location(value).ok_or_else(|| "Location must be a non-empty string".to_string())
    })
}

fn status(payload: &Map<String, Value>) -> Option<Result<PropertyStatus, String>> {
    payload.get("status").map(|value| {
        parse_status(value).ok_or_else(|| {
            let allowed: Vec<&str> = PropertyStatus::ALL.iter().map(|s| s.as_str()).collect();
            format!("Status must be one of: {}", allowed.join(", "))
        })
    })
}

fn price(payload: &Map<String, Value>) -> Option<Result<Price, String>> {
    payload.get("price").map(|value| {
        parse_price(value).ok_or_else(|| "Price must be a non-negative number".to_string())
    })
}

/// Stored trimmed.
fn parse_location(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_status(value: &Value) -> Option<PropertyStatus> {
    value.as_str().and_then(PropertyStatus::parse)
}

fn parse_price(value: &Value) -> Option<Price> {
    // serde_json numbers are always finite.
    value.as_f64().and_then(Price::new)
}
