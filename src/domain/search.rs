// src/domain/search.rs

use crate::domain::property::{Price, Property, PropertyStatus};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Typed search criteria. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Lower-cased substring to look for in the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,
}

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("minPrice cannot be greater than maxPrice")]
    InvalidPriceRange,
}

/// Builds a filter from decoded query parameters.
///
/// Malformed individual values (unknown status, unparsable or negative
/// price) are dropped without complaint. An inverted price range is the
/// only hard failure.
pub fn parse_query(params: &HashMap<String, String>) -> Result<PropertyFilter, SearchError> {
    let param = |key: &str| {
        params
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    let filter = PropertyFilter {
        location: param("location").map(str::to_lowercase),
        status: param("status").and_then(PropertyStatus::parse),
        min_price: param("minPrice").and_then(parse_price),
        max_price: param("maxPrice").and_then(parse_price),
    };

    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
        if min > max {
            return Err(SearchError::InvalidPriceRange);
        }
    }

    Ok(filter)
}

/// Reads the longest numeric prefix, so `"250000abc"` is 250000 and
/// `"1,000,000"` is 1. No digits at all means no price.
fn parse_price(raw: &str) -> Option<Price> {
    let bytes = raw.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return None;
    }

    // An exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    raw[..end].parse::<f64>().ok().and_then(Price::new)
}

impl PropertyFilter {
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(location) = &self.location {
            if !property.location.to_lowercase().contains(location.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        true
    }
}

/// Returns the properties matching every present criterion, in input order.
pub fn filter_properties(properties: &[Property], filter: &PropertyFilter) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}
