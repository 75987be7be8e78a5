// src/domain/property.rs

use crate::domain::validation::{check_fields, check_required};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Keys a caller can never set directly; the store owns them.
pub const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Keys with their own typed field on [`Property`].
const TRACKED_KEYS: [&str; 3] = ["location", "status", "price"];

/// Listing lifecycle status. Parsed case-insensitively, always stored lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "sold out")]
    SoldOut,
    #[serde(rename = "coming soon")]
    ComingSoon,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 3] = [
        PropertyStatus::Available,
        PropertyStatus::SoldOut,
        PropertyStatus::ComingSoon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::SoldOut => "sold out",
            PropertyStatus::ComingSoon => "coming soon",
        }
    }

    /// Trim + lowercase, then match against the known statuses.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == wanted)
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative, finite price.
///
/// Integral values serialize as JSON integers so `250000` goes back out
/// as `250000`, not `250000.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    // Largest integer an f64 holds exactly.
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Price(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0 <= Self::MAX_EXACT_INT {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Price::new(raw).ok_or_else(|| serde::de::Error::custom("price must be a non-negative number"))
    }
}

/// A stored listing.
///
/// Descriptive fields beyond location/status/price are kept verbatim in
/// `details` and flattened back into the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub location: String,
    pub status: PropertyStatus,
    pub price: Price,
    #[serde(flatten)]
    pub details: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create payload, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub location: String,
    pub status: PropertyStatus,
    pub price: Price,
    pub details: Map<String, Value>,
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub location: Option<String>,
    pub status: Option<PropertyStatus>,
    pub price: Option<Price>,
    pub details: Map<String, Value>,
}

impl NewProperty {
    /// Runs full validation and extracts the typed fields in the same pass.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ServerError> {
        let (location, status, price) = check_required(payload)
            .map_err(|errors| ServerError::validation("Invalid property data", errors))?;

        Ok(NewProperty {
            location,
            status,
            price,
            details: descriptive_fields(payload),
        })
    }
}

impl PropertyPatch {
    /// Runs partial validation; only the supplied fields end up in the patch.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ServerError> {
        let fields = check_fields(payload)
            .map_err(|errors| ServerError::validation("Invalid update data", errors))?;

        Ok(PropertyPatch {
            location: fields.location,
            status: fields.status,
            price: fields.price,
            details: descriptive_fields(payload),
        })
    }
}

impl Property {
    pub fn new(id: String, new: NewProperty, now: DateTime<Utc>) -> Self {
        Property {
            id,
            location: new.location,
            status: new.status,
            price: new.price,
            details: new.details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies only the supplied fields; `id` and `created_at` never change.
    pub fn apply(&mut self, patch: PropertyPatch, now: DateTime<Utc>) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.details.extend(patch.details);
        self.updated_at = now;
    }
}

fn descriptive_fields(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()) && !TRACKED_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
