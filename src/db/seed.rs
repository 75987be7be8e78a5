// src/db/seed.rs
use crate::db::store::PropertyStore;
use crate::domain::NewProperty;
use crate::errors::ServerError;
use serde_json::{Map, Value};

const SAMPLE_PROPERTIES: &str = include_str!("../../data/sample_properties.json");

/// Fills an empty store with the bundled demo listings.
///
/// Returns how many listings were inserted; a store that already holds
/// data is left alone.
pub fn seed_sample_properties(store: &dyn PropertyStore) -> Result<usize, ServerError> {
    if store.count()? > 0 {
        return Ok(0);
    }

    let payloads: Vec<Map<String, Value>> = serde_json::from_str(SAMPLE_PROPERTIES)
        .map_err(crate::db::store::StoreError::from)?;

    for payload in &payloads {
        store.create(NewProperty::from_payload(payload)?)?;
    }

    tracing::info!(count = payloads.len(), "seeded sample properties");
    Ok(payloads.len())
}
