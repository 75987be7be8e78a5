// src/handlers/properties.rs
//
// One adapter per operation. Each takes already-bound inputs (path id, raw
// body, decoded query) and returns a JSON response or a `ServerError` that
// the router turns into the shared error shape.

use crate::db::PropertyStore;
use crate::domain::{filter_properties, parse_query, NewProperty, Property, PropertyFilter, PropertyPatch};
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Methods served on `/properties`.
pub const COLLECTION_METHODS: &str = "GET, POST";
/// Methods served on `/properties/{id}`.
pub const ITEM_METHODS: &str = "GET, PUT, DELETE";

#[derive(Serialize)]
struct PropertyEnvelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    property: &'a Property,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletedEnvelope<'a> {
    success: bool,
    message: &'static str,
    deleted_property: &'a Property,
}

#[derive(Serialize)]
struct SearchEnvelope<'a> {
    success: bool,
    count: usize,
    total: usize,
    filters: &'a PropertyFilter,
    properties: &'a [Property],
}

/// POST /properties
pub fn create_property(store: &dyn PropertyStore, body: &[u8]) -> ResultResp {
    let payload = parse_json_object(body)?;
    let new = NewProperty::from_payload(&payload)?;

    let property = store.create(new)?;
    tracing::info!(
        id = %property.id,
        location = %property.location,
        status = %property.status,
        "property created"
    );

    json_response(
        201,
        COLLECTION_METHODS,
        &PropertyEnvelope {
            success: true,
            message: Some("Property created successfully"),
            property: &property,
        },
    )
}

/// GET /properties/{id}
pub fn get_property(store: &dyn PropertyStore, id: &str) -> ResultResp {
    require_id(id)?;

    let property = store
        .get(id)?
        .ok_or_else(|| ServerError::property_not_found(id))?;

    json_response(
        200,
        ITEM_METHODS,
        &PropertyEnvelope {
            success: true,
            message: None,
            property: &property,
        },
    )
}

/// PUT /properties/{id}
pub fn update_property(store: &dyn PropertyStore, id: &str, body: &[u8]) -> ResultResp {
    require_id(id)?;

    let payload = parse_json_object(body)?;
    if payload.is_empty() {
        return Err(ServerError::BadRequest("Update data cannot be empty".into()));
    }
    let patch = PropertyPatch::from_payload(&payload)?;

    let property = store
        .update(id, patch)?
        .ok_or_else(|| ServerError::property_not_found(id))?;
    tracing::info!(id = %property.id, status = %property.status, "property updated");

    json_response(
        200,
        ITEM_METHODS,
        &PropertyEnvelope {
            success: true,
            message: Some("Property updated successfully"),
            property: &property,
        },
    )
}

/// DELETE /properties/{id}
pub fn delete_property(store: &dyn PropertyStore, id: &str) -> ResultResp {
    require_id(id)?;

    let deleted = store
        .delete(id)?
        .ok_or_else(|| ServerError::property_not_found(id))?;
    tracing::info!(id = %deleted.id, "property deleted");

    json_response(
        200,
        ITEM_METHODS,
        &DeletedEnvelope {
            success: true,
            message: "Property deleted successfully",
            deleted_property: &deleted,
        },
    )
}

/// GET /properties?location=&status=&minPrice=&maxPrice=
pub fn search_properties(store: &dyn PropertyStore, query: &HashMap<String, String>) -> ResultResp {
    let filters = parse_query(query)?;

    let all = store.list()?;
    let matches = filter_properties(&all, &filters);
    tracing::debug!(?filters, count = matches.len(), total = all.len(), "property search");

    json_response(
        200,
        COLLECTION_METHODS,
        &SearchEnvelope {
            success: true,
            count: matches.len(),
            total: all.len(),
            filters: &filters,
            properties: &matches,
        },
    )
}

fn require_id(id: &str) -> Result<(), ServerError> {
    if id.is_empty() {
        return Err(ServerError::BadRequest("Property ID is required".into()));
    }
    Ok(())
}

/// An empty body reads as `{}`.
fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, ServerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ServerError::BadRequest(
            "Request body must be a JSON object".into(),
        )),
        Err(e) => {
            tracing::debug!(error = %e, "rejected malformed JSON body");
            Err(ServerError::BadRequest("Invalid JSON in request body".into()))
        }
    }
}
