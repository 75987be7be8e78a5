use crate::db::connection::Database;
use crate::db::{MemoryStore, PropertyStore, SqliteStore, StoreError};
use crate::domain::{NewProperty, Property, PropertyPatch};
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh in-memory store for a single test.
pub fn memory_store() -> MemoryStore {
    MemoryStore::new()
}

/// SQLite store on a unique temp file.
pub fn sqlite_store(name: &str) -> SqliteStore {
    let path = std::env::temp_dir().join(format!(
        "router_{name}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    SqliteStore::open(Database::new(path.to_string_lossy().to_string()))
        .unwrap_or_else(|e| panic!("SQLite store initialization failed: {e}"))
}

/// Send a request through the router.
pub fn send(store: &dyn PropertyStore, method: Method, uri: &str, body: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(if body.is_empty() {
            Body::empty()
        } else {
            Body::from(body.to_string())
        })
        .unwrap();

    handle(req, store)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> Value {
    let body = body_string(resp);
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"))
}

/// Create through the API and return the assigned id.
pub fn create(store: &dyn PropertyStore, payload: Value) -> String {
    let resp = send(store, Method::POST, "/properties", &payload.to_string());
    assert_eq!(resp.status(), 201, "create should succeed");
    body_json(resp)["property"]["id"]
        .as_str()
        .expect("created property has an id")
        .to_string()
}

/// A store whose every operation fails, for the 500 path.
pub struct BrokenStore;

impl PropertyStore for BrokenStore {
    fn list(&self) -> Result<Vec<Property>, StoreError> {
        Err(StoreError::Open("disk on fire".into()))
    }

    fn get(&self, _id: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Open("disk on fire".into()))
    }

    fn create(&self, _new: NewProperty) -> Result<Property, StoreError> {
        Err(StoreError::Open("disk on fire".into()))
    }

    fn update(&self, _id: &str, _patch: PropertyPatch) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Open("disk on fire".into()))
    }

    fn delete(&self, _id: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Open("disk on fire".into()))
    }
}
