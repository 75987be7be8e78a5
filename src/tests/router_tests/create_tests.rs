use crate::tests::utils::{body_json, memory_store, send, sqlite_store, BrokenStore};
use http::Method;
use serde_json::json;

#[test]
fn create_returns_201_with_canonical_record() {
    let store = memory_store();

    let resp = send(
        &store,
        Method::POST,
        "/properties",
        r#"{"location": "Austin", "status": "Available", "price": 250000, "bedrooms": 3}"#,
    );
    assert_eq!(resp.status(), 201);

    let body = body_json(resp);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Property created successfully"));

    let property = &body["property"];
    assert!(property["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(property["location"], json!("Austin"));
    assert_eq!(property["status"], json!("available"));
    assert_eq!(property["price"], json!(250000));
    assert_eq!(property["bedrooms"], json!(3));
    assert!(property["createdAt"].is_string());
}

#[test]
fn create_ignores_caller_supplied_id() {
    let store = memory_store();

    let resp = send(
        &store,
        Method::POST,
        "/properties",
        r#"{"id": "mine", "location": "Austin", "status": "sold out", "price": 1}"#,
    );
    assert_eq!(resp.status(), 201);
    assert_ne!(body_json(resp)["property"]["id"], json!("mine"));
}

#[test]
fn create_missing_price_is_a_validation_error() {
    let store = memory_store();

    let resp = send(
        &store,
        Method::POST,
        "/properties",
        r#"{"location": "Austin", "status": "available"}"#,
    );
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Validation Error"));
    assert_eq!(body["message"], json!("Invalid property data"));
    assert_eq!(body["details"], json!(["Price is required"]));
}

#[test]
fn create_rejects_unknown_status() {
    let store = memory_store();

    let resp = send(
        &store,
        Method::POST,
        "/properties",
        r#"{"location": "Austin", "status": "pending", "price": 10}"#,
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["details"],
        json!(["Status must be one of: available, sold out, coming soon"])
    );
}

#[test]
fn create_with_empty_body_lists_all_required_fields() {
    let store = memory_store();

    let resp = send(&store, Method::POST, "/properties", "");
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["details"],
        json!(["Location is required", "Status is required", "Price is required"])
    );
}

#[test]
fn create_with_malformed_json_is_bad_request() {
    let store = memory_store();

    let resp = send(&store, Method::POST, "/properties", "{location: Austin");
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(body["error"], json!("Bad Request"));
    assert_eq!(body["message"], json!("Invalid JSON in request body"));
    assert!(body.get("details").is_none());
}

#[test]
fn create_persists_into_sqlite() {
    let store = sqlite_store("create");

    let resp = send(
        &store,
        Method::POST,
        "/properties",
        r#"{"location": "Miami, FL", "status": "Coming Soon", "price": 720000.5}"#,
    );
    assert_eq!(resp.status(), 201);
    let id = body_json(resp)["property"]["id"].as_str().unwrap().to_string();

    let resp = send(&store, Method::GET, &format!("/properties/{id}"), "");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["property"]["status"], json!("coming soon"));
    assert_eq!(body["property"]["price"], json!(720000.5));
}

#[test]
fn store_failure_is_a_generic_500() {
    let resp = send(
        &BrokenStore,
        Method::POST,
        "/properties",
        r#"{"location": "Austin", "status": "available", "price": 1}"#,
    );
    assert_eq!(resp.status(), 500);

    let body = body_json(resp);
    assert_eq!(body["error"], json!("Internal Server Error"));
    assert_eq!(body["message"], json!("An unexpected error occurred"));
    assert!(!body.to_string().contains("disk on fire"));
}
