use crate::tests::utils::{body_json, create, memory_store, send, BrokenStore};
use crate::db::MemoryStore;
use http::Method;
use serde_json::{json, Value};

fn seeded() -> MemoryStore {
    let store = memory_store();
    create(&store, json!({ "location": "Austin, TX", "status": "Available", "price": 250000 }));
    create(&store, json!({ "location": "Dallas, TX", "status": "sold out", "price": 180000 }));
    create(&store, json!({ "location": "Round Rock (Austin area)", "status": "coming soon", "price": 410000 }));
    create(&store, json!({ "location": "Boston, MA", "status": "available", "price": 900000 }));
    store
}

fn locations(body: &Value) -> Vec<&str> {
    body["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["location"].as_str().unwrap())
        .collect()
}

#[test]
fn search_without_filters_returns_everything() {
    let store = seeded();

    let resp = send(&store, Method::GET, "/properties", "");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(4));
    assert_eq!(body["total"], json!(4));
    assert_eq!(body["filters"], json!({}));
}

#[test]
fn search_location_is_case_insensitive_substring() {
    let store = seeded();

    let body = body_json(send(&store, Method::GET, "/properties?location=austin", ""));
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["total"], json!(4));
    assert_eq!(locations(&body), vec!["Austin, TX", "Round Rock (Austin area)"]);
    assert_eq!(body["filters"], json!({ "location": "austin" }));
}

#[test]
fn search_decodes_status_and_combines_filters() {
    let store = seeded();

    let body = body_json(send(&store, Method::GET, "/properties?status=Sold+Out", ""));
    assert_eq!(locations(&body), vec!["Dallas, TX"]);
    assert_eq!(body["filters"], json!({ "status": "sold out" }));

    let body = body_json(send(
        &store,
        Method::GET,
        "/properties?status=available&minPrice=200000&maxPrice=250000&location=TX",
        "",
    ));
    assert_eq!(locations(&body), vec!["Austin, TX"]);
    assert_eq!(
        body["filters"],
        json!({ "location": "tx", "status": "available", "minPrice": 200000, "maxPrice": 250000 })
    );
}

#[test]
fn search_silently_drops_invalid_values() {
    let store = seeded();

    let body = body_json(send(
        &store,
        Method::GET,
        "/properties?status=pending&minPrice=abc&maxPrice=-5",
        "",
    ));
    assert_eq!(body["count"], json!(4));
    assert_eq!(body["filters"], json!({}));
}

#[test]
fn search_inverted_price_range_is_400() {
    let store = seeded();

    let resp = send(&store, Method::GET, "/properties?minPrice=500000&maxPrice=100", "");
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Bad Request"));
    assert_eq!(body["message"], json!("minPrice cannot be greater than maxPrice"));
}

#[test]
fn search_price_with_trailing_text_uses_leading_number() {
    let store = seeded();

    let resp = send(
        &store,
        Method::GET,
        "/properties?minPrice=250000abc&maxPrice=1%2C000%2C000",
        "",
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["message"],
        json!("minPrice cannot be greater than maxPrice")
    );

    let body = body_json(send(&store, Method::GET, "/properties?maxPrice=250000USD", ""));
    assert_eq!(body["filters"], json!({ "maxPrice": 250000 }));
}

#[test]
fn search_store_failure_is_500() {
    let resp = send(&BrokenStore, Method::GET, "/properties?location=austin", "");
    assert_eq!(resp.status(), 500);
}
