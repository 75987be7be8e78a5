// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// CORS headers for a route answering `methods` (OPTIONS is always added).
fn cors_headers(methods: &str) -> [(&'static str, String); 4] {
    let allowed = if methods.is_empty() {
        "OPTIONS".to_string()
    } else {
        format!("{methods}, OPTIONS")
    };
    [
        ("Access-Control-Allow-Origin", "*".to_string()),
        ("Access-Control-Allow-Headers", "Content-Type".to_string()),
        ("Access-Control-Allow-Methods", allowed),
        ("Content-Type", mime::APPLICATION_JSON.to_string()),
    ]
}

/// Response builder with status and CORS headers already set.
pub fn cors_builder(status: u16, methods: &str) -> ResponseBuilder {
    cors_headers(methods)
        .into_iter()
        .fold(ResponseBuilder::new().status(status), |b, (name, value)| {
            b.header(name, value)
        })
}

/// Serialize `payload` as the JSON body of a `status` response.
pub fn json_response<T: Serialize>(status: u16, methods: &str, payload: &T) -> ResultResp {
    let body = serde_json::to_vec(payload).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize response body");
        ServerError::InternalError
    })?;

    cors_builder(status, methods)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// Preflight answer: 200, CORS headers, empty body.
pub fn preflight_response(methods: &str) -> ResultResp {
    cors_builder(200, methods)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
