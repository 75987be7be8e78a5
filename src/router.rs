use crate::db::PropertyStore;
use crate::errors::ServerError;
use crate::handlers::{self, COLLECTION_METHODS, ITEM_METHODS};
use crate::responses::{error_to_response, preflight_response, ResultResp};
use astra::{Request, Response};
use std::collections::HashMap;
use std::io::Read;
use std::time::Instant;

/// Where a path lands, with its path parameter already bound.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/properties`
    Collection,
    /// `/properties/{id}`; the id may be empty for `/properties/`.
    Item(&'a str),
    Unknown,
}

impl Route<'_> {
    fn methods(&self) -> &'static str {
        match self {
            Route::Collection => COLLECTION_METHODS,
            Route::Item(_) => ITEM_METHODS,
            // Nothing but the always-added OPTIONS.
            Route::Unknown => "",
        }
    }
}

pub fn resolve(path: &str) -> Route<'_> {
    match path.strip_prefix("/properties") {
        Some("") => Route::Collection,
        Some(rest) => match rest.strip_prefix('/') {
            Some(id) if !id.contains('/') => Route::Item(id),
            _ => Route::Unknown,
        },
        None => Route::Unknown,
    }
}

/// Entry point for every request. Never fails: errors become JSON responses.
pub fn handle(req: Request, store: &dyn PropertyStore) -> Response {
    let started = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    let route = resolve(&path);
    let methods = route.methods();

    let response = match dispatch(req, &method, &route, store) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err, methods),
    };

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );

    response
}

fn dispatch(req: Request, method: &str, route: &Route<'_>, store: &dyn PropertyStore) -> ResultResp {
    match (method, route) {
        (_, Route::Unknown) => Err(ServerError::NotFound("Route not found".into())),

        ("OPTIONS", route) => preflight_response(route.methods()),

        ("GET", Route::Collection) => handlers::search_properties(store, &parse_query(&req)),
        ("POST", Route::Collection) => handlers::create_property(store, &read_body(req)?),

        ("GET", Route::Item(id)) => handlers::get_property(store, id),
        ("PUT", Route::Item(id)) => handlers::update_property(store, id, &read_body(req)?),
        ("DELETE", Route::Item(id)) => handlers::delete_property(store, id),

        (_, route) => Err(ServerError::MethodNotAllowed {
            allowed: route.methods(),
        }),
    }
}

/// Decoded query parameters; for a repeated key the last value wins.
fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;
    Ok(buf)
}
