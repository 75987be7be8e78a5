use crate::errors::ServerError;
use crate::responses::json::cors_builder;
use astra::{Body, Response};
use serde::Serialize;

pub use crate::errors::ResultResp;

/// Wire shape of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub error: &'a str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a [String]>,
}

/// Convert a ServerError into a JSON response.
///
/// 5xx details are logged here and replaced with a generic message.
pub fn error_to_response(err: ServerError, methods: &str) -> Response {
    let status = err.status_code();

    let message = match &err {
        ServerError::Store(_) | ServerError::InternalError => {
            tracing::error!(error = %err, "internal error while handling request");
            "An unexpected error occurred".to_string()
        }
        other => other.to_string(),
    };

    let details = match &err {
        ServerError::Validation { details, .. } => Some(details.as_slice()),
        _ => None,
    };

    let body = ErrorBody {
        success: false,
        error: err.label(),
        message,
        details,
    };

    let mut builder = cors_builder(status, methods);
    if let ServerError::MethodNotAllowed { allowed } = &err {
        builder = builder.header("Allow", format!("{allowed}, OPTIONS"));
    }

    // Only strings in here.
    let json = serde_json::to_vec(&body).unwrap_or_else(|_| b"{\"success\":false}".to_vec());

    builder
        .body(Body::from(json))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
