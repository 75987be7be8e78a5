use crate::db::store::StoreError;
use crate::domain::SearchError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the request handling
/// (routing, bad input, missing resources) or the store underneath.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Only {allowed} requests are supported")]
    MethodNotAllowed { allowed: &'static str },

    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation {
        message: &'static str,
        details: Vec<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn validation(message: &'static str, details: Vec<String>) -> Self {
        ServerError::Validation { message, details }
    }

    pub fn property_not_found(id: &str) -> Self {
        ServerError::NotFound(format!("Property with ID {id} not found"))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::MethodNotAllowed { .. } => 405,
            ServerError::BadRequest(_) | ServerError::Validation { .. } => 400,
            ServerError::NotFound(_) => 404,
            ServerError::Store(_) | ServerError::InternalError => 500,
        }
    }

    /// Short label sent back in the `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            ServerError::MethodNotAllowed { .. } => "Method not allowed",
            ServerError::BadRequest(_) => "Bad Request",
            ServerError::Validation { .. } => "Validation Error",
            ServerError::NotFound(_) => "Not Found",
            ServerError::Store(_) | ServerError::InternalError => "Internal Server Error",
        }
    }
}

impl From<SearchError> for ServerError {
    fn from(err: SearchError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}
