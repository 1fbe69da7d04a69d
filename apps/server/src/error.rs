//! Error types shared by the store, service and API layers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Create was called with an entity that already carries an identifier.
    #[error("Cannot create new {entity} with supplied id {id}. The id attribute must be null to create an entity.")]
    AlreadyExists { entity: &'static str, id: i64 },

    /// Update was called for an identifier the store does not know.
    #[error("Requested {entity} not found (id: {})", display_id(.id))]
    NotFound {
        entity: &'static str,
        id: Option<i64>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn display_id(id: &Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "null".to_string(),
    }
}

impl Error {
    /// HTTP status the API boundary answers with.
    ///
    /// Lifecycle violations are not mapped to 400/404: like infrastructure failures
    /// they surface as a generic server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::AlreadyExists { .. }
            | Error::NotFound { .. }
            | Error::Database(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(error = %self, status = status.as_u16(), "Request failed");

        let body = Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Internal Server Error"),
        }));
        (status, body).into_response()
    }
}
