use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level failures of the HTTP API
///
/// Adapter failures are not errors here: they are reported on the chain
/// card and the request still succeeds.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let status = match self {
            WalletError::UnknownChain(_) => StatusCode::NOT_FOUND,
            WalletError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
