//! Transport errors and the failure-to-response mapping

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use docstore_core::{Error, ErrorKind};
use std::net::SocketAddr;
use tracing::error;

/// Failures starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] Error),
}

/// A store failure on its way to the client
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    /// Status code for the wrapped failure
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::FileNotFound => StatusCode::NOT_FOUND,
            ErrorKind::Parse | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Validation
            | ErrorKind::InvalidKey
            | ErrorKind::FileAlreadyExists
            | ErrorKind::Configuration => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}
