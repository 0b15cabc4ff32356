//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The upstream snapshot could not be downloaded or decoded as JSON.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch the dataset: {0}")]
    DatasetFetch(String),

    /// The upstream snapshot was valid JSON but not an array of records.
    #[error("invalid data received from the dataset source: expected a JSON array")]
    DatasetNotArray,

    /// A record in the upstream snapshot was missing a field or had a field
    /// of the wrong type.
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord {
        /// The position of the record in the snapshot.
        index: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The HTTP client for downloading the dataset could not be built.
    #[error("could not create the HTTP client: {0}")]
    HttpClientError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::DatasetFetch(value.to_string())
    }
}

impl Error {
    /// Whether the error was caused by the upstream dataset rather than this server.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::DatasetFetch(_) | Error::DatasetNotArray | Error::InvalidRecord { .. }
        )
    }

    /// The HTTP status code to report for this error.
    pub fn status_code(&self) -> StatusCode {
        if self.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Convert the error into a JSON response of the form `{error, message}`.
    ///
    /// `summary` is the short, endpoint specific description shown to the
    /// client, e.g. "Error fetching statistics".
    pub(crate) fn into_api_response(self, summary: &str) -> Response {
        tracing::error!("{summary}: {self}");

        (
            self.status_code(),
            Json(json!({
                "error": summary,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
