//! Defines the route handler that reloads the database from the upstream snapshot.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use reqwest::Client;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

use crate::{AppState, Error, db::lock_connection};

use super::{fetch::fetch_snapshot, load::replace_transactions};

/// The state needed to reload the database.
#[derive(Debug, Clone)]
pub struct DatasetState {
    /// The database connection to load transactions into.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the snapshot.
    pub http_client: Client,
    /// Where to download the snapshot from.
    pub dataset_url: String,
}

impl FromRef<AppState> for DatasetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            dataset_url: state.dataset_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResponse {
    success: bool,
    message: &'static str,
    record_count: usize,
}

/// Download the snapshot and replace every stored transaction with it.
///
/// The snapshot is downloaded and validated before the database is touched,
/// so a failed download never removes the current data.
pub async fn initialize_database_endpoint(State(state): State<DatasetState>) -> Response {
    tracing::info!("Starting database initialization");

    let records = match fetch_snapshot(&state.http_client, &state.dataset_url).await {
        Ok(records) => records,
        Err(error) => return initialize_failed_response(error),
    };

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| replace_transactions(&records, &connection));

    match result {
        Ok(record_count) => {
            tracing::info!("Database initialization completed successfully");
            Json(InitializeResponse {
                success: true,
                message: "Database initialized successfully",
                record_count,
            })
            .into_response()
        }
        Err(error) => initialize_failed_response(error),
    }
}

fn initialize_failed_response(error: Error) -> Response {
    tracing::error!("Error during database initialization: {error}");

    (
        error.status_code(),
        Json(json!({
            "success": false,
            "error": "Error initializing database",
            "message": error.to_string(),
        })),
    )
        .into_response()
}
