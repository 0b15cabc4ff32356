//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use reqwest::Client;
use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// How long a snapshot download may take before it is abandoned.
const DATASET_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how listings are paged.
    pub pagination_config: PaginationConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The client used to download the sales snapshot.
    pub http_client: Client,

    /// Where the sales snapshot is downloaded from.
    pub dataset_url: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the HTTP
    /// client cannot be created.
    pub fn new(
        db_connection: Connection,
        dataset_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let http_client = Client::builder()
            .timeout(DATASET_REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::HttpClientError(error.to_string()))?;

        Ok(Self {
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
            http_client,
            dataset_url: dataset_url.to_owned(),
        })
    }
}
