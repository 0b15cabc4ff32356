//! Defines the route handler for listing transactions as JSON.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    db::lock_connection,
    pagination::{PageRequest, PaginationConfig},
};

use super::{filter::TransactionFilter, query::list_transactions};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls the default page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query parameters for the transactions endpoint.
///
/// Every field is kept as a string so malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    month: Option<String>,
    search: Option<String>,
    page: Option<String>,
    #[serde(rename = "perPage")]
    per_page: Option<String>,
}

/// List the transactions matching a month and search term, one page at a time.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let filter = TransactionFilter::from_query(query.month.as_deref(), query.search.as_deref());
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    );

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| list_transactions(&filter, page, &connection));

    match result {
        Ok(page) => Json(page).into_response(),
        Err(error) => error.into_api_response("Error fetching transactions"),
    }
}
