//! Dashboard HTTP handlers.
//!
//! Each handler parses the month from the URL path and returns one of the
//! month-scoped views as JSON. Malformed months produce empty views, never
//! an error.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{AppState, Error, db::lock_connection, month::MonthFilter};

use super::{
    categories::{CategoryCount, count_by_category},
    price_ranges::{PriceRangeCount, count_by_price_range},
    statistics::{SaleStatistics, get_sale_statistics},
};

/// The state needed for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// All three dashboard views for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    statistics: SaleStatistics,
    bar_chart: Vec<PriceRangeCount>,
    pie_chart: Vec<CategoryCount>,
}

/// Run `query` for `month` against the shared connection and render the result as JSON.
fn respond_with<T, F>(state: &DashboardState, month: &str, error_summary: &str, query: F) -> Response
where
    T: Serialize,
    F: FnOnce(MonthFilter, &Connection) -> Result<T, Error>,
{
    let month = MonthFilter::from_path(month);

    let result =
        lock_connection(&state.db_connection).and_then(|connection| query(month, &*connection));

    match result {
        Ok(data) => Json(data).into_response(),
        Err(error) => error.into_api_response(error_summary),
    }
}

/// Get the sale totals for a month.
pub async fn get_statistics_endpoint(
    State(state): State<DashboardState>,
    Path(month): Path<String>,
) -> Response {
    respond_with(&state, &month, "Error fetching statistics", get_sale_statistics)
}

/// Get the price-range histogram for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<DashboardState>,
    Path(month): Path<String>,
) -> Response {
    respond_with(&state, &month, "Error fetching bar chart data", count_by_price_range)
}

/// Get the category breakdown for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<DashboardState>,
    Path(month): Path<String>,
) -> Response {
    respond_with(&state, &month, "Error fetching pie chart data", count_by_category)
}

/// Get the statistics, bar chart and pie chart for a month in one response.
///
/// The three views are read under a single lock, so they always describe the
/// same load generation.
pub async fn get_combined_data_endpoint(
    State(state): State<DashboardState>,
    Path(month): Path<String>,
) -> Response {
    respond_with(
        &state,
        &month,
        "Error fetching combined data",
        |month, connection| {
            Ok(CombinedData {
                statistics: get_sale_statistics(month, connection)?,
                bar_chart: count_by_price_range(month, connection)?,
                pie_chart: count_by_category(month, connection)?,
            })
        },
    )
}
