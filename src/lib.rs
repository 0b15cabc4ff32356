//! A small business-intelligence API over a snapshot of product sales.
//!
//! The library loads a JSON snapshot of sale transactions into SQLite and
//! serves filtered listings plus three month-scoped views (summary statistics,
//! a price-range histogram and a category breakdown) as JSON for a browser
//! dashboard.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod dataset;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod month;
mod not_found;
mod pagination;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    CategoryCount, PriceRangeCount, SaleStatistics, count_by_category, count_by_price_range,
    get_sale_statistics,
};
pub use dataset::{DEFAULT_DATASET_URL, replace_transactions};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::MonthFilter;
pub use pagination::{PageRequest, PaginationConfig};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionFilter, TransactionId, TransactionPage,
    count_transactions, list_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
