//! Database queries for listing transactions a page at a time.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Serialize;

use crate::{Error, pagination::PageRequest};

use super::{
    core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row},
    filter::TransactionFilter,
};

/// One page of the transactions matching a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on this page, ordered by ID.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the filter across all pages.
    pub total: u64,
    /// The 1-indexed page number.
    pub page: u64,
    /// The number of pages needed to show all matching transactions.
    pub total_pages: u64,
}

/// Get the page of transactions matching `filter`.
///
/// Requesting a page past the end returns no transactions along with the
/// same `total` and `total_pages` as any other page.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn list_transactions(
    filter: &TransactionFilter,
    page: PageRequest,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let clause = filter.where_clause();
    let where_sql = clause.to_sql();

    let total: i64 = connection.query_row(
        &format!("SELECT COUNT(id) FROM sale_transaction {where_sql}"),
        params_from_iter(clause.params()),
        |row| row.get(0),
    )?;
    let total = total as u64;

    let mut params = clause.params().to_vec();
    params.push(Value::Integer(to_sql_integer(page.per_page())));
    params.push(Value::Integer(to_sql_integer(page.offset())));

    // Order by ID to keep pages stable across requests.
    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction {where_sql} \
            ORDER BY id ASC LIMIT ? OFFSET ?"
        ))?
        .query_map(params_from_iter(params), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?;

    Ok(TransactionPage {
        transactions,
        total,
        page: page.page(),
        total_pages: page.page_count(total),
    })
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
