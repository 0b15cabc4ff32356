//! Defines the core data models and database queries for sale transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// A product sale, as stored in the current load generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned when the transaction was loaded.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A free text description of the product.
    pub description: String,
    /// The sale price, never negative.
    pub price: f64,
    /// A short label for the kind of product, e.g. "electronics".
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the sale happened, normalised to UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URL for the product image.
    pub image: String,
}

/// A sale that has not been stored yet.
///
/// This is the shape of each record in the upstream snapshot. Any other fields
/// in the snapshot, such as an upstream `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The product name.
    pub title: String,
    /// A free text description of the product.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// A short label for the kind of product.
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the sale happened, in any UTC offset.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URL for the product image.
    pub image: String,
}

impl NewTransaction {
    /// The sale date converted to UTC.
    pub fn date_of_sale_utc(&self) -> OffsetDateTime {
        self.date_of_sale.to_offset(UtcOffset::UTC)
    }

    /// The calendar month (1-12) of the sale in UTC.
    pub fn sale_month(&self) -> u8 {
        self.date_of_sale_utc().month().into()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by queries that map rows with [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_transaction (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL,
                image TEXT NOT NULL
                )",
        (),
    )?;

    // Every dashboard query is scoped by month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_month ON sale_transaction(sale_month);",
        (),
    )?;

    Ok(())
}

/// Insert `transactions` with IDs `first_id`, `first_id + 1`, and so on.
///
/// Returns the number of inserted rows.
///
/// # Errors
/// Returns [Error::SqlError] if any insert fails, e.g. because an ID is taken.
pub(crate) fn insert_transactions(
    transactions: &[NewTransaction],
    first_id: TransactionId,
    connection: &Connection,
) -> Result<usize, Error> {
    let mut statement = connection.prepare(
        "INSERT INTO sale_transaction
            (id, title, description, price, category, sold, date_of_sale, sale_month, image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    let mut id = first_id;
    for transaction in transactions {
        let date_of_sale = transaction
            .date_of_sale_utc()
            .format(&Rfc3339)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))?;

        statement.execute((
            id,
            &transaction.title,
            &transaction.description,
            transaction.price,
            &transaction.category,
            transaction.sold,
            date_of_sale,
            transaction.sale_month(),
            &transaction.image,
        ))?;

        id += 1;
    }

    Ok(transactions.len())
}

/// Delete every transaction, returning the number of deleted rows.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub(crate) fn delete_all_transactions(connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM sale_transaction", ())
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM sale_transaction;", [], |row| {
        row.get(0)
    })?;

    Ok(count as u64)
}

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let sold = row.get(5)?;
    let date_of_sale: String = row.get(6)?;
    let image = row.get(7)?;

    let date_of_sale = OffsetDateTime::parse(&date_of_sale, &Rfc3339).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        sold,
        date_of_sale,
        image,
    })
}

// ============================================================================
// TESTS
// ============================================================================
