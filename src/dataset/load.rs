//! Replacing the stored sales with a new load generation.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{NewTransaction, delete_all_transactions, insert_transactions},
};

/// Replace every stored transaction with `records`, returning the number inserted.
///
/// The delete and the inserts run in one SQL transaction, so if any insert
/// fails the previous load generation is kept. IDs are assigned from 1 in the
/// order of `records`.
///
/// # Errors
/// Returns [Error::SqlError] if the delete, an insert or the commit fails.
pub fn replace_transactions(records: &[NewTransaction], connection: &Connection) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    let deleted = delete_all_transactions(&transaction)?;
    tracing::info!("Cleared {deleted} existing transactions");

    let inserted = insert_transactions(records, 1, &transaction)?;

    transaction.commit()?;
    tracing::info!("Inserted {inserted} transactions");

    Ok(inserted)
}
