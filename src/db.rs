//! Database initialisation and helpers for building filtered queries.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, functions::FunctionFlags, types::Value};

use crate::{Error, transaction::create_transaction_table};

/// Create the application tables if they do not already exist and register
/// the SQL functions the queries rely on.
///
/// # Errors
/// Returns an [Error::SqlError] if a function cannot be registered or a table
/// cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register `contains_ci(haystack, needle)`, which is true when `needle` is a
/// substring of `haystack` ignoring case in any script.
fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        "contains_ci",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let haystack: String = context.get(0)?;
            let needle: String = context.get(1)?;

            Ok(contains_ignore_case(&haystack, &needle))
        },
    )
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock has been poisoned.
pub(crate) fn lock_connection(
    db_connection: &Arc<Mutex<Connection>>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// A conjunction of SQL conditions and the positional parameters they bind.
///
/// Conditions use `?` placeholders, and parameters are bound in the order the
/// conditions were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct WhereClause {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl WhereClause {
    /// Add a condition that rows must satisfy.
    pub(crate) fn and(
        &mut self,
        condition: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.conditions.push(condition.into());
        self.params.extend(params);
        self
    }

    /// The `WHERE ...` SQL fragment, or an empty string when unconstrained.
    pub(crate) fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let conditions = self
            .conditions
            .iter()
            .map(|condition| format!("({condition})"))
            .collect::<Vec<_>>()
            .join(" AND ");

        format!("WHERE {conditions}")
    }

    /// The parameters for the placeholders in [WhereClause::to_sql].
    pub(crate) fn params(&self) -> &[Value] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::{Connection, types::Value};

    use super::{WhereClause, contains_ignore_case, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialisation failed");
        initialize(&connection).expect("second initialisation failed");
    }

    #[test]
    fn contains_ci_ignores_case_outside_ascii() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let matches = |haystack: &str, needle: &str| -> bool {
            connection
                .query_row("SELECT contains_ci(?1, ?2)", (haystack, needle), |row| {
                    row.get(0)
                })
                .unwrap()
        };

        assert!(matches("ÉCLAIR Maker", "éclair"));
        assert!(matches("Ελληνικό Λάδι", "ελληνικό"));
        assert!(matches("50% off", "0%"));
        assert!(!matches("500 off", "0%"));
    }

    #[test]
    fn contains_ignore_case_matches_substrings() {
        assert!(contains_ignore_case("Wireless Mouse", "LESS mo"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Mouse", "keyboard"));
    }

    #[test]
    fn empty_clause_renders_nothing() {
        let clause = WhereClause::default();

        assert_eq!(clause.to_sql(), "");
        assert!(clause.params().is_empty());
    }

    #[test]
    fn conditions_are_joined_with_and() {
        let mut clause = WhereClause::default();
        clause
            .and("sale_month = ?", [Value::Integer(3)])
            .and("price >= ? OR price = ?", [Value::Real(1.0), Value::Real(2.0)]);

        assert_eq!(
            clause.to_sql(),
            "WHERE (sale_month = ?) AND (price >= ? OR price = ?)"
        );
        assert_eq!(
            clause.params(),
            &[Value::Integer(3), Value::Real(1.0), Value::Real(2.0)]
        );
    }
}
