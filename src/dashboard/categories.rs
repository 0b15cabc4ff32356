//! The category breakdown of the sales in a month.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;

use crate::{Error, month::MonthFilter};

/// The number of sales in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// The number of sales in the category.
    pub count: u64,
}

/// Count the sales matching `month` in each category that has any.
///
/// Categories without sales in the month are omitted. The result is sorted by
/// category name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_by_category(month: MonthFilter, connection: &Connection) -> Result<Vec<CategoryCount>, Error> {
    let clause = month.where_clause();

    connection
        .prepare(&format!(
            "SELECT category, COUNT(id) FROM sale_transaction {} \
            GROUP BY category ORDER BY category ASC",
            clause.to_sql()
        ))?
        .query_map(params_from_iter(clause.params()), |row| {
            let count: i64 = row.get(1)?;

            Ok(CategoryCount {
                category: row.get(0)?,
                count: count as u64,
            })
        })?
        .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
