//! The price-range histogram of the sales in a month.
//!
//! Each bucket covers `min <= price < max`, and the lower bound of each bucket
//! after the first is one more than the upper bound of the bucket before it.
//! Prices that land in the gap (100, 200, ..., 900 for whole-number prices) are
//! counted in no bucket.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Serialize;

use crate::{Error, month::MonthFilter};

/// A price bucket, `min <= price < max`, or `min <= price` when `max` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriceRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl PriceRange {
    const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// The label shown for the bucket, e.g. "101-200" or "901-above".
    pub(crate) fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{max}", self.min),
            None => format!("{}-above", self.min),
        }
    }
}

/// The ten histogram buckets, in ascending order.
pub(crate) const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange::new(0, Some(100)),
    PriceRange::new(101, Some(200)),
    PriceRange::new(201, Some(300)),
    PriceRange::new(301, Some(400)),
    PriceRange::new(401, Some(500)),
    PriceRange::new(501, Some(600)),
    PriceRange::new(601, Some(700)),
    PriceRange::new(701, Some(800)),
    PriceRange::new(801, Some(900)),
    PriceRange::new(901, None),
];

/// The number of sales in one price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "0-100".
    pub range: String,
    /// The number of sales in the bucket.
    pub count: u64,
}

/// Count the sales matching `month` in each of the ten price buckets.
///
/// Always returns ten entries in ascending price order, including empty buckets.
///
/// # Errors
/// Returns [Error::SqlError] if a query fails.
pub fn count_by_price_range(
    month: MonthFilter,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    PRICE_RANGES
        .iter()
        .map(|range| {
            let mut clause = month.where_clause();
            clause.and("price >= ?", [Value::Real(f64::from(range.min))]);
            if let Some(max) = range.max {
                clause.and("price < ?", [Value::Real(f64::from(max))]);
            }

            let count: i64 = connection.query_row(
                &format!("SELECT COUNT(id) FROM sale_transaction {}", clause.to_sql()),
                params_from_iter(clause.params()),
                |row| row.get(0),
            )?;

            Ok(PriceRangeCount {
                range: range.label(),
                count: count as u64,
            })
        })
        .collect()
}
