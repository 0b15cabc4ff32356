//! Summary statistics of the sales in a month.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;

use crate::{Error, month::MonthFilter};

/// Sales totals for a month.
///
/// `total_sale_amount` is summed over every sale in the month, sold or not,
/// while the item counts split the same sales by whether they were sold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of all sales in the month.
    pub total_sale_amount: f64,
    /// The number of sales that were sold.
    pub total_sold_items: u64,
    /// The number of sales that were not sold.
    pub total_not_sold_items: u64,
}

/// Compute the [SaleStatistics] for the sales matching `month`.
///
/// Months with no sales report zero for every field.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_sale_statistics(month: MonthFilter, connection: &Connection) -> Result<SaleStatistics, Error> {
    let clause = month.where_clause();

    let (total_sale_amount, total_sold_items, total_not_sold_items): (f64, i64, i64) = connection
        .query_row(
            &format!(
                "SELECT
                    COALESCE(SUM(price), 0.0),
                    COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
                FROM sale_transaction {}",
                clause.to_sql()
            ),
            params_from_iter(clause.params()),
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

    Ok(SaleStatistics {
        total_sale_amount,
        total_sold_items: total_sold_items as u64,
        total_not_sold_items: total_not_sold_items as u64,
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{SaleStatistics, get_sale_statistics};
    use crate::{
        month::MonthFilter,
        pagination::PageRequest,
        test_utils::{get_test_connection, new_sale, seed},
        transaction::{TransactionFilter, list_transactions},
    };

    #[test]
    fn sums_all_prices_and_splits_counts_by_sold() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![
                new_sale("A", 50.0, true, "electronics", datetime!(2022-05-01 10:00 UTC)),
                new_sale("B", 150.0, false, "electronics", datetime!(2021-05-15 10:00 UTC)),
                new_sale("C", 999.0, true, "jewelery", datetime!(2022-05-31 10:00 UTC)),
                new_sale("D", 20.0, true, "jewelery", datetime!(2022-06-01 10:00 UTC)),
            ],
        );

        let got = get_sale_statistics(MonthFilter::Month(5), &conn).unwrap();

        assert_eq!(
            got,
            SaleStatistics {
                total_sale_amount: 1199.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn empty_month_is_all_zero() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![new_sale("A", 50.0, true, "electronics", datetime!(2022-05-01 10:00 UTC))],
        );

        for month in [MonthFilter::Month(7), MonthFilter::Month(0), MonthFilter::Month(13), MonthFilter::Unparseable] {
            let got = get_sale_statistics(month, &conn).unwrap();

            assert_eq!(
                got,
                SaleStatistics {
                    total_sale_amount: 0.0,
                    total_sold_items: 0,
                    total_not_sold_items: 0,
                },
                "{month:?}"
            );
        }
    }

    #[test]
    fn sold_and_unsold_counts_partition_the_month() {
        let conn = get_test_connection();
        seed(
            &conn,
            (1..=28)
                .map(|day| {
                    new_sale(
                        "Item",
                        f64::from(day),
                        day % 3 == 0,
                        "misc",
                        datetime!(2021-02-01 08:00 UTC).replace_day(day as u8).unwrap(),
                    )
                })
                .collect(),
        );

        for month in 1..=12 {
            let statistics = get_sale_statistics(MonthFilter::Month(month), &conn).unwrap();
            let listing = list_transactions(
                &TransactionFilter {
                    month: MonthFilter::Month(month),
                    search: None,
                },
                PageRequest::new(1, 1),
                &conn,
            )
            .unwrap();

            assert_eq!(
                statistics.total_sold_items + statistics.total_not_sold_items,
                listing.total,
                "month {month}"
            );
        }
    }
}
