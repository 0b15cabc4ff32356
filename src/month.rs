//! Month-only date filtering.
//!
//! Sales are filtered by the calendar month of their sale date, irrespective of
//! year. Malformed month values never raise an error; they produce a filter that
//! matches no sales.

use rusqlite::types::Value;

use crate::db::WhereClause;

/// Which sales to include based on the month they were sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Include sales from every month.
    Any,
    /// Include sales whose month number equals this value.
    ///
    /// Values outside 1-12 are kept as-is and simply match nothing.
    Month(i64),
    /// The requested month could not be parsed, match nothing.
    Unparseable,
}

impl MonthFilter {
    /// Parse an optional month query parameter.
    ///
    /// A missing or empty value means no month constraint.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => MonthFilter::Any,
            Some(value) => parse_month_number(value),
        }
    }

    /// Parse a month taken from a URL path segment.
    ///
    /// Unlike [MonthFilter::from_query], an empty value matches nothing because
    /// a month is always required by the path.
    pub fn from_path(raw: &str) -> Self {
        parse_month_number(raw.trim())
    }

    /// Add this filter's condition to `clause`.
    pub(crate) fn apply(&self, clause: &mut WhereClause) {
        match self {
            MonthFilter::Any => {}
            MonthFilter::Month(month) => {
                clause.and("sale_month = ?", [Value::Integer(*month)]);
            }
            MonthFilter::Unparseable => {
                clause.and("0", std::iter::empty::<Value>());
            }
        }
    }

    /// A where clause containing only this month filter.
    pub(crate) fn where_clause(&self) -> WhereClause {
        let mut clause = WhereClause::default();
        self.apply(&mut clause);
        clause
    }
}

/// Parse the leading integer of `value`, ignoring anything after the digits,
/// so "5abc" and "5.0" both mean May.
fn parse_month_number(value: &str) -> MonthFilter {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let digit_count = unsigned
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let sign_length = value.len() - unsigned.len();

    value[..sign_length + digit_count]
        .parse::<i64>()
        .map(MonthFilter::Month)
        .unwrap_or(MonthFilter::Unparseable)
}
