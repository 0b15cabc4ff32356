//! Translates transaction listing requests into SQL filters.

use rusqlite::types::Value;

use crate::{db::WhereClause, month::MonthFilter};

/// The filter for listing transactions: a month plus an optional free-text search.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Restricts results to a calendar month.
    pub month: MonthFilter,
    /// Text matched against title and description, or a price if numeric.
    ///
    /// `None` and the empty string both mean no search.
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Build a filter from raw `month` and `search` query parameters.
    pub fn from_query(month: Option<&str>, search: Option<&str>) -> Self {
        Self {
            month: MonthFilter::from_query(month),
            search: search.filter(|term| !term.is_empty()).map(str::to_owned),
        }
    }

    /// The SQL conditions and parameters selecting matching transactions.
    pub(crate) fn where_clause(&self) -> WhereClause {
        let mut clause = self.month.where_clause();

        if let Some(term) = self.search.as_deref().filter(|term| !term.is_empty()) {
            apply_search(term, &mut clause);
        }

        clause
    }
}

/// Match `term` as a case-insensitive substring of the title or description,
/// or as an exact price when it parses as a finite number.
///
/// The term is matched literally, so `%` and `_` have no special meaning.
fn apply_search(term: &str, clause: &mut WhereClause) {
    let needle = Value::Text(term.to_owned());
    let mut condition = "contains_ci(title, ?) OR contains_ci(description, ?)".to_owned();
    let mut params = vec![needle.clone(), needle];

    if let Some(price) = parse_price(term) {
        condition.push_str(" OR price = ?");
        params.push(Value::Real(price));
    }

    clause.and(condition, params);
}

fn parse_price(term: &str) -> Option<f64> {
    term.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::{TransactionFilter, parse_price};
    use crate::month::MonthFilter;

    #[test]
    fn empty_request_has_no_conditions() {
        let filter = TransactionFilter::from_query(None, Some(""));

        assert_eq!(filter.month, MonthFilter::Any);
        assert_eq!(filter.search, None);
        assert_eq!(filter.where_clause().to_sql(), "");
    }

    #[test]
    fn text_search_matches_title_and_description_only() {
        let filter = TransactionFilter::from_query(None, Some("phone"));

        let clause = filter.where_clause();

        assert_eq!(
            clause.to_sql(),
            "WHERE (contains_ci(title, ?) OR contains_ci(description, ?))"
        );
        assert_eq!(
            clause.params(),
            &[
                Value::Text("phone".to_owned()),
                Value::Text("phone".to_owned())
            ]
        );
    }

    #[test]
    fn numeric_search_also_matches_price() {
        let filter = TransactionFilter::from_query(Some("5"), Some("150"));

        let clause = filter.where_clause();

        assert_eq!(
            clause.to_sql(),
            "WHERE (sale_month = ?) AND \
            (contains_ci(title, ?) OR contains_ci(description, ?) OR price = ?)"
        );
        assert_eq!(clause.params()[0], Value::Integer(5));
        assert_eq!(clause.params()[3], Value::Real(150.0));
    }

    #[test]
    fn non_finite_numbers_are_not_prices() {
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price("-infinity"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(" 99.5 "), Some(99.5));
    }

    #[test]
    fn search_term_is_bound_verbatim() {
        let filter = TransactionFilter::from_query(None, Some("50%_off"));

        let clause = filter.where_clause();

        assert_eq!(clause.params()[0], Value::Text("50%_off".to_owned()));
    }
}
