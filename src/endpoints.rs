//! The API endpoints URIs.
//!
//! For endpoints that take a month, e.g., '/api/statistics/{month}', use [format_endpoint].

/// The route that reloads the database from the sales snapshot.
pub const INITIALIZE_DATABASE: &str = "/api/initialize-database";
/// The route for the filtered, paged transaction listing.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a month's sale totals.
pub const STATISTICS: &str = "/api/statistics/{month}";
/// The route for a month's price-range histogram.
pub const BAR_CHART: &str = "/api/bar-chart/{month}";
/// The route for a month's category breakdown.
pub const PIE_CHART: &str = "/api/pie-chart/{month}";
/// The route for all three month views in one response.
pub const COMBINED_DATA: &str = "/api/combined-data/{month}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{month}' in '/api/statistics/{month}'. Only the first parameter is
/// replaced. If there is no parameter, `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{}{}", &endpoint_path[..start], value, &endpoint_path[end..])
}
