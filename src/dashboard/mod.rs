//! Dashboard module
//!
//! Provides the month-scoped views shown on the dashboard: summary statistics,
//! a price-range histogram and a category breakdown.

mod categories;
mod handlers;
mod price_ranges;
mod statistics;

pub use categories::{CategoryCount, count_by_category};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use price_ranges::{PriceRangeCount, count_by_price_range};
pub use statistics::{SaleStatistics, get_sale_statistics};
