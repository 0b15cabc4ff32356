//! Sale transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` records it is loaded from
//! - Database functions for storing, counting and replacing transactions
//! - The filter that turns a month and search term into SQL
//! - The paginated listing query and its route handler

mod core;
mod filter;
mod query;
mod transactions_endpoint;

pub use core::{NewTransaction, Transaction, TransactionId, count_transactions, create_transaction_table};
pub use filter::TransactionFilter;
pub use query::{TransactionPage, list_transactions};
pub use transactions_endpoint::get_transactions_endpoint;

pub(crate) use core::{delete_all_transactions, insert_transactions};
