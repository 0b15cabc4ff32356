//! Loading the sales snapshot into the database.
//!
//! A load downloads the whole snapshot, validates every record and only then
//! swaps it in for the previous load generation.

mod fetch;
mod initialize_endpoint;
mod load;

pub use fetch::DEFAULT_DATASET_URL;
pub use initialize_endpoint::initialize_database_endpoint;
pub use load::replace_transactions;
