//! Downloading and validating the upstream sales snapshot.

use reqwest::Client;
use serde_json::Value;

use crate::{Error, transaction::NewTransaction};

/// Where the product transaction snapshot is published.
pub const DEFAULT_DATASET_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Download the snapshot at `url` and parse every record in it.
///
/// # Errors
/// Returns:
/// - [Error::DatasetFetch] if the request fails, the server responds with an
///   error status or the body is not JSON,
/// - [Error::DatasetNotArray] if the body is not a JSON array,
/// - or [Error::InvalidRecord] if any record is malformed.
pub(crate) async fn fetch_snapshot(client: &Client, url: &str) -> Result<Vec<NewTransaction>, Error> {
    tracing::info!("Fetching dataset from {url}");

    let payload: Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let records = parse_snapshot(payload)?;
    tracing::info!("Received {} records from {url}", records.len());

    Ok(records)
}

/// Parse a snapshot payload into records, rejecting the whole payload if any
/// record is malformed or has a negative price.
pub(crate) fn parse_snapshot(payload: Value) -> Result<Vec<NewTransaction>, Error> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            tracing::error!("Invalid data received from dataset source: {other}");
            return Err(Error::DatasetNotArray);
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: NewTransaction =
                serde_json::from_value(item).map_err(|error| Error::InvalidRecord {
                    index,
                    reason: error.to_string(),
                })?;

            if record.price < 0.0 {
                return Err(Error::InvalidRecord {
                    index,
                    reason: format!("price must not be negative, got {}", record.price),
                });
            }

            Ok(record)
        })
        .collect()
}
