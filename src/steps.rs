use anyhow::{Context, Result};
use reqwest::Client;

use crate::providers::{carrier, geocode, number};

/// Parses and validates the raw number. Failure aborts the pipeline before
/// any network traffic is spent.
pub fn parse_number_step(raw: &str) -> Result<number::Info> {
  number::parse(raw).context(
    "invalid phone number (expected international format like +254712345678)",
  )
}

/// Offline carrier and region resolution; best-effort, never fails.
#[must_use]
pub fn resolve_carrier_step(info: &number::Info) -> carrier::Resolution {
  carrier::resolve(info)
}

/// Forward-geocodes the region description. Failures come back as a
/// stage-labeled message so the caller can degrade instead of aborting.
pub async fn geocode_step(
  region: &str,
  api_key: &str,
  client: &Client,
) -> Result<geocode::Info, String> {
  geocode::fetch_coordinates(region, api_key, client)
    .await
    .map_err(|e| format!("Geocoding failed: {e}"))
}
