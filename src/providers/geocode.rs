//! Forward geocoding through the OpenCage Data API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Debug, Error)]
pub enum Error {
  #[error("OpenCage rejected the API key; check --api-key or OPENCAGE_API_KEY")]
  Auth,
  #[error(
    "OpenCage quota or rate limit exhausted; wait for the daily reset or upgrade the plan"
  )]
  Quota,
  #[error("OpenCage found no coordinates for `{0}`")]
  NoMatch(String),
  #[error("geocoding request failed: {0}")]
  Network(#[from] reqwest::Error),
  #[error("unexpected OpenCage response: {0}")]
  Malformed(String),
}

/// Best-matching coordinates and formatted place name for a text query.
#[derive(Debug, Clone, Serialize)]
pub struct Info {
  pub latitude: f64,
  pub longitude: f64,
  /// The provider's formatted address, e.g. "Nairobi, Kenya".
  pub formatted: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
  #[serde(default)]
  results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
  formatted: String,
  geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
  lat: f64,
  lng: f64,
}

/// Fetches the best-matching coordinates for a textual region description.
///
/// # Arguments
///
/// * `query` - Free-text place description, e.g. "Nairobi, Kenya".
/// * `api_key` - OpenCage API key.
/// * `client` - HTTP client for the request.
///
/// # Errors
///
/// * [`Error::Auth`] when the key is rejected (HTTP 401/403).
/// * [`Error::Quota`] when the daily quota or rate limit is exhausted
///   (HTTP 402/429).
/// * [`Error::NoMatch`] when the provider returns an empty result set.
/// * [`Error::Network`] on transport failures, timeouts, or other
///   non-success status codes.
/// * [`Error::Malformed`] when the body cannot be decoded.
pub async fn fetch_coordinates(
  query: &str,
  api_key: &str,
  client: &Client,
) -> Result<Info, Error> {
  let response = client
    .get(ENDPOINT)
    .query(&[
      ("q", query),
      ("key", api_key),
      ("limit", "1"),
      ("no_annotations", "1"),
    ])
    .send()
    .await?;

  match response.status() {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(Error::Auth),
    StatusCode::PAYMENT_REQUIRED | StatusCode::TOO_MANY_REQUESTS => {
      return Err(Error::Quota)
    }
    _ => {}
  }

  let payload = response
    .error_for_status()?
    .json::<ApiResponse>()
    .await
    .map_err(|err| Error::Malformed(err.to_string()))?;

  best_match(payload, query)
}

/// Picks the first (best-ranked) result out of a decoded payload.
fn best_match(payload: ApiResponse, query: &str) -> Result<Info, Error> {
  let first = payload
    .results
    .into_iter()
    .next()
    .ok_or_else(|| Error::NoMatch(query.to_string()))?;

  Ok(Info {
    latitude: first.geometry.lat,
    longitude: first.geometry.lng,
    formatted: first.formatted,
  })
}
