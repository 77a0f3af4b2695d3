//! Offline carrier and region resolution from embedded numbering-plan data.
//!
//! The table maps carrier registration blocks and fixed-line area codes, so
//! results describe where a number was issued, never where the handset is.
//! Coverage is best-effort: prefix entries exist for the larger mobile
//! markets, everywhere else falls back to a country-level description.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use super::number;

static TABLE_JSON: &str = include_str!("../config/carriers.json");

static TABLE: LazyLock<HashMap<String, Plan>> = LazyLock::new(|| {
  serde_json::from_str(TABLE_JSON).expect("parse embedded carrier table")
});

#[derive(Debug, Deserialize)]
struct Plan {
  /// Country display name, e.g. "Kenya".
  name: String,
  /// Mobile registration blocks, matched against the national number.
  #[serde(default)]
  carriers: Vec<PrefixEntry>,
  /// Fixed-line area codes mapped to a city.
  #[serde(default)]
  areas: Vec<PrefixEntry>,
}

#[derive(Debug, Deserialize)]
struct PrefixEntry {
  prefix: String,
  name: String,
}

/// Carrier and region description resolved for a validated number.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
  pub carrier: Option<String>,
  pub region: Option<String>,
}

/// Resolves carrier and region metadata for `info`, offline and best-effort.
///
/// A number whose plan maps to no known region resolves to nothing at all;
/// a known region without a matching prefix entry keeps the country-level
/// description and no carrier.
#[must_use]
pub fn resolve(info: &number::Info) -> Resolution {
  let Some(plan) = info.region.as_deref().and_then(|id| TABLE.get(id)) else {
    return Resolution::default();
  };

  let carrier =
    longest_match(&plan.carriers, &info.national_number).map(str::to_owned);
  let region = match longest_match(&plan.areas, &info.national_number) {
    Some(city) => format!("{city}, {}", plan.name),
    None => plan.name.clone(),
  };

  Resolution {
    carrier,
    region: Some(region),
  }
}

fn longest_match<'a>(
  entries: &'a [PrefixEntry],
  national: &str,
) -> Option<&'a str> {
  entries
    .iter()
    .filter(|entry| national.starts_with(&entry.prefix))
    .max_by_key(|entry| entry.prefix.len())
    .map(|entry| entry.name.as_str())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::providers::number::Type;

  fn make_info(national: &str, region: Option<&str>) -> number::Info {
    number::Info {
      e164: format!("+0{national}"),
      country_code: 0,
      national_number: national.to_string(),
      region: region.map(str::to_owned),
      number_type: Type::Unknown,
    }
  }

  #[test]
  fn kenyan_safaricom_block() {
    let resolution = resolve(&make_info("712345678", Some("KE")));
    assert_eq!(resolution.carrier.as_deref(), Some("Safaricom"));
    assert_eq!(resolution.region.as_deref(), Some("Kenya"));
  }

  #[test]
  fn kenyan_fixed_line_maps_to_city() {
    let resolution = resolve(&make_info("202345678", Some("KE")));
    assert!(resolution.carrier.is_none());
    assert_eq!(resolution.region.as_deref(), Some("Nairobi, Kenya"));
  }

  #[test]
  fn us_number_has_no_carrier_mapping() {
    let resolution = resolve(&make_info("2125551234", Some("US")));
    assert!(resolution.carrier.is_none());
    assert_eq!(resolution.region.as_deref(), Some("New York, United States"));
  }

  #[test]
  fn country_level_fallback_without_prefix_match() {
    let resolution = resolve(&make_info("912345678", Some("AT")));
    assert!(resolution.carrier.is_none());
    assert_eq!(resolution.region.as_deref(), Some("Austria"));
  }

  #[test]
  fn unknown_region_resolves_to_nothing() {
    let resolution = resolve(&make_info("12345678", None));
    assert!(resolution.carrier.is_none());
    assert!(resolution.region.is_none());
  }

  #[test]
  fn longest_prefix_wins() {
    // German 1511 (Telekom) must beat a shorter overlapping block if one exists.
    let resolution = resolve(&make_info("15112345678", Some("DE")));
    assert_eq!(resolution.carrier.as_deref(), Some("Telekom"));
  }

  #[test]
  fn embedded_table_parses() {
    assert!(TABLE.contains_key("KE"));
    assert!(TABLE.contains_key("US"));
    assert!(TABLE.len() > 40);
  }
}
