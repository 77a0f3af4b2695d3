use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use console::{style, Style};
use serde::Serialize;

use crate::providers::{carrier, number};

const UNKNOWN: &str = "unknown";

/// Approximate latitude/longitude resolved for the region description.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

/// Everything one invocation learns about a number.
///
/// Lives only for the duration of the run; nothing is persisted and queried
/// numbers are never logged anywhere.
#[derive(Debug, Serialize)]
pub struct Lookup {
  /// The number as the user supplied it (after `+` normalization).
  pub number: String,
  pub e164: String,
  pub country_code: u16,
  pub national_number: String,
  pub number_type: number::Type,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub carrier: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub region: Option<String>,
  /// Present only when the region description geocoded successfully.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coordinates: Option<Coordinates>,

  pub timestamp: DateTime<Local>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub map_file: Option<PathBuf>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub warnings: Vec<String>,
}

impl Lookup {
  #[must_use]
  pub fn new(
    raw: &str,
    info: number::Info,
    resolution: carrier::Resolution,
    timestamp: DateTime<Local>,
  ) -> Self {
    Self {
      number: raw.to_owned(),
      e164: info.e164,
      country_code: info.country_code,
      national_number: info.national_number,
      number_type: info.number_type,
      carrier: resolution.carrier,
      region: resolution.region,
      coordinates: None,
      timestamp,
      map_file: None,
      warnings: Vec::new(),
    }
  }
}

/// Helper: coloured keys so the summary is easy to scan.
fn key(s: &str) -> console::StyledObject<&str> {
  style(s).bold().cyan()
}

/// Helper: print a section header ("🌐 Location") once.
fn header(title: &str, emoji: &str) {
  println!(
    "\n{} {}",
    style(emoji).bold(),
    Style::new().bold().underlined().apply_to(title)
  );
}

pub fn print_banner() {
  let line = "─".repeat(56);
  println!("{}", style(format!("┌{line}┐")).cyan());
  println!(
    "{}",
    style(format!("│{:^56}│", "phonetrace")).cyan().bold()
  );
  println!(
    "{}",
    style(format!(
      "│{:^56}│",
      "carrier registration area, not a live position"
    ))
    .cyan()
  );
  println!("{}", style(format!("└{line}┘")).cyan());
}

pub fn print_human_readable(lookup: &Lookup) {
  println!(
    "\n{} {}",
    style("•").magenta(),
    Style::new()
      .bold()
      .magenta()
      .apply_to(format!("Lookup results for: {}", &lookup.number))
  );

  header("Number", "📱");
  println!("  {} {}", key("E.164:"), lookup.e164);
  println!("  {} +{}", key("Country code:"), lookup.country_code);
  println!("  {} {}", key("National number:"), lookup.national_number);
  println!("  {} {}", key("Type:"), lookup.number_type);

  header("Carrier & Region", "📡");
  println!(
    "  {} {}",
    key("Carrier:"),
    lookup.carrier.as_deref().unwrap_or(UNKNOWN)
  );
  println!(
    "  {} {}",
    key("Region:"),
    lookup.region.as_deref().unwrap_or(UNKNOWN)
  );

  header("Location", "🌐");
  match lookup.coordinates {
    Some(coordinates) => {
      println!("  {} {:.6}", key("Latitude:"), coordinates.latitude);
      println!("  {} {:.6}", key("Longitude:"), coordinates.longitude);
    }
    None => println!("  {}", style("unavailable (region not geocoded)").dim()),
  }
  if let Some(path) = &lookup.map_file {
    println!("  {} {}", key("Map file:"), path.display());
  }
  println!(
    "  {} {}",
    key("Looked up:"),
    lookup.timestamp.format("%Y-%m-%d %H:%M:%S")
  );

  if !lookup.warnings.is_empty() {
    header("Warnings", "⚠");
    for warning in &lookup.warnings {
      println!("  {}", style(warning).yellow());
    }
  }
}

pub fn print_json(lookup: &Lookup) -> Result<()> {
  serde_json::to_string_pretty(lookup)
    .map(|s| println!("{s}"))
    .context("Failed to serialize results to JSON")
}
