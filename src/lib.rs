#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::struct_excessive_bools)]

use anyhow::Result;

mod app;
mod cli;
mod map;
pub mod providers;
mod results;
mod steps;
mod user_config;

/// Runs the main application logic.
///
/// This function parses command-line arguments, resolves the geocoding API
/// key, validates the requested phone number, resolves carrier and region
/// metadata, geocodes the region, and prints the results (writing the HTML
/// map when coordinates are available).
///
/// # Errors
///
/// Returns an error on an invalid phone number, a missing API key, a failed
/// map write, or when serializing the results to JSON fails. Geocoding
/// failures degrade the result instead of erroring.
pub async fn run() -> Result<()> {
  let mut app = app::App::new()?;

  app.run().await
}
