use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use console::style;
use indicatif::ProgressBar;
use reqwest::Client;

use crate::cli::Cli;
use crate::map;
use crate::results::{self, Coordinates, Lookup};
use crate::steps;
use crate::user_config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const SPINNER_TICK: Duration = Duration::from_millis(100);

pub struct App {
  cli: Cli,
  client: Client,
  api_key: Option<String>,
}

impl App {
  /// Parses the CLI, merges the API key from flag, environment, and user
  /// config, and builds the shared HTTP client.
  pub fn new() -> Result<Self> {
    let cli = Cli::parse();

    if cli.no_color {
      console::set_colors_enabled(false);
      console::set_colors_enabled_stderr(false);
    }

    let client = Client::builder()
      .user_agent(format!("phonetrace/{}", env!("CARGO_PKG_VERSION")))
      .timeout(REQUEST_TIMEOUT)
      .build()?;

    let api_key = cli
      .api_key_flag
      .clone()
      .or_else(|| env::var("OPENCAGE_API_KEY").ok().filter(|k| !k.is_empty()))
      .or_else(|| user_config::load().opencage_api_key);

    Ok(Self {
      cli,
      client,
      api_key,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    if self.cli.config_show {
      self.show_config();
      return Ok(());
    }

    if !self.cli.quiet && !self.cli.json {
      results::print_banner();
    }

    if self.cli.save_key {
      self.persist_key()?;
    }

    let api_key = self.api_key.clone().ok_or_else(|| {
      anyhow!(
        "an OpenCage API key is required: pass --api-key KEY, set \
OPENCAGE_API_KEY, or store one with `--api-key KEY --save-key`"
      )
    })?;

    self.normalize_number();

    let number = steps::parse_number_step(&self.cli.number)?;
    let resolution = steps::resolve_carrier_step(&number);
    let mut lookup =
      Lookup::new(&self.cli.number, number, resolution, Local::now());

    self.geocode(&mut lookup, &api_key).await;

    let map_error = self.export_map(&mut lookup);

    self.present(&lookup)?;

    if let Some(err) = map_error {
      return Err(err);
    }

    self.open_map(&lookup);
    Ok(())
  }

  /// The original number may arrive without the leading `+`; assume
  /// international format rather than rejecting it.
  fn normalize_number(&mut self) {
    if self.cli.number.starts_with('+') {
      return;
    }
    if !self.cli.json {
      println!(
        "{}",
        style(format!(
          "note: assuming international format, using +{}",
          self.cli.number
        ))
        .yellow()
      );
    }
    self.cli.number.insert(0, '+');
  }

  async fn geocode(&self, lookup: &mut Lookup, api_key: &str) {
    let Some(region) = lookup.region.clone() else {
      lookup.warnings.push(
        "No region description is known for this numbering plan; skipping geocoding."
          .to_string(),
      );
      return;
    };

    let spinner = self.spinner(format!("Geocoding `{region}`..."));
    let outcome = steps::geocode_step(&region, api_key, &self.client).await;
    if let Some(spinner) = spinner {
      spinner.finish_and_clear();
    }

    match outcome {
      Ok(info) => {
        lookup.coordinates = Some(Coordinates {
          latitude: info.latitude,
          longitude: info.longitude,
        });
        lookup.region = Some(info.formatted);
      }
      Err(message) => lookup.warnings.push(message),
    }
  }

  /// Writes the map next to the invocation. Failure is deferred so the
  /// terminal summary still prints before the error surfaces.
  fn export_map(&self, lookup: &mut Lookup) -> Option<anyhow::Error> {
    lookup.coordinates?;
    match map::export(lookup, Path::new(".")) {
      Ok(path) => {
        lookup.map_file = Some(path);
        None
      }
      Err(err) => Some(err.context("writing the map file")),
    }
  }

  fn present(&self, lookup: &Lookup) -> Result<()> {
    if self.cli.json {
      results::print_json(lookup)
    } else {
      results::print_human_readable(lookup);
      Ok(())
    }
  }

  fn open_map(&self, lookup: &Lookup) {
    if !self.cli.open {
      return;
    }
    let Some(path) = &lookup.map_file else { return };

    if let Err(err) = map::open_in_browser(path) {
      eprintln!("{} {err:#}", style("warning:").yellow().bold());
    }
  }

  fn spinner(&self, message: String) -> Option<ProgressBar> {
    if self.cli.json {
      return None;
    }
    let spinner = ProgressBar::new_spinner().with_message(message);
    spinner.enable_steady_tick(SPINNER_TICK);
    Some(spinner)
  }

  fn persist_key(&self) -> Result<()> {
    // clap guarantees --save-key only appears together with --api-key.
    let cfg = user_config::UserConfig {
      opencage_api_key: self.cli.api_key_flag.clone(),
    };
    user_config::store(&cfg)
      .context("saving the API key to the user config file")?;

    if !self.cli.json {
      println!(
        "{}",
        style("API key saved to the user config file.").green()
      );
    }
    Ok(())
  }

  fn show_config(&self) {
    let source = if self.cli.api_key_flag.is_some() {
      "--api-key flag"
    } else if env::var("OPENCAGE_API_KEY")
      .ok()
      .filter(|k| !k.is_empty())
      .is_some()
    {
      "OPENCAGE_API_KEY environment variable"
    } else if self.api_key.is_some() {
      "user config file"
    } else {
      "not set"
    };

    println!(
      "{} {}",
      style("OpenCage API key:").bold().cyan(),
      self
        .api_key
        .as_deref()
        .map_or_else(|| "none".to_string(), mask_key)
    );
    println!("{} {source}", style("Key source:").bold().cyan());
  }
}

/// Shows only a short prefix of the key, enough to recognize it.
fn mask_key(key: &str) -> String {
  let total = key.chars().count();
  if total <= 4 {
    return "*".repeat(total.max(1));
  }
  let prefix: String = key.chars().take(4).collect();
  format!("{prefix}…")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mask_key_keeps_only_a_prefix() {
    assert_eq!(mask_key("abcdef123456"), "abcd…");
  }

  #[test]
  fn mask_key_hides_short_keys_entirely() {
    assert_eq!(mask_key("abcd"), "****");
    assert_eq!(mask_key("a"), "*");
  }
}
