//! Renders the lookup result as a self-contained dark-themed Leaflet map.
//!
//! The generated document pulls Leaflet from its CDN and draws a marker with
//! a popup summary plus an accuracy circle. It is written atomically: the
//! HTML lands in a temporary file in the target directory and is renamed into
//! place, so an interrupted run leaves no partial artifact.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::results::{Coordinates, Lookup};

/// Radius of the accuracy circle, in meters. Carrier registration data only
/// pins a wide area.
pub const ACCURACY_RADIUS_M: u32 = 5000;

const ZOOM: u8 = 10;
const TILE_URL: &str =
  "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
const TILE_ATTRIBUTION: &str = r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>"#;

/// File name for a map generated at `timestamp`, e.g.
/// `phone_map_20250801_142359.html`.
#[must_use]
pub fn file_name(timestamp: &DateTime<Local>) -> String {
  format!("phone_map_{}.html", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the map for `lookup` into `dir` and returns the final path.
///
/// # Errors
///
/// Fails when `lookup` carries no coordinates, or when the document cannot
/// be created, written, or renamed into place.
pub fn export(lookup: &Lookup, dir: &Path) -> Result<PathBuf> {
  let coordinates = lookup
    .coordinates
    .context("cannot render a map without coordinates")?;

  let path = dir.join(file_name(&lookup.timestamp));
  let html = render(lookup, coordinates);

  let tmp =
    NamedTempFile::new_in(dir).context("creating a temporary map file")?;
  std::fs::write(tmp.path(), html).context("writing the map document")?;
  tmp
    .persist(&path)
    .with_context(|| format!("moving the map into place at {}", path.display()))?;

  Ok(path)
}

/// Opens `path` with the system's default browser.
///
/// # Errors
///
/// Fails when no handler for HTML files is available (headless host, no
/// default browser). The map file itself is already on disk at that point.
pub fn open_in_browser(path: &Path) -> Result<()> {
  open::that(path)
    .with_context(|| format!("opening {} in the default browser", path.display()))
}

fn render(lookup: &Lookup, coordinates: Coordinates) -> String {
  let Coordinates {
    latitude,
    longitude,
  } = coordinates;
  let title = escape_html(&lookup.e164);
  let popup = js_string(&popup_html(lookup, coordinates));
  let tooltip =
    js_string(lookup.region.as_deref().unwrap_or("approximate area"));
  let tiles = js_string(TILE_URL);
  let attribution = js_string(TILE_ATTRIBUTION);

  format!(
    r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>phonetrace: {title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; background: #111; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map").setView([{latitude}, {longitude}], {ZOOM});
L.tileLayer({tiles}, {{ attribution: {attribution}, maxZoom: 19 }}).addTo(map);
L.marker([{latitude}, {longitude}])
  .addTo(map)
  .bindPopup({popup}, {{ maxWidth: 350 }})
  .bindTooltip({tooltip})
  .openPopup();
L.circle([{latitude}, {longitude}], {{
  radius: {ACCURACY_RADIUS_M},
  color: "#ff4444",
  fillColor: "#ff4444",
  fillOpacity: 0.2
}}).addTo(map);
</script>
</body>
</html>
"##
  )
}

fn popup_html(lookup: &Lookup, coordinates: Coordinates) -> String {
  [
    format!("<b>Number:</b> {}", escape_html(&lookup.e164)),
    format!("<b>Type:</b> {}", lookup.number_type),
    format!(
      "<b>Carrier:</b> {}",
      escape_html(lookup.carrier.as_deref().unwrap_or("unknown"))
    ),
    format!(
      "<b>Region:</b> {}",
      escape_html(lookup.region.as_deref().unwrap_or("unknown"))
    ),
    format!(
      "<b>Coordinates:</b> {:.6}, {:.6}",
      coordinates.latitude, coordinates.longitude
    ),
    format!("<b>Time:</b> {}", lookup.timestamp.format("%Y-%m-%d %H:%M:%S")),
  ]
  .join("<br>")
}

fn escape_html(value: &str) -> String {
  value
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}

/// Quotes `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}
