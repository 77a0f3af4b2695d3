//! Phone number parsing, validation, and type classification.

use std::fmt;

use anyhow::{bail, Result};
use phonenumber::metadata::DATABASE;
use phonenumber::Mode;
use serde::Serialize;

/// Classification of a number within its national numbering plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
  Mobile,
  FixedLine,
  Voip,
  Unknown,
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Self::Mobile => "mobile",
      Self::FixedLine => "fixed line",
      Self::Voip => "VoIP",
      Self::Unknown => "unknown",
    };
    f.write_str(label)
  }
}

/// Structured metadata for a validated number.
#[derive(Debug, Clone, Serialize)]
pub struct Info {
  /// Canonical E.164 form, e.g. `+254712345678`.
  pub e164: String,
  /// Numeric country calling code, e.g. `254`.
  pub country_code: u16,
  /// National significant number, digits only.
  pub national_number: String,
  /// ISO 3166-1 alpha-2 region the plan maps to, e.g. `KE`.
  pub region: Option<String>,
  pub number_type: Type,
}

/// Parses and validates `raw`, which must carry a country calling code.
///
/// # Errors
///
/// Fails when the string cannot be parsed as an international number or when
/// the library declares it invalid for its numbering plan. No network access
/// is involved at any point.
pub fn parse(raw: &str) -> Result<Info> {
  let number = match phonenumber::parse(None, raw) {
    Ok(number) => number,
    Err(err) => bail!("`{raw}` could not be parsed: {err}"),
  };

  if !phonenumber::is_valid(&number) {
    bail!("`{raw}` is not a valid number for its numbering plan");
  }

  let region = number.country().id().map(|id| format!("{id:?}"));

  Ok(Info {
    e164: phonenumber::format(&number).mode(Mode::E164).to_string(),
    country_code: number.country().code(),
    national_number: number.national().value().to_string(),
    region,
    number_type: classify(&number),
  })
}

/// Collapses the library's fine-grained classification onto the four tags
/// the lookup reports.
fn classify(number: &phonenumber::PhoneNumber) -> Type {
  match number.number_type(&DATABASE) {
    // Plans where mobile and fixed ranges overlap (e.g. NANPA) lean mobile.
    phonenumber::Type::Mobile | phonenumber::Type::FixedLineOrMobile => {
      Type::Mobile
    }
    phonenumber::Type::FixedLine => Type::FixedLine,
    phonenumber::Type::Voip => Type::Voip,
    _ => Type::Unknown,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kenyan_mobile_number() {
    let info = parse("+254712345678").expect("valid Kenyan number");
    assert_eq!(info.country_code, 254);
    assert_eq!(info.national_number, "712345678");
    assert_eq!(info.region.as_deref(), Some("KE"));
    assert_eq!(info.e164, "+254712345678");
    assert!(matches!(info.number_type, Type::Mobile | Type::FixedLine));
  }

  #[test]
  fn uk_mobile_classifies_as_mobile() {
    let info = parse("+447911123456").expect("valid UK number");
    assert_eq!(info.country_code, 44);
    assert_eq!(info.region.as_deref(), Some("GB"));
    assert_eq!(info.number_type, Type::Mobile);
  }

  #[test]
  fn e164_reconstruction_matches_canonical_form() {
    let info = parse("+44 7911 123456").expect("valid with spaces");
    assert_eq!(
      format!("+{}{}", info.country_code, info.national_number),
      info.e164
    );
  }

  #[test]
  fn rejects_text_input() {
    assert!(parse("notanumber").is_err());
  }

  #[test]
  fn rejects_too_short_number() {
    assert!(parse("+2547").is_err());
  }

  #[test]
  fn us_number_parses() {
    let info = parse("+16502530000").expect("valid US number");
    assert_eq!(info.country_code, 1);
    assert_eq!(info.region.as_deref(), Some("US"));
  }
}
