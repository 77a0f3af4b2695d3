use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "phonetrace", version)]
#[command(
  about = "Look up carrier, region, and an approximate map location for a phone number.",
  long_about = "A command-line utility that validates a phone number, resolves its carrier and \
coarse geographic region from numbering-plan data, geocodes the region through the OpenCage \
API, and renders an interactive HTML map. The location is approximate (carrier registration \
area), never a live position."
)]
pub struct Cli {
  /// Phone number in international format, e.g. +254712345678.
  /// A missing leading '+' is added automatically.
  pub number: String,

  /// OpenCage geocoding API key.
  /// Overrides the `OPENCAGE_API_KEY` environment variable and the saved config.
  #[arg(short = 'k', long = "api-key", value_name = "API_KEY")]
  pub api_key_flag: Option<String>,

  /// Open the generated map in the default browser.
  #[arg(short, long)]
  pub open: bool,

  /// Suppress the startup banner. Lookup results are still printed.
  #[arg(short, long)]
  pub quiet: bool,

  /// Output the lookup result as JSON instead of human-readable text.
  #[arg(long)]
  pub json: bool,

  /// Disable colored output.
  #[arg(long)]
  pub no_color: bool,

  /// Persist the key given with --api-key into the user config file.
  #[arg(long, requires = "api_key_flag")]
  pub save_key: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_args(args: &[&str]) -> Vec<String> {
    std::iter::once("phonetrace".to_string())
      .chain(args.iter().map(std::string::ToString::to_string))
      .collect()
  }

  #[test]
  fn test_basic_number() {
    let args = make_args(&["+254712345678"]);
    let cli = Cli::try_parse_from(args).expect("Should parse basic number");
    assert_eq!(cli.number, "+254712345678");
    assert!(cli.api_key_flag.is_none());
    assert!(!cli.open);
    assert!(!cli.quiet);
    assert!(!cli.json);
    assert!(!cli.no_color);
    assert!(!cli.save_key);
    assert!(!cli.config_show);
  }

  #[test]
  fn test_api_key_flag() {
    let args = make_args(&["+14155552671", "--api-key", "mykey123"]);
    let cli = Cli::try_parse_from(args).expect("Should parse --api-key");
    assert_eq!(cli.api_key_flag, Some("mykey123".to_string()));
  }

  #[test]
  fn test_api_key_short_flag() {
    let args = make_args(&["+14155552671", "-k", "mykey123"]);
    let cli = Cli::try_parse_from(args).expect("Should parse -k");
    assert_eq!(cli.api_key_flag, Some("mykey123".to_string()));
  }

  #[test]
  fn test_open_and_quiet_flags() {
    let args = make_args(&["+447911123456", "-o", "-q"]);
    let cli = Cli::try_parse_from(args).expect("Should parse -o and -q");
    assert!(cli.open);
    assert!(cli.quiet);
    assert!(!cli.json);
  }

  #[test]
  fn test_json_flag() {
    let args = make_args(&["+447911123456", "--json"]);
    let cli = Cli::try_parse_from(args).expect("Should parse --json");
    assert!(cli.json);
  }

  #[test]
  fn test_no_color_flag() {
    let args = make_args(&["+447911123456", "--no-color"]);
    let cli = Cli::try_parse_from(args).expect("Should parse --no-color");
    assert!(cli.no_color);
  }

  #[test]
  fn test_combination_flags() {
    let args =
      make_args(&["+254712345678", "--json", "--open", "-k", "abc", "--quiet"]);
    let cli =
      Cli::try_parse_from(args).expect("Should parse combination of flags");
    assert_eq!(cli.number, "+254712345678");
    assert!(cli.json);
    assert!(cli.open);
    assert!(cli.quiet);
    assert_eq!(cli.api_key_flag, Some("abc".to_string()));
  }

  #[test]
  fn test_missing_number_fails() {
    let args = make_args(&[]);
    let result = Cli::try_parse_from(args);
    assert!(
      result.is_err(),
      "Parsing should fail if the number argument is missing"
    );
    assert!(
      matches!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::MissingRequiredArgument
      ),
      "Error kind should be MissingRequiredArgument"
    );
  }

  #[test]
  fn test_save_key_requires_api_key_flag() {
    let args = make_args(&["+254712345678", "--save-key"]);
    let result = Cli::try_parse_from(args);
    assert!(
      result.is_err(),
      "Parsing should fail if --save-key is used without --api-key"
    );
    assert!(
      result.unwrap_err().to_string().contains("--api-key"),
      "Error message should mention the '--api-key' requirement"
    );
  }

  #[test]
  fn test_save_key_with_api_key_flag() {
    let args =
      make_args(&["+254712345678", "--api-key", "mykey123", "--save-key"]);
    let cli =
      Cli::try_parse_from(args).expect("Should parse --save-key with a key");
    assert!(cli.save_key);
    assert_eq!(cli.api_key_flag, Some("mykey123".to_string()));
  }

  #[test]
  fn test_number_without_plus_is_accepted_by_the_parser() {
    // Normalization happens in the app, not in clap.
    let args = make_args(&["254712345678"]);
    let cli = Cli::try_parse_from(args).expect("Should parse bare digits");
    assert_eq!(cli.number, "254712345678");
  }

  #[test]
  fn test_help_flag_exits_with_usage() {
    let args = make_args(&["--help"]);
    let result = Cli::try_parse_from(args);
    assert!(
      matches!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::DisplayHelp
      ),
      "Error kind should be DisplayHelp"
    );
  }
}
