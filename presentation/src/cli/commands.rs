//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for resolution results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every resolved field
    Full,
    /// One line per record
    Compact,
    /// JSON output
    Json,
}

/// CLI arguments for canonica
#[derive(Parser, Debug)]
#[command(name = "canonica")]
#[command(author, version, about = "Resolve company names into canonical, deduplicated records")]
#[command(long_about = r#"
Canonica resolves a free-text company or platform name into a canonical
record keyed by website host, escalating through a cost-ordered chain of
models and falling back to web search when cheaper tiers come up empty.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./canonica.toml     Project-level config
3. ~/.config/canonica/config.toml   Global config

Example:
  canonica "Bristol Myers Squibb"
  canonica --output json "stripe"
  canonica -vv "LinkedIn vs Indeed"
"#)]
pub struct Cli {
    /// The company or platform name to resolve
    pub query: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Skip logo download and storage
    #[arg(long)]
    pub no_logos: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_positional() {
        let cli = Cli::try_parse_from(["canonica", "Acme Corp"]).unwrap();
        assert_eq!(cli.query, "Acme Corp");
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_logos);
    }

    #[test]
    fn test_flags_parse() {
        let cli =
            Cli::try_parse_from(["canonica", "-vv", "--output", "json", "--no-logos", "acme"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.output, OutputFormat::Json));
        assert!(cli.no_logos);
    }

    #[test]
    fn test_missing_query_is_an_error() {
        assert!(Cli::try_parse_from(["canonica"]).is_err());
    }
}
