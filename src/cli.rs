//! Clap adapter: explicit `--set KEY=VALUE` overrides as a driver.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The adapter
//! produces an ordinary [`MapDriver`]; put it first in the chain so values
//! given on the command line take precedence over every other source.
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     overrides: OverrideArgs,
//! }
//!
//! let cli = Cli::parse();
//! let resolver = Resolver::builder()
//!     .driver(cli.overrides.into_driver())
//!     .env()
//!     .build();
//! ```

use clap::Args;

use crate::drivers::MapDriver;

/// Clap-derived args carrying repeatable `--set KEY=VALUE` overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    /// Override a configuration key (repeatable). Later flags win.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub overrides: Vec<(String, String)>,
}

impl OverrideArgs {
    /// Convert the parsed overrides into a driver named `"cli"`.
    pub fn into_driver(self) -> MapDriver {
        MapDriver::from_pairs("cli", self.overrides)
    }
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        overrides: OverrideArgs,
    }

    fn parse(args: &[&str]) -> OverrideArgs {
        TestCli::try_parse_from(args).unwrap().overrides
    }

    #[test]
    fn no_flags_is_empty() {
        let args = parse(&["app"]);
        assert!(args.overrides.is_empty());
        assert!(args.into_driver().is_empty());
    }

    #[test]
    fn repeated_set_flags() {
        let args = parse(&["app", "--set", "PORT=80", "--set", "HOST=0.0.0.0"]);
        assert_eq!(
            args.overrides,
            vec![
                ("PORT".to_string(), "80".to_string()),
                ("HOST".to_string(), "0.0.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn value_may_contain_equals() {
        let args = parse(&["app", "--set", "DSN=pg://u:p@h/db?sslmode=off"]);
        assert_eq!(args.overrides[0].1, "pg://u:p@h/db?sslmode=off");
    }

    #[test]
    fn empty_value_allowed() {
        let args = parse(&["app", "--set", "SUFFIX="]);
        assert_eq!(args.overrides[0], ("SUFFIX".into(), "".into()));
    }

    #[test]
    fn later_flag_wins_in_driver() {
        let driver = parse(&["app", "--set", "PORT=1", "--set", "PORT=2"]).into_driver();
        assert_eq!(driver.get("PORT").unwrap().as_deref(), Some("2"));
        assert_eq!(driver.name(), "cli");
    }

    #[test]
    fn malformed_pair_rejected() {
        assert!(TestCli::try_parse_from(["app", "--set", "PORT"]).is_err());
        assert!(TestCli::try_parse_from(["app", "--set", "=80"]).is_err());
    }
}
