use clap::Parser;
use std::path::PathBuf;

/// Process a banking session script against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Process a banking session script against an in-memory ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing session operations
    #[arg(value_name = "INPUT", help = "Path to the session script CSV file")]
    pub input_file: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Log filter directive derived from the verbosity flags
    ///
    /// `RUST_LOG`, when set, still takes precedence over this value; see
    /// `main` for how the subscriber is built.
    ///
    /// # Returns
    ///
    /// The default tracing filter for the selected verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_input_file_is_parsed() {
        let parsed = CliArgs::try_parse_from(["program", "session.csv"]).unwrap();
        assert_eq!(parsed.input_file, PathBuf::from("session.csv"));
        assert_eq!(parsed.verbose, 0);
    }

    // Verbosity flag tests
    #[rstest]
    #[case::default(&["program", "session.csv"], 0, "warn")]
    #[case::single(&["program", "-v", "session.csv"], 1, "debug")]
    #[case::double(&["program", "-vv", "session.csv"], 2, "trace")]
    #[case::long_form(&["program", "--verbose", "session.csv"], 1, "debug")]
    fn test_verbosity_levels(
        #[case] args: &[&str],
        #[case] expected_count: u8,
        #[case] expected_filter: &str,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.verbose, expected_count);
        assert_eq!(parsed.log_filter(), expected_filter);
    }

    // Error handling tests
    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::unknown_flag(&["program", "--batch-size", "10", "session.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
