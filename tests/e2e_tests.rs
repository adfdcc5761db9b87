//! End-to-end integration tests
//!
//! These tests validate the complete session replay pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Replays all operations through the ledger
//! 3. Generates output CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Interest-bearing withdrawal policy (limit, minimum balance, funds)
//! - Monthly interest crediting
//! - Transfer atomicity (failed transfers leave both accounts unchanged)
//! - Authentication lockout
//! - Error conditions (duplicates, invalid amounts, weak credentials)

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_ledger_engine::session::run_session;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    ///
    /// This helper function:
    /// 1. Reads input.csv from tests/fixtures/{fixture_name}/
    /// 2. Replays all operations through a fresh ledger
    /// 3. Generates output CSV to a temporary file
    /// 4. Reads expected.csv from the fixture directory
    /// 5. Compares actual output with expected output
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g., "happy_path")
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str) {
        // Construct paths to fixture files
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        // Verify fixture files exist
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        // Create temporary output file
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        // Replay the full session script
        run_session(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process session: {}", e));

        // Flush output
        temp_output.flush().expect("Failed to flush temp file");

        // Read actual output from temp file
        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        // Read expected output
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures
    #[rstest]
    #[case("happy_path")]
    #[case("interest_rules")]
    #[case("monthly_interest")]
    #[case("transfer_atomicity")]
    #[case("lockout")]
    #[case("duplicates_and_rejects")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }
}
