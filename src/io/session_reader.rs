//! Streaming CSV reader for session scripts
//!
//! Provides a streaming iterator over session-script operations from a CSV
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SessionReader implements the Iterator trait, yielding
//! `Result<Operation, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use rust_ledger_engine::io::session_reader::SessionReader;
//! use std::path::Path;
//!
//! let reader = SessionReader::new(Path::new("session.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("Applying operation: {:?}", operation),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()` as
//!   `LedgerError::IoError`
//! - Individual record parsing errors are yielded as `LedgerError::ParseError`
//!   variants in the iterator, with line numbers for debugging
//!
//! # Memory Efficiency
//!
//! The reader processes CSV records one at a time without loading the entire
//! file into memory; memory usage is O(1) per record.

use crate::io::csv_format::{convert_csv_record, CsvRecord, Operation};
use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming session-script reader
///
/// Provides an iterator interface over session operations with constant
/// memory usage.
#[derive(Debug)]
pub struct SessionReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SessionReader {
    /// Create a new SessionReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration. The CSV
    /// reader is configured to trim whitespace from all fields and to allow
    /// flexible field counts for the optional trailing columns.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the session script
    ///
    /// # Returns
    ///
    /// * `Ok(SessionReader)` if the file opened successfully
    /// * `Err(LedgerError::IoError)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path)?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SessionReader {
    type Item = Result<Operation, LedgerError>;

    /// Get the next operation from the session script
    ///
    /// Reads the next CSV row, deserializes it to a CsvRecord and converts
    /// it to an Operation, attaching the line number to any error.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Operation))` - Successfully parsed operation
    /// * `Some(Err(LedgerError::ParseError))` - Parse or conversion error
    ///   with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // The header occupies the first line of the file
                let line = self.line_num as u64 + 1;
                Some(convert_csv_record(csv_record).map_err(|message| {
                    LedgerError::ParseError {
                        line: Some(line),
                        message,
                    }
                }))
            }
            Err(e) => {
                self.line_num += 1;
                // The csv error carries its own position
                Some(Err(LedgerError::from(e)))
            }
        }
    }
}
