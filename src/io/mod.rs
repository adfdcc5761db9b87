//! I/O module
//!
//! Handles session-script CSV input and account-state CSV output:
//! - `csv_format` - Record structures, conversion to domain operations,
//!   and account output serialization
//! - `session_reader` - Streaming iterator over session-script operations

pub mod csv_format;
pub mod session_reader;

pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord, Operation};
pub use session_reader::SessionReader;
