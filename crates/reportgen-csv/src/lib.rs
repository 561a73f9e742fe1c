//! # reportgen-csv
//!
//! CSV data source reader for reportgen.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
