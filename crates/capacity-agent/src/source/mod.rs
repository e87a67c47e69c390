//! Facility snapshot sources.
//!
//! A source yields the raw facility list for one run. Files are accepted as
//! CSV or JSON; column names may use either snake_case or the legacy
//! spreadsheet headers (`Warehouse_ID`, `Total_Capacity_Pallets`, ...).

pub mod csv_source;
pub mod json_source;
pub mod memory;
pub mod row;

use std::path::Path;

use crate::error::DataError;
use crate::model::FacilityRecord;

pub use csv_source::CsvDataSource;
pub use json_source::JsonDataSource;
pub use memory::InMemorySource;
pub use row::FacilityRow;

pub trait DataSource: Send + Sync {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Picks a file-backed source from the file extension.
pub fn open_source(path: &Path) -> Result<Box<dyn DataSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvDataSource::new(path))),
        Some("json") => Ok(Box::new(JsonDataSource::new(path))),
        Some(other) => Err(DataError::UnsupportedFormat(other.to_string())),
        None => Err(DataError::UnsupportedFormat(
            crate::sanitize::redact_path(path),
        )),
    }
}
