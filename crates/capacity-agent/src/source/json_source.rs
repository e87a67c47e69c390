use std::path::{Path, PathBuf};

use log::debug;

use super::{DataSource, FacilityRow};
use crate::error::DataError;
use crate::model::FacilityRecord;
use crate::sanitize;

/// Reads a facility snapshot from a JSON array of row objects.
pub struct JsonDataSource {
    path: PathBuf,
}

impl JsonDataSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Parses a JSON array of facility rows.
pub fn parse_facilities(content: &str) -> Result<Vec<FacilityRecord>, DataError> {
    let rows: Vec<FacilityRow> = serde_json::from_str(content)?;
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| row.into_record(position))
        .collect()
}

impl DataSource for JsonDataSource {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| DataError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let records = parse_facilities(&content)?;
        debug!(
            "Loaded {} facilities from {}",
            records.len(),
            sanitize::redact_path(&self.path)
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json:{}", sanitize::redact_path(&self.path))
    }
}
