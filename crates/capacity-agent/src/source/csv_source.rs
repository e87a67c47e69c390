use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;

use super::{DataSource, FacilityRow};
use crate::error::DataError;
use crate::model::FacilityRecord;
use crate::sanitize;

/// Reads a facility snapshot from a CSV file with a header row.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvDataSource {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (position, row) in reader.deserialize::<FacilityRow>().enumerate() {
            records.push(row?.into_record(position)?);
        }

        debug!(
            "Loaded {} facilities from {}",
            records.len(),
            sanitize::redact_path(&self.path)
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("csv:{}", sanitize::redact_path(&self.path))
    }
}
