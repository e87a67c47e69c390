use super::DataSource;
use crate::error::DataError;
use crate::model::FacilityRecord;

/// Serves a fixed facility list, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    facilities: Vec<FacilityRecord>,
}

impl InMemorySource {
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        Self { facilities }
    }
}

impl DataSource for InMemorySource {
    fn load(&self) -> Result<Vec<FacilityRecord>, DataError> {
        Ok(self.facilities.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} facilities", self.facilities.len())
    }
}
