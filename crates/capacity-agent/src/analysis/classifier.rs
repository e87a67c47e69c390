use std::collections::HashSet;

use thiserror::Error;

use crate::error::{ClassificationError, DataError};
use crate::model::{utilization_percentage, FacilityRecord};

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Facilities of one snapshot, validated and partitioned against a threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Every input record, with `utilization_percentage` filled in.
    pub facilities: Vec<FacilityRecord>,
    pub overutilized: Vec<FacilityRecord>,
    pub underutilized: Vec<FacilityRecord>,
}

pub struct UtilizationClassifier {
    threshold: f64,
}

impl UtilizationClassifier {
    pub fn new(threshold: f64) -> Result<Self, ClassificationError> {
        if !threshold.is_finite() {
            return Err(ClassificationError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validates a record and returns a copy carrying its utilization.
    pub fn resolve(&self, record: &FacilityRecord) -> Result<FacilityRecord, ClassifyError> {
        let label = if record.id.trim().is_empty() {
            record.name.clone()
        } else {
            record.id.clone()
        };

        for (field, value) in [
            ("id", &record.id),
            ("name", &record.name),
            ("region", &record.region),
            ("manager_name", &record.manager_name),
            ("manager_email", &record.manager_email),
        ] {
            if value.trim().is_empty() {
                return Err(DataError::MissingField {
                    record: label,
                    field,
                }
                .into());
            }
        }

        if record.total_capacity <= 0 {
            return Err(DataError::NonPositiveCapacity {
                id: record.id.clone(),
                capacity: record.total_capacity,
            }
            .into());
        }
        if record.current_load < 0 {
            return Err(DataError::NegativeLoad {
                id: record.id.clone(),
                load: record.current_load,
            }
            .into());
        }

        let utilization = match record.utilization_percentage {
            Some(value) if !value.is_finite() => {
                return Err(ClassificationError::InvalidUtilization {
                    id: record.id.clone(),
                    value,
                }
                .into());
            }
            Some(value) => value,
            // Capacity was checked above, so this always yields a value.
            None => utilization_percentage(record.current_load, record.total_capacity)
                .unwrap_or_default(),
        };

        let mut resolved = record.clone();
        resolved.utilization_percentage = Some(utilization);
        Ok(resolved)
    }

    /// Partitions records strictly above and strictly below the threshold.
    ///
    /// Records sitting exactly on the threshold land in neither set. Relative
    /// input order is preserved in every output list.
    pub fn classify(&self, records: &[FacilityRecord]) -> Result<Classification, ClassifyError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut classification = Classification {
            facilities: Vec::with_capacity(records.len()),
            ..Classification::default()
        };

        for record in records {
            let resolved = self.resolve(record)?;
            if !seen.insert(resolved.id.clone()) {
                return Err(DataError::DuplicateId(resolved.id).into());
            }

            let utilization = resolved.utilization_percentage.unwrap_or_default();
            if utilization > self.threshold {
                classification.overutilized.push(resolved.clone());
            } else if utilization < self.threshold {
                classification.underutilized.push(resolved.clone());
            }
            classification.facilities.push(resolved);
        }

        Ok(classification)
    }
}
