use serde::Deserialize;

use crate::error::DataError;
use crate::model::FacilityRecord;

/// One facility row as it appears in an input file, before presence checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacilityRow {
    #[serde(default, alias = "Warehouse_ID")]
    pub id: Option<String>,
    #[serde(default, alias = "Warehouse_Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Region")]
    pub region: Option<String>,
    #[serde(default, alias = "Total_Capacity_Pallets")]
    pub total_capacity: Option<i64>,
    #[serde(default, alias = "Current_Pallets")]
    pub current_load: Option<i64>,
    #[serde(default, alias = "Branch_Manager_Name")]
    pub manager_name: Option<String>,
    #[serde(default, alias = "Branch_Manager_Email")]
    pub manager_email: Option<String>,
    #[serde(default, alias = "Utilization_Percentage")]
    pub utilization_percentage: Option<f64>,
}

impl FacilityRow {
    /// Converts into a record, failing on the first absent required field.
    ///
    /// `position` is the zero-based row index, used to label rows without an id.
    pub fn into_record(self, position: usize) -> Result<FacilityRecord, DataError> {
        let label = self
            .id
            .clone()
            .unwrap_or_else(|| format!("#{}", position + 1));
        let missing = |field: &'static str| DataError::MissingField {
            record: label.clone(),
            field,
        };

        Ok(FacilityRecord {
            id: self.id.clone().ok_or_else(|| missing("id"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            region: self.region.ok_or_else(|| missing("region"))?,
            total_capacity: self.total_capacity.ok_or_else(|| missing("total_capacity"))?,
            current_load: self.current_load.ok_or_else(|| missing("current_load"))?,
            manager_name: self.manager_name.ok_or_else(|| missing("manager_name"))?,
            manager_email: self.manager_email.ok_or_else(|| missing("manager_email"))?,
            utilization_percentage: self.utilization_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row() -> FacilityRow {
        FacilityRow {
            id: Some("WH-1".to_string()),
            name: Some("Harbor".to_string()),
            region: Some("Coastal".to_string()),
            total_capacity: Some(500),
            current_load: Some(450),
            manager_name: Some("Ines Park".to_string()),
            manager_email: Some("ines@example.com".to_string()),
            utilization_percentage: None,
        }
    }

    #[test]
    fn test_complete_row_converts() {
        let record = complete_row().into_record(0).unwrap();
        assert_eq!(record.id, "WH-1");
        assert_eq!(record.total_capacity, 500);
        assert_eq!(record.utilization_percentage, None);
    }

    #[test]
    fn test_missing_capacity_names_field() {
        let row = FacilityRow {
            total_capacity: None,
            ..complete_row()
        };
        let err = row.into_record(3).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingField { ref record, field: "total_capacity" } if record == "WH-1"
        ));
    }

    #[test]
    fn test_missing_id_uses_row_position() {
        let row = FacilityRow {
            id: None,
            ..complete_row()
        };
        let err = row.into_record(4).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingField { ref record, field: "id" } if record == "#5"
        ));
    }
}
