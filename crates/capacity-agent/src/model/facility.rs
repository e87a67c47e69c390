use serde::{Deserialize, Serialize};

/// One storage facility as observed in a single snapshot.
///
/// `current_load` may exceed `total_capacity`; such a facility simply reports
/// more than 100% utilization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    pub region: String,
    pub total_capacity: i64,
    pub current_load: i64,
    pub manager_name: String,
    pub manager_email: String,
    /// Precomputed utilization in percent. Filled in by the classifier when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization_percentage: Option<f64>,
}

impl FacilityRecord {
    /// Utilization in percent, either as supplied or derived from load and capacity.
    ///
    /// Returns `None` when nothing was supplied and capacity is not positive.
    pub fn utilization(&self) -> Option<f64> {
        match self.utilization_percentage {
            Some(value) => Some(value),
            None => utilization_percentage(self.current_load, self.total_capacity),
        }
    }

    pub fn to_ref(&self) -> FacilityRef {
        FacilityRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity of a facility as carried on a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacilityRef {
    pub id: String,
    pub name: String,
}

/// `round(load / capacity * 100, 2)` with ties to even, or `None` for a
/// non-positive capacity.
pub fn utilization_percentage(current_load: i64, total_capacity: i64) -> Option<f64> {
    if total_capacity <= 0 {
        return None;
    }
    let raw = current_load as f64 / total_capacity as f64 * 100.0;
    Some((raw * 100.0).round_ties_even() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_rounds_to_two_decimals() {
        assert_eq!(utilization_percentage(100, 300), Some(33.33));
        assert_eq!(utilization_percentage(200, 300), Some(66.67));
        assert_eq!(utilization_percentage(95, 100), Some(95.0));
    }

    #[test]
    fn test_utilization_above_capacity() {
        assert_eq!(utilization_percentage(130, 100), Some(130.0));
    }

    #[test]
    fn test_utilization_requires_positive_capacity() {
        assert_eq!(utilization_percentage(10, 0), None);
        assert_eq!(utilization_percentage(10, -4), None);
    }

    #[test]
    fn test_supplied_utilization_wins() {
        let record = FacilityRecord {
            id: "W1".to_string(),
            name: "Harbor".to_string(),
            region: "West".to_string(),
            total_capacity: 100,
            current_load: 10,
            manager_name: "Ana".to_string(),
            manager_email: "ana@example.com".to_string(),
            utilization_percentage: Some(88.8),
        };
        assert_eq!(record.utilization(), Some(88.8));
        assert_eq!(record.to_ref().name, "Harbor");
    }
}
