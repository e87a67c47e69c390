use crate::model::{FacilityRecord, RegionGroups};

/// Groups every facility by region without filtering anything out.
pub fn group_by_region(facilities: &[FacilityRecord]) -> RegionGroups {
    let mut groups = RegionGroups::new();
    for facility in facilities {
        groups.push(facility.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: &str, region: &str) -> FacilityRecord {
        FacilityRecord {
            id: id.to_string(),
            name: id.to_string(),
            region: region.to_string(),
            total_capacity: 100,
            current_load: 50,
            manager_name: "M".to_string(),
            manager_email: "m@example.com".to_string(),
            utilization_percentage: None,
        }
    }

    #[test]
    fn test_regions_in_first_seen_order() {
        let groups = group_by_region(&[
            facility("1", "West"),
            facility("2", "East"),
            facility("3", "West"),
            facility("4", "South"),
        ]);

        assert_eq!(groups.regions().collect::<Vec<_>>(), vec!["West", "East", "South"]);
    }

    #[test]
    fn test_members_keep_relative_order() {
        let groups = group_by_region(&[
            facility("1", "West"),
            facility("2", "East"),
            facility("3", "West"),
        ]);

        let west: Vec<&str> = groups
            .get("West")
            .unwrap()
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(west, vec!["1", "3"]);
        assert!(groups.get("North").is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_region(&[]).is_empty());
    }
}
