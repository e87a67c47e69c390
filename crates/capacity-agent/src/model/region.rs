use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::facility::FacilityRecord;

/// Facilities partitioned by region.
///
/// Regions keep the order in which they were first seen, and facilities keep
/// their original relative order within a region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionGroups {
    groups: Vec<(String, Vec<FacilityRecord>)>,
}

impl RegionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a facility to its region, opening the region if unseen.
    pub fn push(&mut self, facility: FacilityRecord) {
        match self
            .groups
            .iter_mut()
            .find(|(region, _)| *region == facility.region)
        {
            Some((_, members)) => members.push(facility),
            None => self.groups.push((facility.region.clone(), vec![facility])),
        }
    }

    pub fn get(&self, region: &str) -> Option<&[FacilityRecord]> {
        self.groups
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, members)| members.as_slice())
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FacilityRecord])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for RegionGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (region, members) in &self.groups {
            map.serialize_entry(region, members)?;
        }
        map.end()
    }
}
