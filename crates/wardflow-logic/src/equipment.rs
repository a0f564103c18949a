//! Equipment units and their hourly demand profile.

use serde::{Deserialize, Serialize};

use crate::constants::equipment::DEFAULT_DEMAND;
use crate::department::FloorLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Diagnostic,
    Surgical,
    Monitoring,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
    Reserved,
}

impl EquipmentStatus {
    /// Status an operational (non-reserved) unit shows for a usage level.
    pub fn for_usage(usage: u32) -> Self {
        if usage > 0 {
            EquipmentStatus::InUse
        } else {
            EquipmentStatus::Available
        }
    }
}

/// Expected demand for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDemand {
    /// 0-23.
    pub hour: u8,
    /// Percent, 0-100.
    pub demand: u32,
    pub maintenance_conflict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    /// Id of the owning department.
    pub department: String,
    pub status: EquipmentStatus,
    /// Percent, 0-100; always 0 while in maintenance.
    pub current_usage: u32,
    /// Epoch ms of the scheduled (or current) maintenance window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_scheduled: Option<i64>,
    /// Exactly 24 entries, indexed by hour.
    pub projected_demand: Vec<EquipmentDemand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FloorLocation>,
}

impl Equipment {
    /// Projected demand for `hour`, or the default when the profile has no
    /// entry for it.
    pub fn demand_at(&self, hour: u8) -> u32 {
        self.projected_demand
            .iter()
            .find(|d| d.hour == hour)
            .map(|d| d.demand)
            .unwrap_or(DEFAULT_DEMAND)
    }

    pub fn is_consistent(&self) -> bool {
        let usage_ok = self.current_usage <= 100
            && (self.status != EquipmentStatus::Maintenance || self.current_usage == 0);
        let profile_ok = self.projected_demand.len() == 24
            && self
                .projected_demand
                .iter()
                .enumerate()
                .all(|(i, d)| d.hour as usize == i && d.demand <= 100);
        usage_ok && profile_ok
    }
}

/// Hours between `a` and `b` around a 24-hour clock.
pub fn cyclic_hour_distance(a: u8, b: u8) -> u8 {
    let diff = (a as i16 - b as i16).unsigned_abs() % 24;
    diff.min(24 - diff) as u8
}

/// Demand before noise at `hour` for a curve peaking at `peak_hour`:
/// `max(5, 100 - 10 × distance)`.
pub fn base_demand(hour: u8, peak_hour: u8) -> u32 {
    let distance = cyclic_hour_distance(hour, peak_hour) as i32;
    (100 - 10 * distance).max(5) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_distance_wraps() {
        assert_eq!(cyclic_hour_distance(23, 1), 2);
        assert_eq!(cyclic_hour_distance(1, 23), 2);
        assert_eq!(cyclic_hour_distance(14, 14), 0);
        assert_eq!(cyclic_hour_distance(0, 12), 12);
    }

    #[test]
    fn test_base_demand_peaks_and_floors() {
        assert_eq!(base_demand(14, 14), 100);
        assert_eq!(base_demand(16, 14), 80);
        assert_eq!(base_demand(2, 14), 5);
    }

    #[test]
    fn test_status_serializes_kebab() {
        let json = serde_json::to_string(&EquipmentStatus::InUse).unwrap();
        assert_eq!(json, "\"in-use\"");
    }

    #[test]
    fn test_demand_at_falls_back() {
        let unit = Equipment {
            id: "x".into(),
            name: "X".into(),
            kind: EquipmentType::Monitoring,
            department: "icu".into(),
            status: EquipmentStatus::Available,
            current_usage: 0,
            maintenance_scheduled: None,
            projected_demand: Vec::new(),
            location: None,
        };
        assert_eq!(unit.demand_at(3), DEFAULT_DEMAND);
        assert!(!unit.is_consistent());
    }
}
