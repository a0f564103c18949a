//! Bed occupancy per department and per ward section.

use serde::{Deserialize, Serialize};

use crate::constants::occupancy;

/// Occupancy band of a bed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Low,
    Medium,
    High,
    Full,
}

impl SectionStatus {
    /// Band for `occupied / total`: ≥95 full, ≥75 high, ≥50 medium.
    /// An empty section (total 0) is `Low`.
    pub fn from_occupancy(occupied: u32, total: u32) -> Self {
        if total == 0 {
            return SectionStatus::Low;
        }
        let rate = occupied as f64 / total as f64 * 100.0;
        if rate >= occupancy::FULL_AT {
            SectionStatus::Full
        } else if rate >= occupancy::HIGH_AT {
            SectionStatus::High
        } else if rate >= occupancy::MEDIUM_AT {
            SectionStatus::Medium
        } else {
            SectionStatus::Low
        }
    }
}

/// A named group of beds inside a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedSection {
    pub id: String,
    pub name: String,
    pub total: u32,
    pub occupied: u32,
    pub status: SectionStatus,
}

impl BedSection {
    /// Build a section; occupancy is clamped to `total` and status derived.
    pub fn new(id: impl Into<String>, name: impl Into<String>, total: u32, occupied: u32) -> Self {
        let occupied = occupied.min(total);
        Self {
            id: id.into(),
            name: name.into(),
            total,
            occupied,
            status: SectionStatus::from_occupancy(occupied, total),
        }
    }

    /// Move occupancy by `delta` beds, clamped to `[0, total]`.
    pub fn shift_occupancy(&mut self, delta: i32) {
        self.occupied = clamp_step(self.occupied, delta, self.total);
        self.status = SectionStatus::from_occupancy(self.occupied, self.total);
    }

    pub fn is_consistent(&self) -> bool {
        self.occupied <= self.total
            && self.status == SectionStatus::from_occupancy(self.occupied, self.total)
    }
}

/// Bed counts for a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedData {
    pub total: u32,
    pub occupied: u32,
    pub reserved: u32,
    pub maintenance: u32,
    /// Expected occupancy over the next few hours, percent.
    pub projected_occupancy: u32,
    pub sections: Vec<BedSection>,
}

impl BedData {
    /// Beds that can hold a patient right now: not reserved, not in maintenance.
    pub fn occupiable(&self) -> u32 {
        self.total
            .saturating_sub(self.maintenance)
            .saturating_sub(self.reserved)
    }

    pub fn available(&self) -> u32 {
        self.occupiable().saturating_sub(self.occupied)
    }

    pub fn occupancy_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.occupied as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.occupied + self.reserved + self.maintenance <= self.total
            && self.projected_occupancy <= 100
            && self.sections.iter().all(BedSection::is_consistent)
    }
}

/// `value + delta` clamped to `[0, max]`.
pub(crate) fn clamp_step(value: u32, delta: i32, max: u32) -> u32 {
    (value as i64 + delta as i64).clamp(0, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_status_bands() {
        assert_eq!(SectionStatus::from_occupancy(10, 10), SectionStatus::Full);
        assert_eq!(SectionStatus::from_occupancy(19, 20), SectionStatus::Full);
        assert_eq!(SectionStatus::from_occupancy(9, 10), SectionStatus::High);
        assert_eq!(SectionStatus::from_occupancy(3, 4), SectionStatus::High);
        assert_eq!(SectionStatus::from_occupancy(5, 10), SectionStatus::Medium);
        assert_eq!(SectionStatus::from_occupancy(4, 10), SectionStatus::Low);
        assert_eq!(SectionStatus::from_occupancy(0, 0), SectionStatus::Low);
    }

    #[test]
    fn test_section_shift_clamps() {
        let mut section = BedSection::new("a", "Zone A", 2, 2);
        section.shift_occupancy(1);
        assert_eq!(section.occupied, 2);
        assert_eq!(section.status, SectionStatus::Full);

        section.shift_occupancy(-5);
        assert_eq!(section.occupied, 0);
        assert_eq!(section.status, SectionStatus::Low);
    }

    #[test]
    fn test_new_section_clamps_occupied() {
        let section = BedSection::new("a", "Zone A", 5, 9);
        assert_eq!(section.occupied, 5);
        assert!(section.is_consistent());
    }

    #[test]
    fn test_occupiable_excludes_reserved_and_maintenance() {
        let beds = BedData {
            total: 30,
            occupied: 24,
            reserved: 3,
            maintenance: 1,
            projected_occupancy: 85,
            sections: Vec::new(),
        };
        assert_eq!(beds.occupiable(), 26);
        assert_eq!(beds.available(), 2);
        assert!(beds.is_consistent());
    }
}
