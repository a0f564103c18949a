//! Departments - patient queues, staffing and derived load status.

use serde::{Deserialize, Serialize};

use crate::beds::BedData;
use crate::constants::utilization;

/// Load classification of a department, derived from utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentStatus {
    Stable,
    Warning,
    Critical,
}

impl DepartmentStatus {
    /// Status for a utilization percentage: >85 critical, >70 warning.
    pub fn from_utilization(utilization_pct: f64) -> Self {
        if utilization_pct > utilization::CRITICAL_ABOVE {
            DepartmentStatus::Critical
        } else if utilization_pct > utilization::WARNING_ABOVE {
            DepartmentStatus::Warning
        } else {
            DepartmentStatus::Stable
        }
    }
}

/// Rectangle on a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorLocation {
    pub floor: u8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FloorLocation {
    pub fn new(floor: u8, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            floor,
            x,
            y,
            width,
            height,
        }
    }
}

/// A hospital department and its live queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub current_queue: u32,
    /// Minutes.
    pub avg_wait_time: u32,
    /// Signed percentage change of the queue over the last tick.
    pub trend: i32,
    pub status: DepartmentStatus,
    /// Percent of capacity, 0-100.
    pub utilization: f64,
    pub capacity: u32,
    pub staff: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<BedData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FloorLocation>,
}

impl Department {
    /// Create a department with an empty queue. Capacity and staff are
    /// raised to at least 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32, staff: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_queue: 0,
            avg_wait_time: 0,
            trend: 0,
            status: DepartmentStatus::Stable,
            utilization: 0.0,
            capacity: capacity.max(1),
            staff: staff.max(1),
            beds: None,
            location: None,
        }
    }

    pub fn with_beds(mut self, beds: BedData) -> Self {
        self.beds = Some(beds);
        self
    }

    pub fn with_location(mut self, location: FloorLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the queue and recompute utilization and status from it.
    pub fn with_queue(mut self, queue: u32) -> Self {
        self.set_queue(queue);
        self
    }

    /// Replace the queue length, keeping utilization and status in step.
    pub fn set_queue(&mut self, queue: u32) {
        self.current_queue = queue;
        self.utilization = utilization_for(queue, self.capacity);
        self.status = DepartmentStatus::from_utilization(self.utilization);
    }

    /// Queue, utilization and status agree with each other.
    pub fn is_consistent(&self) -> bool {
        (0.0..=100.0).contains(&self.utilization)
            && (self.utilization - utilization_for(self.current_queue, self.capacity)).abs() < 1e-9
            && self.status == DepartmentStatus::from_utilization(self.utilization)
            && self.beds.as_ref().map_or(true, BedData::is_consistent)
    }
}

/// `min(100, queue / capacity × 100)`. A zero capacity counts as 1.
pub fn utilization_for(queue: u32, capacity: u32) -> f64 {
    let capacity = capacity.max(1) as f64;
    (queue as f64 / capacity * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(DepartmentStatus::from_utilization(0.0), DepartmentStatus::Stable);
        assert_eq!(DepartmentStatus::from_utilization(70.0), DepartmentStatus::Stable);
        assert_eq!(DepartmentStatus::from_utilization(70.1), DepartmentStatus::Warning);
        assert_eq!(DepartmentStatus::from_utilization(85.0), DepartmentStatus::Warning);
        assert_eq!(DepartmentStatus::from_utilization(85.5), DepartmentStatus::Critical);
        assert_eq!(DepartmentStatus::from_utilization(100.0), DepartmentStatus::Critical);
    }

    #[test]
    fn test_utilization_clamps_to_100() {
        let dept = Department::new("er", "Emergency", 50, 8).with_queue(100);
        assert_eq!(dept.utilization, 100.0);
        assert_eq!(dept.status, DepartmentStatus::Critical);
        assert!(dept.is_consistent());
    }

    #[test]
    fn test_zero_capacity_guarded() {
        assert_eq!(utilization_for(3, 0), 100.0);
        assert_eq!(utilization_for(0, 0), 0.0);
        assert_eq!(Department::new("x", "X", 0, 0).capacity, 1);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&DepartmentStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
