//! Hospital-wide rollup metrics derived from the department collection.

use serde::{Deserialize, Serialize};

use crate::department::Department;

/// Headline metrics plus their change since the previous snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_patients: u32,
    /// Queue-weighted mean wait, minutes.
    pub avg_wait_time: u32,
    /// Mean department utilization, percent.
    pub bed_utilization: u32,
    /// 0-100.
    pub efficiency: u32,
    pub patient_change: i32,
    pub wait_time_change: i32,
    pub utilization_change: i32,
    pub efficiency_change: i32,
}

/// Compute the snapshot for `departments`; change fields are relative to
/// `previous`. An empty collection yields zero metrics.
pub fn compute_kpis(departments: &[Department], previous: &KpiSnapshot) -> KpiSnapshot {
    let total_patients: u32 = departments.iter().map(|d| d.current_queue).sum();

    let avg_wait_time = if total_patients == 0 {
        0
    } else {
        let weighted: u64 = departments
            .iter()
            .map(|d| d.avg_wait_time as u64 * d.current_queue as u64)
            .sum();
        (weighted / total_patients as u64) as u32
    };

    let bed_utilization = if departments.is_empty() {
        0
    } else {
        let sum: f64 = departments.iter().map(|d| d.utilization).sum();
        (sum / departments.len() as f64).floor() as u32
    };

    let efficiency = efficiency_score(avg_wait_time as f64, bed_utilization as f64);

    KpiSnapshot {
        total_patients,
        avg_wait_time,
        bed_utilization,
        efficiency,
        patient_change: percent_change(total_patients, previous.total_patients),
        wait_time_change: percent_change(avg_wait_time, previous.avg_wait_time),
        utilization_change: percent_change(bed_utilization, previous.bed_utilization),
        efficiency_change: percent_change(efficiency, previous.efficiency),
    }
}

/// `clamp(0, 100, 100 − 0.5 × wait − |utilization − 75|)`, floored.
pub fn efficiency_score(avg_wait_time: f64, utilization: f64) -> u32 {
    let raw = 100.0 - avg_wait_time * 0.5 - (utilization - 75.0).abs();
    raw.clamp(0.0, 100.0).floor() as u32
}

/// `floor((current − previous) / max(previous, 1) × 100)`.
pub fn percent_change(current: u32, previous: u32) -> i32 {
    let delta = current as f64 - previous as f64;
    (delta / previous.max(1) as f64 * 100.0).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(queue: u32, wait: u32, capacity: u32) -> Department {
        let mut d = Department::new("d", "D", capacity, 5).with_queue(queue);
        d.avg_wait_time = wait;
        d
    }

    #[test]
    fn test_weighted_wait_and_totals() {
        let depts = vec![dept(10, 20, 50), dept(30, 40, 50)];
        let kpis = compute_kpis(&depts, &KpiSnapshot::default());
        assert_eq!(kpis.total_patients, 40);
        // (10*20 + 30*40) / 40 = 35
        assert_eq!(kpis.avg_wait_time, 35);
        // (20% + 60%) / 2
        assert_eq!(kpis.bed_utilization, 40);
    }

    #[test]
    fn test_empty_departments_guarded() {
        let kpis = compute_kpis(&[], &KpiSnapshot::default());
        assert_eq!(kpis, KpiSnapshot::default());
    }

    #[test]
    fn test_zero_patients_guarded() {
        let depts = vec![dept(0, 30, 50)];
        let kpis = compute_kpis(&depts, &KpiSnapshot::default());
        assert_eq!(kpis.avg_wait_time, 0);
    }

    #[test]
    fn test_efficiency_extremes() {
        assert_eq!(efficiency_score(1000.0, 0.0), 0);
        assert_eq!(efficiency_score(1000.0, 100.0), 0);
        assert_eq!(efficiency_score(0.0, 75.0), 100);
        assert_eq!(efficiency_score(10.0, 75.0), 95);
    }

    #[test]
    fn test_percent_change_against_previous() {
        assert_eq!(percent_change(50, 40), 25);
        assert_eq!(percent_change(30, 40), -25);
        assert_eq!(percent_change(5, 0), 500);
        assert_eq!(percent_change(0, 0), 0);
    }

    #[test]
    fn test_changes_use_previous_snapshot() {
        let previous = KpiSnapshot {
            total_patients: 20,
            avg_wait_time: 10,
            bed_utilization: 20,
            efficiency: 50,
            ..Default::default()
        };
        let depts = vec![dept(40, 20, 100)];
        let kpis = compute_kpis(&depts, &previous);
        assert_eq!(kpis.patient_change, 100);
        assert_eq!(kpis.wait_time_change, 100);
        assert_eq!(kpis.utilization_change, 100);
    }
}
