//! Property tests for the derivation rules.
//!
//! Exercises: Department queue → utilization/status, KPI rollup,
//! recommendation ordering and truncation over arbitrary inputs.

use proptest::collection;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wardflow_logic::department::{Department, DepartmentStatus};
use wardflow_logic::kpi::{compute_kpis, efficiency_score, KpiSnapshot};
use wardflow_logic::recommendations::{
    generate_recommendations, RecommendationPolicy, TieBreak,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn department_strategy() -> impl Strategy<Value = Department> {
    (0u32..500, 1u32..200, 1u32..30, 0u32..300).prop_map(|(queue, capacity, staff, wait)| {
        let mut dept = Department::new("d", "Dept", capacity, staff).with_queue(queue);
        dept.avg_wait_time = wait;
        dept
    })
}

fn tie_break_strategy() -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::Insertion),
        Just(TieBreak::Confidence),
        Just(TieBreak::Department),
    ]
}

// ── Properties ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn utilization_bounded_and_status_matches(queue in 0u32..10_000, capacity in 0u32..1_000) {
        let dept = Department::new("d", "Dept", capacity, 3).with_queue(queue);
        prop_assert!(dept.utilization >= 0.0 && dept.utilization <= 100.0);
        prop_assert_eq!(dept.status, DepartmentStatus::from_utilization(dept.utilization));
        prop_assert!(dept.is_consistent());
    }

    #[test]
    fn efficiency_always_in_range(wait in 0.0f64..100_000.0, utilization in 0.0f64..=100.0) {
        let score = efficiency_score(wait, utilization);
        prop_assert!(score <= 100);
    }

    #[test]
    fn kpis_stay_in_range(depts in collection::vec(department_strategy(), 0..12)) {
        let kpis = compute_kpis(&depts, &KpiSnapshot::default());
        prop_assert!(kpis.efficiency <= 100);
        prop_assert!(kpis.bed_utilization <= 100);
        prop_assert_eq!(kpis.total_patients, depts.iter().map(|d| d.current_queue).sum::<u32>());
        if let Some(max_wait) = depts.iter().filter(|d| d.current_queue > 0).map(|d| d.avg_wait_time).max() {
            prop_assert!(kpis.avg_wait_time <= max_wait);
        }
    }

    #[test]
    fn recommendations_capped_and_sorted(
        depts in collection::vec(department_strategy(), 0..20),
        seed in any::<u64>(),
        tie_break in tie_break_strategy(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let policy = RecommendationPolicy { max_items: 5, tie_break };
        let recs = generate_recommendations(&depts, &policy, &mut rng);
        prop_assert!(recs.len() <= 5);
        for pair in recs.windows(2) {
            prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
        }
        for rec in &recs {
            prop_assert!(rec.confidence <= 100);
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn overloaded_department_clamps_to_critical() {
    let dept = Department::new("emergency", "Emergency", 50, 8).with_queue(100);
    assert_eq!(dept.utilization, 100.0);
    assert_eq!(dept.status, DepartmentStatus::Critical);
}

#[test]
fn efficiency_extremes_clamp() {
    let mut hot = Department::new("a", "A", 10, 2).with_queue(10);
    hot.avg_wait_time = 1000;
    let mut idle = Department::new("b", "B", 10, 2).with_queue(0);
    idle.avg_wait_time = 1000;

    let kpis = compute_kpis(&[hot], &KpiSnapshot::default());
    assert_eq!(kpis.efficiency, 0);
    let kpis = compute_kpis(&[idle], &KpiSnapshot::default());
    assert!(kpis.efficiency <= 100);
    assert_eq!(efficiency_score(1000.0, 0.0), 0);
    assert_eq!(efficiency_score(1000.0, 100.0), 0);
}
