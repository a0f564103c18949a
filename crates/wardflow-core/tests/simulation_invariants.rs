//! Invariants that must hold in every snapshot, whatever the seed.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use wardflow_core::prelude::*;
use wardflow_core::forecast::SyntheticForecaster;
use wardflow_logic::beds::SectionStatus;
use wardflow_logic::constants::HOUR_MS;
use wardflow_logic::department::DepartmentStatus;
use wardflow_logic::equipment::EquipmentStatus;

fn check_snapshot(state: &HospitalState, max_recommendations: usize) -> Result<(), TestCaseError> {
    for dept in &state.departments {
        prop_assert!((0.0..=100.0).contains(&dept.utilization));
        prop_assert_eq!(dept.status, DepartmentStatus::from_utilization(dept.utilization));
        prop_assert!(dept.is_consistent(), "{:?}", dept);

        if let Some(beds) = &dept.beds {
            prop_assert!(beds.is_consistent(), "{:?}", beds);
            for section in &beds.sections {
                prop_assert!(section.occupied <= section.total);
                prop_assert_eq!(
                    section.status,
                    SectionStatus::from_occupancy(section.occupied, section.total)
                );
            }
        }
    }

    prop_assert!(state.predictions.len() <= 25);
    for pair in state.predictions.windows(2) {
        prop_assert_eq!(pair[1].timestamp - pair[0].timestamp, HOUR_MS);
    }

    for amb in &state.ambulances {
        prop_assert_eq!(amb.status.is_moving(), amb.estimated_return_time.is_some());
    }

    for unit in &state.equipment {
        prop_assert!(unit.current_usage <= 100);
        if unit.status == EquipmentStatus::Maintenance {
            prop_assert_eq!(unit.current_usage, 0);
        }
    }

    prop_assert!(state.recommendations.len() <= max_recommendations);
    for pair in state.recommendations.windows(2) {
        prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
    }

    prop_assert!(state.kpis.efficiency <= 100);
    prop_assert_eq!(state.kpis.total_patients, state.total_queue());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn invariants_hold_over_virtual_time(seed in any::<u64>(), seconds in 1u32..240) {
        let clock = Arc::new(ManualClock::at_utc(2024, 6, 14, 7));
        let mut engine = HospitalEngine::with_components(
            SimulationConfig::seeded(seed),
            clock.clone(),
            Arc::new(SyntheticForecaster),
        )
        .unwrap();

        check_snapshot(&engine.snapshot(), 5)?;
        for _ in 0..seconds {
            clock.advance(Duration::from_secs(1));
            engine.update(Duration::from_secs(1));
            check_snapshot(&engine.snapshot(), 5)?;
        }
    }

    #[test]
    fn prediction_window_respected(seed in any::<u64>(), window in 1usize..30, ticks in 0usize..60) {
        let mut config = SimulationConfig::seeded(seed);
        config.prediction_window = window;
        let mut engine = HospitalEngine::with_components(
            config,
            Arc::new(ManualClock::at_utc(2024, 1, 1, 0)),
            Arc::new(SyntheticForecaster),
        )
        .unwrap();

        for _ in 0..ticks {
            engine.step(TickKind::Predictions);
        }
        // The seeded series has 25 points; the window applies from the first append
        let expected = if ticks == 0 { 25 } else { (25 + ticks).min(window) };
        prop_assert_eq!(engine.snapshot().predictions.len(), expected);
    }
}
