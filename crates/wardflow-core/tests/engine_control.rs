use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::RngCore;
use wardflow_core::config::TickPeriods;
use wardflow_core::error::ForecastError;
use wardflow_core::forecast::{Forecaster, SyntheticForecaster};
use wardflow_core::prelude::*;
use wardflow_logic::prediction::ForecastInput;

fn fast_config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::seeded(seed);
    config.periods = TickPeriods {
        patient_flow_ms: 2,
        predictions_ms: 3,
        beds_ms: 2,
        equipment_ms: 3,
        ambulances_ms: 2,
    };
    config
}

/// Always fails, counting calls.
struct Unreachable {
    calls: AtomicUsize,
}

impl Forecaster for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn forecast(&self, _: &ForecastInput, _: &mut dyn RngCore) -> Result<u32, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ForecastError::Transport("connection refused".into()))
    }
}

/// Panics on every call, counting calls.
struct Exploding {
    calls: AtomicUsize,
}

impl Forecaster for Exploding {
    fn name(&self) -> &str {
        "exploding"
    }

    fn forecast(&self, _: &ForecastInput, _: &mut dyn RngCore) -> Result<u32, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("forecaster blew up");
    }
}

#[test]
fn test_panicking_tick_is_skipped_and_timers_keep_running() {
    let forecaster = Arc::new(Exploding {
        calls: AtomicUsize::new(0),
    });
    let mut engine = HospitalEngine::with_components(
        fast_config(16),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        forecaster.clone(),
    )
    .unwrap();
    let predictions = engine.snapshot().predictions.clone();

    engine.start().unwrap();
    thread::sleep(Duration::from_millis(60));
    let midway = engine.snapshot().revision;
    thread::sleep(Duration::from_millis(60));
    assert!(engine.stop());

    let snap = engine.snapshot();
    assert!(forecaster.calls.load(Ordering::SeqCst) > 1);
    assert!(snap.revision > midway);
    // Every prediction tick panicked before publishing
    assert_eq!(snap.predictions, predictions);
}

#[test]
fn test_readers_see_consistent_snapshots_while_running() {
    let mut engine = HospitalEngine::with_components(
        fast_config(11),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        Arc::new(SyntheticForecaster),
    )
    .unwrap();
    let store = engine.store();
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut seen = 0;
            while !done.load(Ordering::SeqCst) {
                let snap = store.get();
                for dept in &snap.departments {
                    assert!(dept.is_consistent(), "{:?}", dept);
                }
                // Derivation lands in the same publish as the departments
                assert_eq!(snap.kpis.total_patients, snap.total_queue());
                seen += 1;
            }
            seen
        })
    };

    engine.start().unwrap();
    thread::sleep(Duration::from_millis(150));
    engine.stop();
    done.store(true, Ordering::SeqCst);

    assert!(reader.join().unwrap() > 0);
}

#[test]
fn test_failing_forecaster_never_stops_predictions() {
    let forecaster = Arc::new(Unreachable {
        calls: AtomicUsize::new(0),
    });
    let mut engine = HospitalEngine::with_components(
        SimulationConfig::seeded(12),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        forecaster.clone(),
    )
    .unwrap();

    let before = engine.snapshot().predictions.last().unwrap().timestamp;
    for _ in 0..3 {
        engine.step(TickKind::Predictions);
    }

    let snap = engine.snapshot();
    assert_eq!(forecaster.calls.load(Ordering::SeqCst), 3);
    assert_eq!(snap.predictions.len(), 24);
    assert_eq!(
        snap.predictions.last().unwrap().timestamp,
        before + 3 * wardflow_logic::constants::HOUR_MS
    );
}

#[test]
fn test_independent_engines_coexist() {
    let mut a = HospitalEngine::with_components(
        fast_config(13),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        Arc::new(SyntheticForecaster),
    )
    .unwrap();
    let b = HospitalEngine::with_components(
        fast_config(14),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        Arc::new(SyntheticForecaster),
    )
    .unwrap();

    let b_revision = b.snapshot().revision;
    a.start().unwrap();
    thread::sleep(Duration::from_millis(40));
    a.stop();

    assert!(a.snapshot().revision > b_revision);
    assert_eq!(b.snapshot().revision, b_revision);
    assert!(!b.is_running());
}

#[test]
fn test_restart_after_reset() {
    let mut engine = HospitalEngine::with_components(
        fast_config(15),
        Arc::new(ManualClock::at_utc(2024, 2, 2, 12)),
        Arc::new(SyntheticForecaster),
    )
    .unwrap();

    engine.start().unwrap();
    engine.reset();
    assert!(!engine.is_running());

    let frozen = engine.snapshot().revision;
    assert!(engine.start().unwrap());
    thread::sleep(Duration::from_millis(40));
    assert!(engine.stop());
    assert!(engine.snapshot().revision > frozen);
}
