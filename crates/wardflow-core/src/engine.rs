//! Hospital engine - owns the state store, the tick runner and the scheduler
//! for one simulation. Engines are independent; several can run side by
//! side in one process.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wardflow_logic::kpi::KpiSnapshot;
use wardflow_logic::recommendations::RecommendationPolicy;
use wardflow_logic::time::SimTime;

use crate::clock::{Clock, SystemClock};
use crate::config::SimulationConfig;
use crate::error::EngineResult;
use crate::forecast::{forecaster_for, Forecaster};
use crate::generation::*;
use crate::runner::{TickKind, TickRunner};
use crate::scheduler::Scheduler;
use crate::store::{HospitalState, Slice, StateStore};
use crate::systems::derived_slices;

/// Main simulation engine
pub struct HospitalEngine {
    config: SimulationConfig,
    clock: Arc<dyn Clock>,
    store: Arc<StateStore>,
    runner: Arc<TickRunner>,
    scheduler: Scheduler,
    rng: StdRng,
    /// Virtual time since each processor last fired under `update`.
    since_last: [Duration; 5],
}

impl HospitalEngine {
    /// Engine on wall-clock time with the forecaster the config selects.
    pub fn new(config: SimulationConfig) -> EngineResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SimulationConfig, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        let forecaster = forecaster_for(&config.forecast);
        Self::with_components(config, clock, forecaster)
    }

    /// Fully injected constructor. Validates `config` and seeds every
    /// collection.
    pub fn with_components(
        config: SimulationConfig,
        clock: Arc<dyn Clock>,
        forecaster: Arc<dyn Forecaster>,
    ) -> EngineResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let store = Arc::new(StateStore::default());
        let now = clock.now();
        let policy = config.recommendations;
        store.modify(|state| fresh_slices(&now, &state.kpis, &policy, &mut rng));

        let runner = Arc::new(TickRunner::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            forecaster,
            config.recommendations,
            config.prediction_window,
        ));

        info!(
            "hospital engine ready: {} departments, {} equipment units, {} ambulances",
            store.get().departments.len(),
            store.get().equipment.len(),
            store.get().ambulances.len()
        );

        Ok(Self {
            config,
            clock,
            store,
            runner,
            scheduler: Scheduler::new(),
            rng,
            since_last: [Duration::ZERO; 5],
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current consistent view of every collection.
    pub fn snapshot(&self) -> Arc<HospitalState> {
        self.store.get()
    }

    /// Shared handle for readers on other threads.
    pub fn store(&self) -> Arc<StateStore> {
        Arc::clone(&self.store)
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Start the five timers. `Ok(false)` if already running.
    pub fn start(&mut self) -> EngineResult<bool> {
        if self.scheduler.is_running() {
            return Ok(false);
        }

        self.store.replace(Slice::Running(true));
        match self
            .scheduler
            .start(Arc::clone(&self.runner), &self.config.periods, &mut self.rng)
        {
            Ok(started) => {
                info!("simulation started");
                Ok(started)
            }
            Err(e) => {
                self.store.replace(Slice::Running(false));
                Err(e)
            }
        }
    }

    /// Cancel the timers, keeping all state. `false` if not running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.scheduler.stop();
        if stopped {
            self.store.replace(Slice::Running(false));
            info!("simulation stopped");
        }
        stopped
    }

    /// Stop, regenerate every collection and recompute KPIs and
    /// recommendations. KPI changes are relative to the pre-reset KPIs.
    pub fn reset(&mut self) {
        self.stop();

        let now = self.clock.now();
        let policy = self.config.recommendations;
        let rng = &mut self.rng;
        self.store
            .modify(|state| fresh_slices(&now, &state.kpis, &policy, rng));
        self.since_last = [Duration::ZERO; 5];

        info!("simulation reset");
    }

    /// Run one processor immediately, outside the scheduler.
    pub fn step(&mut self, kind: TickKind) {
        self.runner.run(kind, &mut self.rng);
    }

    /// Advance virtual time by `delta` and run every processor whose period
    /// has elapsed, at most once each. The remainder past the period carries
    /// into the next call. Processors read the time from the engine's clock,
    /// so virtual-time drivers advance a `ManualClock` alongside.
    pub fn update(&mut self, delta: Duration) {
        for kind in TickKind::ALL {
            let period = kind.period(&self.config.periods);
            let slot = &mut self.since_last[kind.index()];
            *slot += delta;
            if *slot >= period {
                // Whole periods beyond the first are dropped
                *slot = carry_over(*slot, period);
                self.runner.run(kind, &mut self.rng);
            }
        }
    }
}

fn carry_over(elapsed: Duration, period: Duration) -> Duration {
    let rem = elapsed.as_nanos() % period.as_nanos();
    Duration::from_nanos(rem as u64)
}

/// Every collection freshly generated, plus the KPIs and recommendations
/// derived from the new departments.
fn fresh_slices<R: Rng>(
    now: &SimTime,
    previous: &KpiSnapshot,
    policy: &RecommendationPolicy,
    rng: &mut R,
) -> Vec<Slice> {
    let departments = generate_departments(rng);
    let [kpis, recommendations] = derived_slices(&departments, previous, policy, rng);

    vec![
        Slice::Predictions(generate_predictions(now, rng)),
        Slice::Equipment(generate_equipment(now.epoch_ms, rng)),
        Slice::Ambulances(generate_ambulances(now.epoch_ms)),
        Slice::Departments(departments),
        kpis,
        recommendations,
        Slice::Running(false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::TickPeriods;
    use crate::error::{ConfigError, EngineError};
    use crate::forecast::SyntheticForecaster;
    use std::thread;
    use wardflow_logic::constants::HOUR_MS;
    use wardflow_logic::kpi::percent_change;

    fn engine(seed: u64) -> HospitalEngine {
        HospitalEngine::with_components(
            SimulationConfig::seeded(seed),
            Arc::new(ManualClock::at_utc(2024, 3, 4, 9)),
            Arc::new(SyntheticForecaster),
        )
        .unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine(1);
        let snap = engine.snapshot();
        assert_eq!(snap.departments.len(), 4);
        assert_eq!(snap.equipment.len(), 6);
        assert_eq!(snap.ambulances.len(), 5);
        assert_eq!(snap.predictions.len(), 25);
        assert_eq!(snap.kpis.total_patients, snap.total_queue());
        assert!(!snap.is_running);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::seeded(1);
        config.prediction_window = 0;
        let err = HospitalEngine::new(config).err().unwrap();
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_same_seed_same_state() {
        let a = engine(7);
        let b = engine(7);
        assert_eq!(a.snapshot().departments, b.snapshot().departments);
        assert_eq!(a.snapshot().equipment, b.snapshot().equipment);
    }

    #[test]
    fn test_step_predictions_slides_window() {
        let mut engine = engine(2);
        let last = engine.snapshot().predictions.last().unwrap().timestamp;
        engine.step(TickKind::Predictions);
        let snap = engine.snapshot();
        assert_eq!(snap.predictions.len(), 24);
        assert_eq!(snap.predictions.last().unwrap().timestamp, last + HOUR_MS);
    }

    #[test]
    fn test_engine_update_multi_rate() {
        let mut engine = engine(3);
        let start = engine.snapshot().revision;

        // 10 s of virtual time: flow ×5, predictions ×1, beds ×3, equipment ×2, ambulances ×2
        for _ in 0..10 {
            engine.update(Duration::from_secs(1));
        }
        assert_eq!(engine.snapshot().revision - start, 13);
    }

    #[test]
    fn test_update_carries_remainder() {
        let mut engine = engine(8);
        let start = engine.snapshot().revision;

        // 6 s in 1.5 s steps: flow ×3, predictions ×0, beds ×2, equipment ×1, ambulances ×1
        for _ in 0..4 {
            engine.update(Duration::from_millis(1_500));
        }
        assert_eq!(engine.snapshot().revision - start, 7);
        assert_eq!(
            carry_over(Duration::from_secs(3), Duration::from_secs(2)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut engine = engine(4);
        assert!(engine.start().unwrap());
        assert!(!engine.start().unwrap());
        assert!(engine.snapshot().is_running);
        assert!(engine.stop());
        assert!(!engine.stop());
        assert!(!engine.snapshot().is_running);
    }

    #[test]
    fn test_reset_stops_timers() {
        let mut config = SimulationConfig::seeded(5);
        config.periods = TickPeriods {
            patient_flow_ms: 5,
            predictions_ms: 5,
            beds_ms: 5,
            equipment_ms: 5,
            ambulances_ms: 5,
        };
        let mut engine = HospitalEngine::with_components(
            config,
            Arc::new(ManualClock::at_utc(2024, 3, 4, 9)),
            Arc::new(SyntheticForecaster),
        )
        .unwrap();

        engine.start().unwrap();
        thread::sleep(Duration::from_millis(50));
        engine.reset();

        let after = engine.snapshot();
        assert!(!after.is_running);
        assert!(!engine.is_running());
        thread::sleep(Duration::from_millis(50));
        assert_eq!(engine.snapshot().revision, after.revision);
    }

    #[test]
    fn test_reset_kpis_relative_to_previous() {
        let mut engine = engine(6);
        for _ in 0..5 {
            engine.step(TickKind::PatientFlow);
        }
        let before = engine.snapshot();
        engine.reset();
        let after = engine.snapshot();

        assert_eq!(after.previous_kpis, before.kpis);
        assert_eq!(
            after.kpis.patient_change,
            percent_change(after.kpis.total_patients, before.kpis.total_patients)
        );
        assert_eq!(after.kpis.total_patients, after.total_queue());
        assert_eq!(after.departments.len(), 4);
    }
}
