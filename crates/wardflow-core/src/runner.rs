//! Tick runner - binds each processor to the state store.
//!
//! Every tick reads the latest snapshot and publishes its result in a
//! single store write. Patient flow publishes the departments together with
//! the KPIs and recommendations derived from them.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rand::Rng;
use wardflow_logic::ambulance::{Ambulance, AmbulanceStatus};
use wardflow_logic::equipment::{Equipment, EquipmentStatus};
use wardflow_logic::prediction::append_prediction;
use wardflow_logic::recommendations::RecommendationPolicy;

use crate::clock::Clock;
use crate::config::TickPeriods;
use crate::forecast::Forecaster;
use crate::store::{Slice, StateStore};
use crate::systems::*;

/// The five periodic processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    PatientFlow,
    Predictions,
    Beds,
    Equipment,
    Ambulances,
}

impl TickKind {
    pub const ALL: [TickKind; 5] = [
        TickKind::PatientFlow,
        TickKind::Predictions,
        TickKind::Beds,
        TickKind::Equipment,
        TickKind::Ambulances,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TickKind::PatientFlow => "patient-flow",
            TickKind::Predictions => "predictions",
            TickKind::Beds => "beds",
            TickKind::Equipment => "equipment",
            TickKind::Ambulances => "ambulances",
        }
    }

    pub fn period(&self, periods: &TickPeriods) -> Duration {
        match self {
            TickKind::PatientFlow => periods.patient_flow(),
            TickKind::Predictions => periods.predictions(),
            TickKind::Beds => periods.beds(),
            TickKind::Equipment => periods.equipment(),
            TickKind::Ambulances => periods.ambulances(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Shared by every timer thread; holds no mutable state of its own.
pub struct TickRunner {
    store: Arc<StateStore>,
    clock: Arc<dyn Clock>,
    forecaster: Arc<dyn Forecaster>,
    policy: RecommendationPolicy,
    window: usize,
}

impl TickRunner {
    pub fn new(
        store: Arc<StateStore>,
        clock: Arc<dyn Clock>,
        forecaster: Arc<dyn Forecaster>,
        policy: RecommendationPolicy,
        window: usize,
    ) -> Self {
        Self {
            store,
            clock,
            forecaster,
            policy,
            window,
        }
    }

    pub fn run<R: Rng>(&self, kind: TickKind, rng: &mut R) {
        match kind {
            TickKind::PatientFlow => self.patient_flow(rng),
            TickKind::Predictions => self.predictions(rng),
            TickKind::Beds => self.beds(rng),
            TickKind::Equipment => self.equipment(rng),
            TickKind::Ambulances => self.ambulances(rng),
        }
    }

    fn patient_flow<R: Rng>(&self, rng: &mut R) {
        let policy = &self.policy;
        self.store.modify(|state| {
            let departments = tick_patient_flow(&state.departments, rng);
            let [kpis, recommendations] = derived_slices(&departments, &state.kpis, policy, rng);
            vec![Slice::Departments(departments), kpis, recommendations]
        });

        let snap = self.store.get();
        debug!(
            "patient flow: {} queued, efficiency {}, {} recommendations",
            snap.kpis.total_patients,
            snap.kpis.efficiency,
            snap.recommendations.len()
        );
    }

    fn predictions<R: Rng>(&self, rng: &mut R) {
        let now = self.clock.now();
        let total_queue = self.store.get().total_queue();
        // The forecaster may block on I/O; keep it outside the writer lock
        let predicted = forecast_next(self.forecaster.as_ref(), total_queue, &now, rng);

        let window = self.window;
        self.store.modify(|state| {
            vec![Slice::Predictions(append_prediction(
                &state.predictions,
                predicted,
                &now,
                window,
            ))]
        });
        debug!("predictions: next hour {} patients", predicted);
    }

    fn beds<R: Rng>(&self, rng: &mut R) {
        let mut occupied = 0;
        self.store.modify(|state| {
            let departments = tick_beds(&state.departments, rng);
            occupied = departments
                .iter()
                .filter_map(|d| d.beds.as_ref())
                .map(|b| b.occupied)
                .sum::<u32>();
            vec![Slice::Departments(departments)]
        });
        debug!("beds: {} occupied", occupied);
    }

    fn equipment<R: Rng>(&self, rng: &mut R) {
        let now = self.clock.now();
        let mut summary = (0, 0, 0);
        self.store.modify(|state| {
            let units = tick_equipment(&state.equipment, &now, rng);
            let (entered, left) = maintenance_transitions(&state.equipment, &units);
            let in_maintenance = units
                .iter()
                .filter(|u| u.status == EquipmentStatus::Maintenance)
                .count();
            summary = (in_maintenance, entered, left);
            vec![Slice::Equipment(units)]
        });
        let (in_maintenance, entered, left) = summary;
        debug!(
            "equipment: {} in maintenance ({} entered, {} left)",
            in_maintenance, entered, left
        );
    }

    fn ambulances<R: Rng>(&self, rng: &mut R) {
        let now = self.clock.now();
        let mut summary = (0, 0);
        self.store.modify(|state| {
            let fleet = tick_ambulances(&state.ambulances, &now, rng);
            let available = fleet
                .iter()
                .filter(|a| a.status == AmbulanceStatus::Available)
                .count();
            summary = (available, dispatches(&state.ambulances, &fleet));
            vec![Slice::Ambulances(fleet)]
        });
        let (available, dispatched) = summary;
        debug!("ambulances: {} available, {} dispatched", available, dispatched);
    }
}

/// Units that entered and left maintenance between two equipment slices.
fn maintenance_transitions(before: &[Equipment], after: &[Equipment]) -> (usize, usize) {
    before
        .iter()
        .zip(after)
        .fold((0, 0), |(entered, left), (old, new)| {
            let was = old.status == EquipmentStatus::Maintenance;
            let is = new.status == EquipmentStatus::Maintenance;
            (entered + usize::from(!was && is), left + usize::from(was && !is))
        })
}

/// Available units sent out between two fleet slices.
fn dispatches(before: &[Ambulance], after: &[Ambulance]) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| {
            old.status == AmbulanceStatus::Available && new.status == AmbulanceStatus::Dispatched
        })
        .count()
}
