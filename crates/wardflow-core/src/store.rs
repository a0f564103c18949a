//! State store - the authoritative hospital state.
//!
//! Readers get an `Arc` to an immutable [`HospitalState`] and never block.
//! Writers replace whole slices; every publish swaps in a complete new
//! state, so a reader sees either all of a write or none of it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::Serialize;
use wardflow_logic::ambulance::Ambulance;
use wardflow_logic::department::Department;
use wardflow_logic::equipment::Equipment;
use wardflow_logic::kpi::KpiSnapshot;
use wardflow_logic::prediction::PredictionPoint;
use wardflow_logic::recommendations::Recommendation;

/// Consistent view of every collection at one instant.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalState {
    pub departments: Vec<Department>,
    pub predictions: Vec<PredictionPoint>,
    pub recommendations: Vec<Recommendation>,
    pub kpis: KpiSnapshot,
    /// KPIs the current ones were compared against.
    pub previous_kpis: KpiSnapshot,
    pub equipment: Vec<Equipment>,
    pub ambulances: Vec<Ambulance>,
    pub is_running: bool,
    /// Incremented on every publish.
    pub revision: u64,
}

impl HospitalState {
    /// Patients queued across all departments.
    pub fn total_queue(&self) -> u32 {
        self.departments.iter().map(|d| d.current_queue).sum()
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn ambulance(&self, id: &str) -> Option<&Ambulance> {
        self.ambulances.iter().find(|a| a.id == id)
    }

    pub fn equipment_unit(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }
}

/// One named collection, replaced wholesale.
#[derive(Debug, Clone)]
pub enum Slice {
    Departments(Vec<Department>),
    Predictions(Vec<PredictionPoint>),
    Recommendations(Vec<Recommendation>),
    /// New KPIs; the outgoing ones become `previous_kpis`.
    Kpis(KpiSnapshot),
    Equipment(Vec<Equipment>),
    Ambulances(Vec<Ambulance>),
    Running(bool),
}

impl Slice {
    fn apply(self, state: &mut HospitalState) {
        match self {
            Slice::Departments(v) => state.departments = v,
            Slice::Predictions(v) => state.predictions = v,
            Slice::Recommendations(v) => state.recommendations = v,
            Slice::Kpis(k) => {
                state.previous_kpis = state.kpis;
                state.kpis = k;
            }
            Slice::Equipment(v) => state.equipment = v,
            Slice::Ambulances(v) => state.ambulances = v,
            Slice::Running(r) => state.is_running = r,
        }
    }
}

/// Lock-free reads, serialised writes.
pub struct StateStore {
    current: ArcSwap<HospitalState>,
    writer: Mutex<()>,
}

impl StateStore {
    pub fn new(initial: HospitalState) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            writer: Mutex::new(()),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<HospitalState> {
        self.current.load_full()
    }

    /// Swap one slice.
    pub fn replace(&self, slice: Slice) {
        self.replace_all(vec![slice]);
    }

    /// Swap several slices in a single publish.
    pub fn replace_all(&self, slices: Vec<Slice>) {
        let _guard = self.writer.lock();
        self.publish(slices);
    }

    /// Read-compute-write under the writer lock. `f` sees the latest state
    /// and returns the slices to replace; no other writer runs in between.
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(&HospitalState) -> Vec<Slice>,
    {
        let _guard = self.writer.lock();
        let slices = f(&self.current.load());
        self.publish(slices);
    }

    // Caller holds `writer`.
    fn publish(&self, slices: Vec<Slice>) {
        if slices.is_empty() {
            return;
        }
        let mut next = HospitalState::clone(&self.current.load());
        for slice in slices {
            slice.apply(&mut next);
        }
        next.revision += 1;
        self.current.store(Arc::new(next));
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(HospitalState::default())
    }
}
