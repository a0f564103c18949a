//! Wardflow Core - Hospital Operations Simulation Engine
//!
//! Simulates patient flow, bed occupancy, equipment usage and an ambulance
//! fleet for a small hospital, and derives KPIs, staffing recommendations
//! and a patient-volume forecast from that state.
//!
//! # Architecture
//!
//! - **Store**: immutable [`store::HospitalState`] snapshots behind an atomic
//!   swap; readers never block, writers publish whole collections
//! - **Generation**: seeds every collection inside fixed ranges
//! - **Systems**: one pure function per tick processor, collection in,
//!   collection out
//! - **Runner / Scheduler**: bind systems to the store and fire them on
//!   five independent periods
//!
//! # Example
//!
//! ```rust,no_run
//! use wardflow_core::prelude::*;
//!
//! let mut engine = HospitalEngine::new(SimulationConfig::default()).unwrap();
//! engine.start().unwrap();
//!
//! let snapshot = engine.snapshot();
//! println!("{} patients queued", snapshot.kpis.total_patients);
//!
//! engine.stop();
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod generation;
pub mod runner;
pub mod scheduler;
pub mod store;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::SimulationConfig;
    pub use crate::engine::HospitalEngine;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::runner::TickKind;
    pub use crate::store::HospitalState;
    pub use wardflow_logic::*;
}
