//! Pure hospital operations logic for WardFlow.
//!
//! This crate holds the entity model and every rule that can be expressed as
//! a function of plain data: load thresholds, the synthetic forecast model,
//! KPI rollups and staffing recommendations. Nothing here owns state, reads
//! a clock or spawns a thread, so all of it is unit-testable in isolation.
//! Randomised rules take the RNG as a parameter.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ambulance`] | Fleet records, status and location |
//! | [`beds`] | Department bed counts and section occupancy bands |
//! | [`constants`] | Thresholds, chances and fixed parameters |
//! | [`department`] | Queues, utilization and load status |
//! | [`equipment`] | Equipment units and 24-hour demand profiles |
//! | [`kpi`] | Hospital-wide rollup metrics |
//! | [`prediction`] | Forecast series, synthetic model, sine fallback |
//! | [`recommendations`] | Staffing recommendations and ordering policy |
//! | [`time`] | Pre-decomposed tick instant |

pub mod ambulance;
pub mod beds;
pub mod constants;
pub mod department;
pub mod equipment;
pub mod kpi;
pub mod prediction;
pub mod recommendations;
pub mod time;
