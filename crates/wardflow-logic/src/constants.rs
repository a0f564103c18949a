//! Thresholds and fixed parameters shared by the tick processors.

/// One hour in milliseconds; spacing between prediction points.
pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// One minute in milliseconds.
pub const MINUTE_MS: i64 = 60 * 1000;

/// Number of points kept in the prediction series.
pub const PREDICTION_WINDOW: usize = 24;

/// Department utilization thresholds (percent, exclusive).
pub mod utilization {
    pub const CRITICAL_ABOVE: f64 = 85.0;
    pub const WARNING_ABOVE: f64 = 70.0;
}

/// Bed section occupancy thresholds (percent, inclusive).
pub mod occupancy {
    pub const FULL_AT: f64 = 95.0;
    pub const HIGH_AT: f64 = 75.0;
    pub const MEDIUM_AT: f64 = 50.0;
}

/// Recommendation triggers.
pub mod staffing {
    /// Utilization above which extra staff is recommended.
    pub const ADD_STAFF_ABOVE: f64 = 85.0;
    /// Utilization above which an add-staff recommendation is high priority.
    pub const HIGH_PRIORITY_ABOVE: f64 = 95.0;
    /// Utilization below which staff can be released.
    pub const REMOVE_STAFF_BELOW: f64 = 50.0;
    /// Departments at or below this headcount never release staff.
    pub const MIN_STAFF_TO_RELEASE: u32 = 4;
    /// Default number of recommendations surfaced.
    pub const MAX_RECOMMENDATIONS: usize = 5;
}

/// Ambulance movement and dispatch parameters.
pub mod fleet {
    pub const DISPATCH_CHANCE: f64 = 0.05;
    pub const MAINTENANCE_EXIT_CHANCE: f64 = 0.10;
    /// Kilometres closed per tick while dispatched; doubled while returning.
    pub const STEP_KM: f64 = 0.2;
    pub const MIN_DISPATCH_KM: f64 = 2.0;
    pub const MAX_DISPATCH_KM: f64 = 12.0;
    pub const MIN_PACE_MIN_PER_KM: f64 = 1.5;
    pub const MAX_PACE_MIN_PER_KM: f64 = 2.5;
    pub const BASE_LAT: f64 = 40.7128;
    pub const BASE_LNG: f64 = -74.006;
    pub const BASE_DISTRICT: &str = "Hospital Base";
    pub const DISTRICTS: [&str; 5] = ["Downtown", "Uptown", "Midtown", "West Side", "East Side"];
}

/// Equipment status transition chances per tick.
pub mod equipment {
    pub const ENTER_MAINTENANCE_CHANCE: f64 = 0.01;
    pub const EXIT_MAINTENANCE_CHANCE: f64 = 0.10;
    /// Demand used when a unit has no entry for the current hour.
    pub const DEFAULT_DEMAND: u32 = 50;
    pub const USAGE_STEP: i32 = 5;
    pub const MAINTENANCE_CONFLICT_CHANCE: f64 = 0.05;
}
