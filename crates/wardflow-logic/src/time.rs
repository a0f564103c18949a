//! Wall-clock instant as seen by a tick.

use serde::{Deserialize, Serialize};

use crate::constants::HOUR_MS;

/// The instant a tick runs at, pre-decomposed so processors stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimTime {
    /// Milliseconds since the Unix epoch.
    pub epoch_ms: i64,
    /// Local hour of day, 0-23.
    pub hour: u8,
    /// Day of week, 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
}

impl SimTime {
    pub fn new(epoch_ms: i64, hour: u8, weekday: u8) -> Self {
        Self {
            epoch_ms,
            hour: hour % 24,
            weekday: weekday % 7,
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }

    /// Start of the hour containing this instant.
    pub fn hour_floor_ms(&self) -> i64 {
        self.epoch_ms.div_euclid(HOUR_MS) * HOUR_MS
    }
}
