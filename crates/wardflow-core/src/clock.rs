//! Wall-clock sources for tick processors.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use wardflow_logic::time::SimTime;

/// Supplies the instant a tick runs at.
pub trait Clock: Send + Sync {
    fn now(&self) -> SimTime;
}

/// Local wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SimTime {
        sim_time_from(&Local::now())
    }
}

/// Settable clock for tests and virtual-time runs. Hours and weekdays are
/// computed in UTC so results do not depend on the host zone.
#[derive(Debug)]
pub struct ManualClock {
    epoch_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(epoch_ms: i64) -> Self {
        Self {
            epoch_ms: AtomicI64::new(epoch_ms),
        }
    }

    /// Start at a UTC calendar instant. A date that does not exist, such as
    /// February 30, starts the clock at the Unix epoch.
    pub fn at_utc(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let epoch_ms = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0);
        Self::new(epoch_ms)
    }

    pub fn set(&self, epoch_ms: i64) {
        self.epoch_ms.store(epoch_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.epoch_ms
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SimTime {
        let epoch_ms = self.epoch_ms.load(Ordering::SeqCst);
        let at = Utc
            .timestamp_millis_opt(epoch_ms)
            .single()
            .unwrap_or_default();
        sim_time_from(&at)
    }
}

fn sim_time_from<Tz: TimeZone>(at: &DateTime<Tz>) -> SimTime {
    SimTime::new(
        at.timestamp_millis(),
        at.hour() as u8,
        at.weekday().num_days_from_sunday() as u8,
    )
}
