//! Patient-volume forecast series and the synthetic forecast model.
//!
//! The model is a parametrised generator, not a trained predictor: it
//! reproduces the daily/weekly shape operators expect to see.
//!
//! | Input | Effect |
//! |-------|--------|
//! | weekend | base load 40 (else 60) |
//! | hour 8-18 | ×1.5 (else ×0.7) |
//! | Monday / Friday | ×1.2 / ×1.3 |
//! | noise | ×0.8-1.2 |
//!
//! Output range is therefore 0..=140 patients per hour.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::HOUR_MS;
use crate::time::SimTime;

/// One hourly point of the forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Epoch ms, hour-aligned.
    pub timestamp: i64,
    /// Observed arrivals; 0 for points in the future.
    pub actual: u32,
    pub predicted: u32,
    pub emergency: u32,
    pub opd: u32,
    pub diagnostics: u32,
}

impl PredictionPoint {
    /// A point whose department split is 30/50/20% of `predicted`.
    pub fn new(timestamp: i64, actual: u32, predicted: u32) -> Self {
        let split = |pct: u32| predicted * pct / 100;
        Self {
            timestamp,
            actual,
            predicted,
            emergency: split(30),
            opd: split(50),
            diagnostics: split(20),
        }
    }
}

/// Features handed to a forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInput {
    /// Patients currently queued across all departments.
    pub recent_queue_volume: u32,
    pub hour: u8,
    /// 0 = Sunday.
    pub day_of_week: u8,
    pub is_weekend: bool,
}

impl ForecastInput {
    pub fn at(time: &SimTime, recent_queue_volume: u32) -> Self {
        Self {
            recent_queue_volume,
            hour: time.hour,
            day_of_week: time.weekday,
            is_weekend: time.is_weekend(),
        }
    }
}

/// `floor(baseLoad × hourFactor × dayFactor × noise)`.
pub fn synthetic_prediction<R: Rng + ?Sized>(input: &ForecastInput, rng: &mut R) -> u32 {
    let noise = rng.gen_range(0.8..1.2);
    synthetic_prediction_with_noise(input, noise)
}

/// Deterministic core of [`synthetic_prediction`]; `noise` is the
/// multiplicative factor in 0.8..=1.2.
pub fn synthetic_prediction_with_noise(input: &ForecastInput, noise: f64) -> u32 {
    let base_load = if input.is_weekend { 40.0 } else { 60.0 };
    let hour_factor = if (8..=18).contains(&input.hour) { 1.5 } else { 0.7 };
    let day_factor = match input.day_of_week {
        1 => 1.2,
        5 => 1.3,
        _ => 1.0,
    };
    (base_load * hour_factor * day_factor * noise).floor().max(0.0) as u32
}

/// Sine-based value used when the forecaster fails.
pub fn fallback_prediction<R: Rng + ?Sized>(now_ms: i64, rng: &mut R) -> u32 {
    let base = 20.0 + (now_ms as f64 * 0.0001).sin() * 10.0;
    let noise = (rng.gen::<f64>() - 0.5) * 6.0;
    (base + noise).floor().max(0.0) as u32
}

/// Append `predicted` one hour after the last point, then keep only the
/// newest `window` points. An empty series starts at `now`'s hour.
pub fn append_prediction(
    series: &[PredictionPoint],
    predicted: u32,
    now: &SimTime,
    window: usize,
) -> Vec<PredictionPoint> {
    let timestamp = series
        .last()
        .map(|p| p.timestamp + HOUR_MS)
        .unwrap_or_else(|| now.hour_floor_ms());

    let mut next = Vec::with_capacity(series.len() + 1);
    next.extend_from_slice(series);
    next.push(PredictionPoint::new(timestamp, 0, predicted));

    if next.len() > window {
        next.drain(..next.len() - window);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input(hour: u8, day: u8) -> ForecastInput {
        ForecastInput {
            recent_queue_volume: 30,
            hour,
            day_of_week: day,
            is_weekend: day == 0 || day == 6,
        }
    }

    #[test]
    fn test_split_is_proportional() {
        let p = PredictionPoint::new(0, 0, 50);
        assert_eq!((p.emergency, p.opd, p.diagnostics), (15, 25, 10));
    }

    #[test]
    fn test_model_factors() {
        // Weekday daytime, neutral noise
        assert_eq!(synthetic_prediction_with_noise(&input(10, 3), 1.0), 90);
        // Weekday night
        assert_eq!(synthetic_prediction_with_noise(&input(2, 3), 1.0), 42);
        // Friday daytime
        assert_eq!(synthetic_prediction_with_noise(&input(12, 5), 1.0), 117);
        // Sunday daytime
        assert_eq!(synthetic_prediction_with_noise(&input(12, 0), 1.0), 60);
    }

    #[test]
    fn test_model_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for hour in 0..24 {
            for day in 0..7 {
                let v = synthetic_prediction(&input(hour, day), &mut rng);
                assert!(v <= 140, "hour {hour} day {day} gave {v}");
            }
        }
    }

    #[test]
    fn test_fallback_non_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for t in (0..200_000_i64).step_by(997) {
            assert!(fallback_prediction(t * 1000, &mut rng) <= 33);
        }
    }

    #[test]
    fn test_append_spacing_and_window() {
        let now = SimTime::new(HOUR_MS * 100 + 5, 4, 2);
        let mut series: Vec<PredictionPoint> = Vec::new();
        for i in 0..30 {
            series = append_prediction(&series, i, &now, 24);
        }
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].timestamp, HOUR_MS * 106);
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, HOUR_MS);
        }
        assert_eq!(series.last().map(|p| p.predicted), Some(29));
        assert!(series.iter().all(|p| p.actual == 0));
    }
}
