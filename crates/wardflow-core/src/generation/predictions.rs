//! Seed forecast series: 12 hours of synthetic history, the current hour,
//! and 12 hours of not-yet-observed future.

use rand::Rng;
use wardflow_logic::constants::HOUR_MS;
use wardflow_logic::prediction::PredictionPoint;
use wardflow_logic::time::SimTime;

pub const HISTORY_HOURS: i64 = 12;
pub const FUTURE_HOURS: i64 = 12;

/// Generate `HISTORY_HOURS + 1 + FUTURE_HOURS` hourly points around `now`.
/// Values follow `20 + 10·sin(0.3·k)` with noise; future points have
/// `actual = 0`.
pub fn generate_predictions(now: &SimTime, rng: &mut impl Rng) -> Vec<PredictionPoint> {
    let anchor = now.hour_floor_ms();

    (-HISTORY_HOURS..=FUTURE_HOURS)
        .map(|offset| {
            let base = 20.0 + ((offset + HISTORY_HOURS) as f64 * 0.3).sin() * 10.0;

            let actual = if offset <= 0 {
                let noise = (rng.gen::<f64>() - 0.5) * 8.0;
                (base + noise).floor().max(0.0) as u32
            } else {
                0
            };
            let predicted = (base + (rng.gen::<f64>() - 0.5) * 4.0).floor().max(0.0) as u32;

            PredictionPoint::new(anchor + offset * HOUR_MS, actual, predicted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = SimTime::new(HOUR_MS * 1000 + 42, 16, 3);
        let series = generate_predictions(&now, &mut rng);

        assert_eq!(series.len(), 25);
        assert_eq!(series[12].timestamp, HOUR_MS * 1000);
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, HOUR_MS);
        }
        assert!(series[13..].iter().all(|p| p.actual == 0));
        assert!(series.iter().all(|p| p.predicted <= 32));
    }
}
