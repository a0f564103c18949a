//! Prediction series - one forecast point per tick

use log::warn;
use rand::Rng;
use wardflow_logic::prediction::{append_prediction, fallback_prediction, ForecastInput, PredictionPoint};
use wardflow_logic::time::SimTime;

use crate::forecast::Forecaster;

/// Ask `forecaster` for the next hour's volume. Any error is logged and
/// replaced with the sine fallback, so this never fails.
pub fn forecast_next<R: Rng>(
    forecaster: &dyn Forecaster,
    total_queue: u32,
    now: &SimTime,
    rng: &mut R,
) -> u32 {
    let input = ForecastInput::at(now, total_queue);
    match forecaster.forecast(&input, &mut *rng) {
        Ok(predicted) => predicted,
        Err(e) => {
            warn!("{} forecaster failed, using fallback: {}", forecaster.name(), e);
            fallback_prediction(now.epoch_ms, rng)
        }
    }
}

/// Forecast and append in one step; the window keeps the newest points.
pub fn tick_predictions<R: Rng>(
    series: &[PredictionPoint],
    forecaster: &dyn Forecaster,
    total_queue: u32,
    now: &SimTime,
    window: usize,
    rng: &mut R,
) -> Vec<PredictionPoint> {
    let predicted = forecast_next(forecaster, total_queue, now, rng);
    append_prediction(series, predicted, now, window)
}
