//! Forecasting collaborators consulted by the prediction tick.
//!
//! A forecaster turns a [`ForecastInput`] into one patient-count value.
//! Failures are reported as [`ForecastError`] and never escape a tick; see
//! [`crate::systems::forecast_next`].

use std::sync::Arc;

use rand::RngCore;
use wardflow_logic::prediction::{synthetic_prediction, ForecastInput};

use crate::config::ForecastConfig;
use crate::error::ForecastError;

pub trait Forecaster: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    fn forecast(&self, input: &ForecastInput, rng: &mut dyn RngCore) -> Result<u32, ForecastError>;
}

/// The built-in hour/day-of-week model. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticForecaster;

impl Forecaster for SyntheticForecaster {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn forecast(&self, input: &ForecastInput, rng: &mut dyn RngCore) -> Result<u32, ForecastError> {
        Ok(synthetic_prediction(input, rng))
    }
}

/// Pick the forecaster a config asks for. An endpoint without the
/// `remote-forecast` feature, or one whose client cannot be built, falls
/// back to the synthetic model with a warning.
pub fn forecaster_for(config: &ForecastConfig) -> Arc<dyn Forecaster> {
    match &config.endpoint {
        None => Arc::new(SyntheticForecaster),
        #[cfg(feature = "remote-forecast")]
        Some(_) => match remote::RemoteForecaster::new(config) {
            Ok(remote) => Arc::new(remote),
            Err(e) => {
                log::warn!("remote forecaster disabled: {}", e);
                Arc::new(SyntheticForecaster)
            }
        },
        #[cfg(not(feature = "remote-forecast"))]
        Some(endpoint) => {
            log::warn!(
                "forecast endpoint {} ignored: built without the remote-forecast feature",
                endpoint
            );
            Arc::new(SyntheticForecaster)
        }
    }
}

#[cfg(feature = "remote-forecast")]
pub use remote::RemoteForecaster;

#[cfg(feature = "remote-forecast")]
mod remote {
    use std::time::Duration;

    use rand::RngCore;
    use serde::Deserialize;
    use wardflow_logic::prediction::ForecastInput;

    use super::Forecaster;
    use crate::config::ForecastConfig;
    use crate::error::ForecastError;

    #[derive(Debug, Deserialize)]
    struct ForecastResponse {
        prediction: f64,
    }

    /// POSTs the input as JSON and expects `{"prediction": <number>}` back.
    /// The value is multiplied by `response_scale` and rounded.
    pub struct RemoteForecaster {
        client: reqwest::blocking::Client,
        endpoint: String,
        timeout_ms: u64,
        scale: f64,
    }

    impl RemoteForecaster {
        pub fn new(config: &ForecastConfig) -> Result<Self, ForecastError> {
            let endpoint = config.endpoint.clone().ok_or(ForecastError::Unavailable)?;
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| ForecastError::Transport(e.to_string()))?;

            Ok(Self {
                client,
                endpoint,
                timeout_ms: config.timeout_ms,
                scale: config.response_scale,
            })
        }

        fn transport_error(&self, e: reqwest::Error) -> ForecastError {
            if e.is_timeout() {
                ForecastError::Timeout(self.timeout_ms)
            } else {
                ForecastError::Transport(e.to_string())
            }
        }
    }

    impl Forecaster for RemoteForecaster {
        fn name(&self) -> &str {
            &self.endpoint
        }

        fn forecast(&self, input: &ForecastInput, _rng: &mut dyn RngCore) -> Result<u32, ForecastError> {
            let response = self
                .client
                .post(&self.endpoint)
                .json(input)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| self.transport_error(e))?;

            let body: ForecastResponse = response
                .json()
                .map_err(|e| ForecastError::Schema(e.to_string()))?;

            if !body.prediction.is_finite() || body.prediction < 0.0 {
                return Err(ForecastError::Schema(format!(
                    "prediction {} is not a patient count",
                    body.prediction
                )));
            }
            Ok((body.prediction * self.scale).round() as u32)
        }
    }
}
