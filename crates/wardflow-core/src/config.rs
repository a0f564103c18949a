//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "seed": 42, "periods": { "patientFlowMs": 500 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wardflow_logic::constants::PREDICTION_WINDOW;
use wardflow_logic::recommendations::RecommendationPolicy;

use crate::error::ConfigError;

/// Tick period of each processor, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TickPeriods {
    pub patient_flow_ms: u64,
    pub predictions_ms: u64,
    pub beds_ms: u64,
    pub equipment_ms: u64,
    pub ambulances_ms: u64,
}

impl Default for TickPeriods {
    fn default() -> Self {
        Self {
            patient_flow_ms: 2_000,
            predictions_ms: 10_000,
            beds_ms: 3_000,
            equipment_ms: 5_000,
            ambulances_ms: 4_000,
        }
    }
}

impl TickPeriods {
    pub fn patient_flow(&self) -> Duration {
        Duration::from_millis(self.patient_flow_ms)
    }

    pub fn predictions(&self) -> Duration {
        Duration::from_millis(self.predictions_ms)
    }

    pub fn beds(&self) -> Duration {
        Duration::from_millis(self.beds_ms)
    }

    pub fn equipment(&self) -> Duration {
        Duration::from_millis(self.equipment_ms)
    }

    pub fn ambulances(&self) -> Duration {
        Duration::from_millis(self.ambulances_ms)
    }
}

/// External forecaster settings. Only used with the `remote-forecast`
/// feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastConfig {
    /// POST endpoint; `None` keeps the synthetic model.
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
    /// Multiplier applied to the scalar the endpoint returns.
    pub response_scale: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 1_500,
            response_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Seed for all random draws; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub periods: TickPeriods,
    /// Number of points kept in the prediction series.
    pub prediction_window: usize,
    pub recommendations: RecommendationPolicy,
    pub forecast: ForecastConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            periods: TickPeriods::default(),
            prediction_window: PREDICTION_WINDOW,
            recommendations: RecommendationPolicy::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.periods;
        let periods = [
            ("patientFlowMs", p.patient_flow_ms),
            ("predictionsMs", p.predictions_ms),
            ("bedsMs", p.beds_ms),
            ("equipmentMs", p.equipment_ms),
            ("ambulancesMs", p.ambulances_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::invalid(format!("periods.{} must be > 0", name)));
        }
        if self.prediction_window == 0 {
            return Err(ConfigError::invalid("predictionWindow must be > 0"));
        }
        if self.recommendations.max_items == 0 {
            return Err(ConfigError::invalid("recommendations.maxItems must be > 0"));
        }
        if self.forecast.timeout_ms == 0 {
            return Err(ConfigError::invalid("forecast.timeoutMs must be > 0"));
        }
        if !self.forecast.response_scale.is_finite() || self.forecast.response_scale < 0.0 {
            return Err(ConfigError::invalid(
                "forecast.responseScale must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}
