//! Ambulance fleet records.

use serde::{Deserialize, Serialize};

use crate::constants::fleet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbulanceStatus {
    Available,
    Dispatched,
    Returning,
    Maintenance,
}

impl AmbulanceStatus {
    /// Out on a call: a return time must be known.
    pub fn is_moving(&self) -> bool {
        matches!(self, AmbulanceStatus::Dispatched | AmbulanceStatus::Returning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbulanceType {
    Basic,
    Advanced,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
    pub district: String,
    /// Kilometres.
    pub distance_to_hospital: f64,
    /// Minutes.
    pub estimated_arrival_time: u32,
}

impl GeoLocation {
    /// The hospital's own bay: zero distance, zero ETA.
    pub fn hospital_base() -> Self {
        Self {
            lat: fleet::BASE_LAT,
            lng: fleet::BASE_LNG,
            district: fleet::BASE_DISTRICT.to_string(),
            distance_to_hospital: 0.0,
            estimated_arrival_time: 0,
        }
    }

    /// Same place label, but arrived.
    pub fn arrived(&self) -> Self {
        Self {
            distance_to_hospital: 0.0,
            estimated_arrival_time: 0,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    pub id: String,
    pub status: AmbulanceStatus,
    #[serde(rename = "type")]
    pub kind: AmbulanceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    /// Epoch ms; present iff dispatched or returning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_return_time: Option<i64>,
    pub crew: u32,
    /// 1-5.
    pub equipment_level: u8,
}

impl Ambulance {
    pub fn is_consistent(&self) -> bool {
        let return_ok = self.status.is_moving() == self.estimated_return_time.is_some();
        let location_ok = self
            .location
            .as_ref()
            .map_or(true, |l| l.distance_to_hospital >= 0.0);
        return_ok && location_ok && (1..=5).contains(&self.equipment_level)
    }
}
