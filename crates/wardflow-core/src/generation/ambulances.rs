//! Ambulance fleet generation

use wardflow_logic::ambulance::{Ambulance, AmbulanceStatus, AmbulanceType, GeoLocation};
use wardflow_logic::constants::MINUTE_MS;

fn location(lat: f64, lng: f64, district: &str, km: f64, eta: u32) -> Option<GeoLocation> {
    Some(GeoLocation {
        lat,
        lng,
        district: district.to_string(),
        distance_to_hospital: km,
        estimated_arrival_time: eta,
    })
}

/// Generate the five seeded ambulances, one or more per status. Units on a
/// call get return times relative to `now_ms`.
pub fn generate_ambulances(now_ms: i64) -> Vec<Ambulance> {
    vec![
        Ambulance {
            id: "amb-101".into(),
            status: AmbulanceStatus::Available,
            kind: AmbulanceType::Basic,
            location: location(40.7128, -74.006, "Downtown", 2.4, 8),
            estimated_return_time: None,
            crew: 2,
            equipment_level: 2,
        },
        Ambulance {
            id: "amb-102".into(),
            status: AmbulanceStatus::Dispatched,
            kind: AmbulanceType::Advanced,
            location: location(40.7168, -74.016, "Midtown", 5.8, 15),
            estimated_return_time: Some(now_ms + 15 * MINUTE_MS),
            crew: 3,
            equipment_level: 4,
        },
        Ambulance {
            id: "amb-103".into(),
            status: AmbulanceStatus::Available,
            kind: AmbulanceType::Critical,
            location: location(40.7098, -74.016, "Medical District", 1.2, 4),
            estimated_return_time: None,
            crew: 4,
            equipment_level: 5,
        },
        Ambulance {
            id: "amb-104".into(),
            status: AmbulanceStatus::Maintenance,
            kind: AmbulanceType::Advanced,
            location: None,
            estimated_return_time: None,
            crew: 0,
            equipment_level: 4,
        },
        Ambulance {
            id: "amb-105".into(),
            status: AmbulanceStatus::Returning,
            kind: AmbulanceType::Basic,
            location: location(40.7228, -74.026, "Uptown", 8.1, 22),
            estimated_return_time: Some(now_ms + 22 * MINUTE_MS),
            crew: 2,
            equipment_level: 3,
        },
    ]
}
