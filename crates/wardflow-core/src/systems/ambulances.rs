//! Ambulance status - dispatch, travel and return state machine
//!
//! Each ambulance takes at most one transition per tick, checked in order:
//! 1. on a call and past its return time → available at zero distance
//! 2. available → 5% dispatch
//! 3. maintenance → 10% back in service at the hospital base
//! 4. on a call → close distance, recompute ETA

use rand::seq::SliceRandom;
use rand::Rng;
use wardflow_logic::ambulance::{Ambulance, AmbulanceStatus, GeoLocation};
use wardflow_logic::constants::{fleet, MINUTE_MS};
use wardflow_logic::time::SimTime;

/// Advance every ambulance by one tick at `now`.
pub fn tick_ambulances(ambulances: &[Ambulance], now: &SimTime, rng: &mut impl Rng) -> Vec<Ambulance> {
    ambulances.iter().map(|amb| ambulance_step(amb, now, rng)).collect()
}

fn ambulance_step(amb: &Ambulance, now: &SimTime, rng: &mut impl Rng) -> Ambulance {
    let due_back = amb
        .estimated_return_time
        .map_or(false, |t| t <= now.epoch_ms);

    let next = if amb.status.is_moving() && due_back {
        Ambulance {
            status: AmbulanceStatus::Available,
            estimated_return_time: None,
            location: amb.location.as_ref().map(GeoLocation::arrived),
            ..amb.clone()
        }
    } else if amb.status == AmbulanceStatus::Available && rng.gen_bool(fleet::DISPATCH_CHANCE) {
        dispatch(amb, now, rng)
    } else if amb.status == AmbulanceStatus::Maintenance
        && rng.gen_bool(fleet::MAINTENANCE_EXIT_CHANCE)
    {
        Ambulance {
            status: AmbulanceStatus::Available,
            location: Some(GeoLocation::hospital_base()),
            estimated_return_time: None,
            ..amb.clone()
        }
    } else if amb.status.is_moving() && amb.location.is_some() {
        advance(amb, rng)
    } else {
        amb.clone()
    };

    debug_assert!(next.is_consistent(), "{:?}", next);
    next
}

fn random_pace(rng: &mut impl Rng) -> f64 {
    rng.gen_range(fleet::MIN_PACE_MIN_PER_KM..fleet::MAX_PACE_MIN_PER_KM)
}

fn dispatch(amb: &Ambulance, now: &SimTime, rng: &mut impl Rng) -> Ambulance {
    let distance = rng.gen_range(fleet::MIN_DISPATCH_KM..fleet::MAX_DISPATCH_KM);
    let eta = (distance * random_pace(rng)).ceil() as u32;
    let district = fleet::DISTRICTS
        .choose(rng)
        .copied()
        .unwrap_or(fleet::BASE_DISTRICT);

    Ambulance {
        status: AmbulanceStatus::Dispatched,
        // Round trip
        estimated_return_time: Some(now.epoch_ms + 2 * eta as i64 * MINUTE_MS),
        location: Some(GeoLocation {
            lat: 40.7 + rng.gen_range(0.0..0.05),
            lng: -74.0 + rng.gen_range(0.0..0.05),
            district: district.to_string(),
            distance_to_hospital: distance,
            estimated_arrival_time: eta,
        }),
        ..amb.clone()
    }
}

fn advance(amb: &Ambulance, rng: &mut impl Rng) -> Ambulance {
    let speed = if amb.status == AmbulanceStatus::Returning { 2.0 } else { 1.0 };
    let location = amb.location.as_ref().map(|loc| {
        let remaining = (loc.distance_to_hospital - fleet::STEP_KM * speed).max(0.0);
        GeoLocation {
            distance_to_hospital: remaining,
            estimated_arrival_time: (remaining * random_pace(rng)).ceil() as u32,
            ..loc.clone()
        }
    });

    Ambulance {
        location,
        ..amb.clone()
    }
}
