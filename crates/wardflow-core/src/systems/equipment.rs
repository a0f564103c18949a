//! Equipment status - usage tracking against the hourly demand profile and
//! maintenance transitions

use rand::Rng;
use wardflow_logic::constants::equipment::{
    ENTER_MAINTENANCE_CHANCE, EXIT_MAINTENANCE_CHANCE, USAGE_STEP,
};
use wardflow_logic::equipment::{Equipment, EquipmentStatus};
use wardflow_logic::time::SimTime;

/// Advance every unit by one tick at `now`.
pub fn tick_equipment(units: &[Equipment], now: &SimTime, rng: &mut impl Rng) -> Vec<Equipment> {
    units.iter().map(|unit| equipment_step(unit, now, rng)).collect()
}

fn usage_step(rng: &mut impl Rng) -> i32 {
    if rng.gen_bool(0.7) {
        0
    } else if rng.gen_bool(0.6) {
        USAGE_STEP
    } else {
        -USAGE_STEP
    }
}

fn equipment_step(unit: &Equipment, now: &SimTime, rng: &mut impl Rng) -> Equipment {
    let baseline = match unit.status {
        EquipmentStatus::Maintenance => 0,
        _ => unit.demand_at(now.hour) as i32,
    };
    let usage = (baseline + usage_step(rng)).clamp(0, 100) as u32;

    let mut next = unit.clone();
    match unit.status {
        EquipmentStatus::Maintenance => {
            if rng.gen_bool(EXIT_MAINTENANCE_CHANCE) {
                next.status = EquipmentStatus::for_usage(usage);
                next.current_usage = usage;
                next.maintenance_scheduled = None;
            } else {
                next.current_usage = 0;
            }
        }
        EquipmentStatus::Available | EquipmentStatus::InUse => {
            if rng.gen_bool(ENTER_MAINTENANCE_CHANCE) {
                next.status = EquipmentStatus::Maintenance;
                next.current_usage = 0;
                next.maintenance_scheduled = Some(now.epoch_ms);
            } else {
                next.status = EquipmentStatus::for_usage(usage);
                next.current_usage = usage;
            }
        }
        EquipmentStatus::Reserved => {
            next.current_usage = usage;
        }
    }

    debug_assert!(next.status != EquipmentStatus::Maintenance || next.current_usage == 0);
    next
}
