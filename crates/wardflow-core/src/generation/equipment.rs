//! Equipment fleet generation

use rand::Rng;
use wardflow_logic::constants::{equipment::MAINTENANCE_CONFLICT_CHANCE, HOUR_MS};
use wardflow_logic::department::FloorLocation;
use wardflow_logic::equipment::{
    base_demand, Equipment, EquipmentDemand, EquipmentStatus, EquipmentType,
};

/// 24-hour demand profile peaking at `peak_hour`, each hour scaled by a
/// random 0.8-1.2 factor and capped at 100.
pub fn demand_curve(peak_hour: u8, rng: &mut impl Rng) -> Vec<EquipmentDemand> {
    (0..24u8)
        .map(|hour| {
            let factor: f64 = rng.gen_range(0.8..1.2);
            let demand = (base_demand(hour, peak_hour) as f64 * factor).floor() as u32;
            EquipmentDemand {
                hour,
                demand: demand.min(100),
                maintenance_conflict: rng.gen_bool(MAINTENANCE_CONFLICT_CHANCE),
            }
        })
        .collect()
}

/// Generate the six seeded units across diagnostic, surgical and monitoring
/// types. `now_ms` anchors the scheduled maintenance windows.
pub fn generate_equipment(now_ms: i64, rng: &mut impl Rng) -> Vec<Equipment> {
    let hours = |h: i64| Some(now_ms + h * HOUR_MS);

    let specs = [
        (
            "mri-1",
            "MRI Scanner #1",
            EquipmentType::Diagnostic,
            "diagnostics",
            EquipmentStatus::InUse,
            85,
            hours(3),
            14,
            FloorLocation::new(1, 110.0, 60.0, 10.0, 10.0),
        ),
        (
            "ct-1",
            "CT Scanner #1",
            EquipmentType::Diagnostic,
            "diagnostics",
            EquipmentStatus::Available,
            45,
            None,
            16,
            FloorLocation::new(1, 95.0, 60.0, 10.0, 10.0),
        ),
        (
            "xray-1",
            "X-Ray Machine #1",
            EquipmentType::Diagnostic,
            "emergency",
            EquipmentStatus::Available,
            60,
            None,
            10,
            FloorLocation::new(1, 20.0, 20.0, 5.0, 5.0),
        ),
        (
            "ot-1",
            "Operating Theater #1",
            EquipmentType::Surgical,
            "opd",
            EquipmentStatus::InUse,
            90,
            hours(6),
            12,
            FloorLocation::new(2, 70.0, 20.0, 15.0, 15.0),
        ),
        (
            "ot-2",
            "Operating Theater #2",
            EquipmentType::Surgical,
            "opd",
            EquipmentStatus::Maintenance,
            0,
            hours(0),
            13,
            FloorLocation::new(2, 90.0, 20.0, 15.0, 15.0),
        ),
        (
            "vent-1",
            "Ventilator #1",
            EquipmentType::Monitoring,
            "icu",
            EquipmentStatus::InUse,
            100,
            None,
            18,
            FloorLocation::new(3, 45.0, 35.0, 5.0, 5.0),
        ),
    ];

    specs
        .into_iter()
        .map(
            |(id, name, kind, department, status, usage, maintenance, peak, location)| Equipment {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                department: department.to_string(),
                status,
                current_usage: usage,
                maintenance_scheduled: maintenance,
                projected_demand: demand_curve(peak, rng),
                location: Some(location),
            },
        )
        .collect()
}
