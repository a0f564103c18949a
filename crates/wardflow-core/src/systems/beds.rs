//! Bed status - occupancy random walk per department and section

use rand::Rng;
use wardflow_logic::beds::BedData;
use wardflow_logic::department::Department;

const HOLD_CHANCE: f64 = 0.7;
const ADMIT_CHANCE: f64 = 0.6;
const SECTION_CHANGE_CHANCE: f64 = 0.2;

/// Walk bed occupancy for every department that has bed data. Queues and
/// load status are left alone.
pub fn tick_beds(departments: &[Department], rng: &mut impl Rng) -> Vec<Department> {
    departments
        .iter()
        .map(|dept| {
            let mut next = dept.clone();
            if let Some(beds) = next.beds.as_mut() {
                walk_beds(beds, rng);
            }
            next
        })
        .collect()
}

/// -1/0/+1 with 70% hold, otherwise 60/40 admit/discharge.
fn occupancy_step(rng: &mut impl Rng) -> i32 {
    if rng.gen_bool(HOLD_CHANCE) {
        0
    } else if rng.gen_bool(ADMIT_CHANCE) {
        1
    } else {
        -1
    }
}

fn walk_beds(beds: &mut BedData, rng: &mut impl Rng) {
    let step = occupancy_step(rng);
    let ceiling = beds.occupiable();
    beds.occupied = (beds.occupied as i64 + step as i64).clamp(0, ceiling as i64) as u32;

    let projected_step: i32 = rng.gen_range(-3..=6);
    beds.projected_occupancy =
        (beds.projected_occupancy as i32 + projected_step).clamp(50, 100) as u32;

    for section in &mut beds.sections {
        if rng.gen_bool(SECTION_CHANGE_CHANCE) {
            let delta = if rng.gen_bool(ADMIT_CHANCE) { 1 } else { -1 };
            section.shift_occupancy(delta);
        }
    }

    debug_assert!(beds.is_consistent());
}
