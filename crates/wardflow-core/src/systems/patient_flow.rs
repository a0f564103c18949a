//! Patient flow - arrivals, processing and queue-derived load

use rand::Rng;
use wardflow_logic::department::Department;

/// Chance that a department sees any arrivals in a tick.
const ARRIVAL_CHANCE: f64 = 0.3;

/// Advance every department by one tick of arrivals and processing.
pub fn tick_patient_flow(departments: &[Department], rng: &mut impl Rng) -> Vec<Department> {
    departments.iter().map(|d| flow_step(d, rng)).collect()
}

fn flow_step(dept: &Department, rng: &mut impl Rng) -> Department {
    let old_queue = dept.current_queue;

    let arrivals = if rng.gen_bool(ARRIVAL_CHANCE) {
        rng.gen_range(1..=3)
    } else {
        0
    };

    let throughput: f64 = rng.gen_range(0.5..1.0);
    let processed = ((dept.staff as f64 * throughput).floor() as u32).min(old_queue);

    debug_assert!(processed <= old_queue);
    let new_queue = old_queue + arrivals - processed;

    let staff = dept.staff.max(1) as f64;
    let jitter: f64 = rng.gen_range(0.0..10.0);
    let wait = ((new_queue as f64 / staff) * 8.0 + jitter).floor().max(5.0) as u32;

    let trend = (new_queue as f64 - old_queue as f64) / old_queue.max(1) as f64 * 100.0;

    let mut next = dept.clone().with_queue(new_queue);
    next.avg_wait_time = wait;
    next.trend = trend.floor() as i32;
    next
}
