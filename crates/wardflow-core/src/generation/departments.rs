//! Department, bed and floor-plan generation

use rand::Rng;
use wardflow_logic::beds::{BedData, BedSection};
use wardflow_logic::department::{Department, FloorLocation};

/// Fixed layout of one seeded department; queue and wait are drawn from the
/// given half-open ranges.
struct DepartmentTemplate {
    id: &'static str,
    name: &'static str,
    capacity: u32,
    staff: u32,
    queue: (u32, u32),
    wait: (u32, u32),
    beds: BedTemplate,
    location: FloorLocation,
}

struct BedTemplate {
    total: u32,
    occupied: u32,
    reserved: u32,
    maintenance: u32,
    projected: u32,
    sections: &'static [(&'static str, &'static str, u32, u32)],
}

fn templates() -> [DepartmentTemplate; 4] {
    [
        DepartmentTemplate {
            id: "emergency",
            name: "Emergency",
            capacity: 50,
            staff: 8,
            queue: (5, 20),
            wait: (15, 45),
            beds: BedTemplate {
                total: 30,
                occupied: 24,
                reserved: 3,
                maintenance: 1,
                projected: 85,
                sections: &[
                    ("er-a", "ER Zone A", 10, 9),
                    ("er-b", "ER Zone B", 10, 8),
                    ("er-c", "ER Zone C", 10, 7),
                ],
            },
            location: FloorLocation::new(1, 10.0, 10.0, 40.0, 30.0),
        },
        DepartmentTemplate {
            id: "opd",
            name: "OPD",
            capacity: 100,
            staff: 12,
            queue: (10, 35),
            wait: (30, 90),
            beds: BedTemplate {
                total: 50,
                occupied: 30,
                reserved: 5,
                maintenance: 2,
                projected: 70,
                sections: &[
                    ("opd-a", "General Medicine", 15, 10),
                    ("opd-b", "Surgery", 15, 12),
                    ("opd-c", "Pediatrics", 20, 8),
                ],
            },
            location: FloorLocation::new(2, 60.0, 10.0, 50.0, 40.0),
        },
        DepartmentTemplate {
            id: "diagnostics",
            name: "Diagnostics",
            capacity: 75,
            staff: 6,
            queue: (8, 28),
            wait: (20, 65),
            beds: BedTemplate {
                total: 20,
                occupied: 11,
                reserved: 2,
                maintenance: 1,
                projected: 65,
                sections: &[
                    ("diag-a", "Imaging", 10, 6),
                    ("diag-b", "Lab Beds", 10, 5),
                ],
            },
            location: FloorLocation::new(1, 100.0, 50.0, 35.0, 25.0),
        },
        DepartmentTemplate {
            id: "icu",
            name: "ICU",
            capacity: 25,
            staff: 15,
            queue: (2, 7),
            wait: (10, 25),
            beds: BedTemplate {
                total: 15,
                occupied: 13,
                reserved: 1,
                maintenance: 0,
                projected: 95,
                sections: &[
                    ("icu-a", "General ICU", 8, 7),
                    ("icu-b", "Cardiac ICU", 7, 6),
                ],
            },
            location: FloorLocation::new(3, 40.0, 30.0, 30.0, 30.0),
        },
    ]
}

/// Generate the four seeded departments: Emergency, OPD, Diagnostics, ICU.
///
/// Utilization and status are derived from the drawn queue, so the set is
/// consistent from the first snapshot.
pub fn generate_departments(rng: &mut impl Rng) -> Vec<Department> {
    templates()
        .into_iter()
        .map(|t| {
            let queue = rng.gen_range(t.queue.0..t.queue.1);
            let mut dept = Department::new(t.id, t.name, t.capacity, t.staff)
                .with_queue(queue)
                .with_beds(build_beds(&t.beds))
                .with_location(t.location);
            dept.avg_wait_time = rng.gen_range(t.wait.0..t.wait.1);
            dept.trend = rng.gen_range(-10..10);
            dept
        })
        .collect()
}

fn build_beds(t: &BedTemplate) -> BedData {
    BedData {
        total: t.total,
        occupied: t.occupied,
        reserved: t.reserved,
        maintenance: t.maintenance,
        projected_occupancy: t.projected,
        sections: t
            .sections
            .iter()
            .map(|&(id, name, total, occupied)| BedSection::new(id, name, total, occupied))
            .collect(),
    }
}
