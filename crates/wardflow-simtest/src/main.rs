//! WardFlow Headless Simulation Harness
//!
//! Drives a hospital engine in virtual time and checks the invariants every
//! snapshot must satisfy. Runs entirely in-process with a manual clock; no
//! timers unless `--realtime` is given.
//!
//! Usage:
//!   cargo run -p wardflow-simtest
//!   cargo run -p wardflow-simtest -- --verbose --minutes 60 --seed 7
//!   cargo run -p wardflow-simtest -- --config wardflow.json --realtime 5 --json
//!
//! Set `RUST_LOG=debug` to see every tick.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wardflow_core::generation::generate_ambulances;
use wardflow_core::prelude::*;
use wardflow_core::systems::{tick_ambulances, tick_patient_flow};
use wardflow_logic::ambulance::AmbulanceStatus;
use wardflow_logic::beds::SectionStatus;
use wardflow_logic::constants::HOUR_MS;
use wardflow_logic::department::{Department, DepartmentStatus};
use wardflow_logic::equipment::EquipmentStatus;
use wardflow_logic::kpi::{compute_kpis, efficiency_score, percent_change, KpiSnapshot};
use wardflow_logic::recommendations::generate_recommendations;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    seed: u64,
    minutes: u64,
    realtime: Option<u64>,
    config: Option<String>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };
        let number = |flag: &str| value_of(flag).and_then(|v| v.parse::<u64>().ok());

        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            seed: number("--seed").unwrap_or(42),
            minutes: number("--minutes").unwrap_or(30),
            realtime: number("--realtime"),
            config: value_of("--config"),
        }
    }
}

fn main() {
    env_logger::init();
    let opts = Options::from_args();
    println!("=== WardFlow Simulation Harness ===\n");

    let config = match &opts.config {
        Some(path) => match SimulationConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => SimulationConfig::seeded(opts.seed),
    };

    let mut results = Vec::new();

    // 1. Seeded collections
    results.extend(validate_initial_state(&config, opts.verbose));

    // 2. Virtual-time run, every snapshot checked
    let final_state = validate_virtual_run(&config, opts.minutes, opts.verbose, &mut results);

    // 3. KPI aggregation edge cases
    results.extend(validate_kpis(opts.verbose));

    // 4. Recommendation ordering and limits
    results.extend(validate_recommendations(&config, opts.verbose));

    // 5. Fixed scenarios
    results.extend(validate_scenarios(&config, opts.verbose));

    // 6. Real timers
    if let Some(seconds) = opts.realtime {
        results.extend(validate_realtime(&config, seconds, opts.verbose));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if opts.json {
        if let Some(state) = final_state {
            match serde_json::to_string_pretty(state.as_ref()) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("snapshot serialization failed: {}", e),
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn virtual_engine(config: &SimulationConfig) -> Option<(HospitalEngine, Arc<ManualClock>)> {
    // Monday 06:00 UTC, so a short run crosses the 08:00 peak
    let clock = Arc::new(ManualClock::at_utc(2024, 1, 8, 6));
    match HospitalEngine::with_clock(config.clone(), clock.clone()) {
        Ok(engine) => Some((engine, clock)),
        Err(e) => {
            eprintln!("engine construction failed: {}", e);
            None
        }
    }
}

// ── 1. Initial State ────────────────────────────────────────────────────

fn validate_initial_state(config: &SimulationConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Initial State ---");
    let mut results = Vec::new();

    let Some((engine, _clock)) = virtual_engine(config) else {
        results.push(TestResult {
            name: "engine_construct".into(),
            passed: false,
            detail: "engine refused the config".into(),
        });
        return results;
    };
    let state = engine.snapshot();

    let names: Vec<&str> = state.departments.iter().map(|d| d.name.as_str()).collect();
    results.push(TestResult {
        name: "init_departments".into(),
        passed: state.departments.len() == 4
            && state
                .departments
                .iter()
                .all(|d| d.beds.is_some() && d.location.is_some()),
        detail: format!("{} departments: {}", names.len(), names.join(", ")),
    });

    results.push(TestResult {
        name: "init_equipment".into(),
        passed: state.equipment.len() == 6 && state.equipment.iter().all(|e| e.is_consistent()),
        detail: format!("{} units with 24-hour demand curves", state.equipment.len()),
    });

    let statuses = [
        AmbulanceStatus::Available,
        AmbulanceStatus::Dispatched,
        AmbulanceStatus::Returning,
        AmbulanceStatus::Maintenance,
    ];
    let covered = statuses
        .iter()
        .all(|s| state.ambulances.iter().any(|a| a.status == *s));
    results.push(TestResult {
        name: "init_ambulances".into(),
        passed: state.ambulances.len() == 5 && covered,
        detail: format!("{} ambulances, every status present: {}", state.ambulances.len(), covered),
    });

    let future = state.predictions.iter().filter(|p| p.actual == 0).count();
    results.push(TestResult {
        name: "init_predictions".into(),
        passed: state.predictions.len() == 25 && future >= 12,
        detail: format!("{} points, {} without actuals", state.predictions.len(), future),
    });

    results.push(TestResult {
        name: "init_derivation".into(),
        passed: state.kpis.total_patients == state.total_queue() && !state.is_running,
        detail: format!(
            "{} patients, efficiency {}, {} recommendations",
            state.kpis.total_patients,
            state.kpis.efficiency,
            state.recommendations.len()
        ),
    });

    if verbose {
        for d in &state.departments {
            println!(
                "  {:12} queue {:3} / {:3}  util {:5.1}%  {:?}",
                d.name, d.current_queue, d.capacity, d.utilization, d.status
            );
        }
    }

    results
}

// ── 2. Virtual-Time Run ─────────────────────────────────────────────────

#[derive(Default)]
struct Violations {
    departments: usize,
    sections: usize,
    predictions: usize,
    ambulances: usize,
    equipment: usize,
    recommendations: usize,
    kpis: usize,
}

fn validate_virtual_run(
    config: &SimulationConfig,
    minutes: u64,
    verbose: bool,
    results: &mut Vec<TestResult>,
) -> Option<Arc<HospitalState>> {
    println!("--- Virtual Run ({} min) ---", minutes);

    let (mut engine, clock) = virtual_engine(config)?;
    let mut v = Violations::default();
    let mut peak_queue = 0;
    let mut dispatches = 0;
    let mut previous = engine.snapshot();
    let seconds = minutes * 60;

    for _ in 0..seconds {
        clock.advance(Duration::from_secs(1));
        engine.update(Duration::from_secs(1));
        let state = engine.snapshot();

        for d in &state.departments {
            if !d.is_consistent() || d.status != DepartmentStatus::from_utilization(d.utilization) {
                v.departments += 1;
            }
            if let Some(beds) = &d.beds {
                let bad = !beds.is_consistent()
                    || beds.sections.iter().any(|s| {
                        s.occupied > s.total
                            || s.status != SectionStatus::from_occupancy(s.occupied, s.total)
                    });
                if bad {
                    v.sections += 1;
                }
            }
        }

        let window = config.prediction_window.max(25);
        if state.predictions.len() > window
            || state
                .predictions
                .windows(2)
                .any(|w| w[1].timestamp - w[0].timestamp != HOUR_MS)
        {
            v.predictions += 1;
        }

        for a in &state.ambulances {
            if a.status.is_moving() != a.estimated_return_time.is_some() {
                v.ambulances += 1;
            }
            let was_available = previous
                .ambulance(&a.id)
                .map_or(false, |p| p.status == AmbulanceStatus::Available);
            if was_available && a.status == AmbulanceStatus::Dispatched {
                dispatches += 1;
            }
        }

        for e in &state.equipment {
            if e.current_usage > 100
                || (e.status == EquipmentStatus::Maintenance && e.current_usage != 0)
            {
                v.equipment += 1;
            }
        }

        let recs = &state.recommendations;
        if recs.len() > config.recommendations.max_items
            || recs
                .windows(2)
                .any(|w| w[0].priority.weight() < w[1].priority.weight())
        {
            v.recommendations += 1;
        }

        if state.kpis.efficiency > 100 || state.kpis.total_patients != state.total_queue() {
            v.kpis += 1;
        }

        peak_queue = peak_queue.max(state.total_queue());
        previous = state;
    }

    let checks = [
        ("run_department_load", v.departments, "utilization in [0,100], status matches thresholds"),
        ("run_bed_sections", v.sections, "occupancy within totals, section bands match"),
        ("run_prediction_window", v.predictions, "window respected, hourly spacing"),
        ("run_ambulance_return_time", v.ambulances, "moving ⇔ return time set"),
        ("run_equipment_usage", v.equipment, "usage in [0,100], zero in maintenance"),
        ("run_recommendations", v.recommendations, "capped and sorted by priority"),
        ("run_kpis", v.kpis, "efficiency in [0,100], totals match departments"),
    ];
    for (name, violations, what) in checks {
        results.push(TestResult {
            name: name.into(),
            passed: violations == 0,
            detail: if violations == 0 {
                what.to_string()
            } else {
                format!("{} violating snapshots ({})", violations, what)
            },
        });
    }

    let state = engine.snapshot();
    results.push(TestResult {
        name: "run_progress".into(),
        passed: seconds == 0 || state.revision > 1,
        detail: format!("{} publishes over {} s", state.revision, seconds),
    });

    if verbose {
        println!("  peak queue {}, {} dispatches", peak_queue, dispatches);
        println!(
            "  final: {} patients, avg wait {} min, efficiency {}",
            state.kpis.total_patients, state.kpis.avg_wait_time, state.kpis.efficiency
        );
    }

    Some(state)
}

// ── 3. KPIs ─────────────────────────────────────────────────────────────

fn validate_kpis(_verbose: bool) -> Vec<TestResult> {
    println!("--- KPIs ---");
    let mut results = Vec::new();

    let extremes = [
        efficiency_score(1000.0, 0.0),
        efficiency_score(1000.0, 100.0),
        efficiency_score(0.0, 75.0),
    ];
    results.push(TestResult {
        name: "kpi_efficiency_extremes".into(),
        passed: extremes[0] == 0 && extremes[1] == 0 && extremes[2] == 100,
        detail: format!("wait=1000 → {}/{}, ideal → {}", extremes[0], extremes[1], extremes[2]),
    });

    let empty = compute_kpis(&[], &KpiSnapshot::default());
    results.push(TestResult {
        name: "kpi_empty_departments".into(),
        passed: empty.total_patients == 0 && empty.avg_wait_time == 0,
        detail: "no departments aggregates to zero".into(),
    });

    let idle = vec![Department::new("opd", "OPD", 100, 12)];
    let kpis = compute_kpis(&idle, &KpiSnapshot::default());
    results.push(TestResult {
        name: "kpi_zero_queue".into(),
        passed: kpis.total_patients == 0 && kpis.efficiency <= 100,
        detail: format!("empty queues: wait {}, efficiency {}", kpis.avg_wait_time, kpis.efficiency),
    });

    results
}

// ── 4. Recommendations ──────────────────────────────────────────────────

fn validate_recommendations(config: &SimulationConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Recommendations ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));

    // Mixed load: overloaded, critical, idle
    let departments: Vec<Department> = (0..8)
        .map(|i| {
            let queue = [99, 90, 10, 96, 88, 5, 100, 20][i];
            Department::new(format!("d{}", i), format!("Dept {}", i), 100, 10).with_queue(queue)
        })
        .collect();
    let recs = generate_recommendations(&departments, &config.recommendations, &mut rng);

    let sorted = recs
        .windows(2)
        .all(|w| w[0].priority.weight() >= w[1].priority.weight());
    results.push(TestResult {
        name: "recs_capped_and_sorted".into(),
        passed: recs.len() <= config.recommendations.max_items && sorted,
        detail: format!("{} of 8 candidates kept, sorted={}", recs.len(), sorted),
    });

    if verbose {
        for r in &recs {
            println!("  {:?} {:10} {}% {}", r.priority, r.department, r.confidence, r.description);
        }
    }

    results
}

// ── 5. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(config: &SimulationConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));

    // Overloaded department clamps
    let overloaded = Department::new("er", "Emergency", 50, 8).with_queue(100);
    let after = tick_patient_flow(&[overloaded.clone()], &mut rng);
    results.push(TestResult {
        name: "scenario_overload_clamps".into(),
        passed: overloaded.utilization == 100.0
            && overloaded.status == DepartmentStatus::Critical
            && after[0].utilization <= 100.0,
        detail: format!(
            "queue 100 / capacity 50 → {}%, {:?}",
            overloaded.utilization, overloaded.status
        ),
    });

    // Maintenance exit rate
    let now = wardflow_logic::time::SimTime::new(0, 12, 3);
    let fleet = generate_ambulances(0);
    let in_maintenance: Vec<_> = fleet
        .into_iter()
        .filter(|a| a.status == AmbulanceStatus::Maintenance)
        .collect();
    let trials = 1_000;
    let exits = (0..trials)
        .filter(|_| {
            tick_ambulances(&in_maintenance, &now, &mut rng)
                .first()
                .map_or(false, |a| a.status == AmbulanceStatus::Available)
        })
        .count();
    let rate = exits as f64 / trials as f64;
    results.push(TestResult {
        name: "scenario_maintenance_exit_rate".into(),
        passed: !in_maintenance.is_empty() && (rate - 0.10).abs() < 0.04,
        detail: format!("{:.1}% over {} ticks", rate * 100.0, trials),
    });

    // Reset: KPIs relative to the pre-reset snapshot
    if let Some((mut engine, _clock)) = virtual_engine(config) {
        for _ in 0..5 {
            engine.step(TickKind::PatientFlow);
        }
        let before = engine.snapshot();
        engine.reset();
        let after = engine.snapshot();
        let expected = percent_change(after.kpis.total_patients, before.kpis.total_patients);
        results.push(TestResult {
            name: "scenario_reset_kpis".into(),
            passed: after.previous_kpis == before.kpis
                && after.kpis.patient_change == expected
                && !after.is_running,
            detail: format!(
                "{} → {} patients, change {}%",
                before.kpis.total_patients, after.kpis.total_patients, after.kpis.patient_change
            ),
        });
    }

    results
}

// ── 6. Real-Time Timers ─────────────────────────────────────────────────

fn validate_realtime(config: &SimulationConfig, seconds: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Real-Time ({} s) ---", seconds);
    let mut results = Vec::new();

    let mut engine = match HospitalEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(TestResult {
                name: "realtime_construct".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let start_revision = engine.snapshot().revision;
    let started = engine.start().unwrap_or(false);
    let double_start = engine.start().unwrap_or(true);
    thread::sleep(Duration::from_secs(seconds));
    let running = engine.snapshot().is_running;
    let stopped = engine.stop();

    let frozen = engine.snapshot().revision;
    thread::sleep(Duration::from_millis(250));
    let still = engine.snapshot().revision;

    results.push(TestResult {
        name: "realtime_start_stop".into(),
        passed: started && !double_start && running && stopped && !engine.stop(),
        detail: "start/stop idempotent, isRunning tracked".into(),
    });
    results.push(TestResult {
        name: "realtime_ticks".into(),
        passed: seconds < 3 || frozen > start_revision,
        detail: format!("{} publishes while running", frozen - start_revision),
    });
    results.push(TestResult {
        name: "realtime_stop_freezes".into(),
        passed: frozen == still,
        detail: "no mutation after stop".into(),
    });

    if verbose {
        let state = engine.snapshot();
        println!(
            "  {} patients, {} predictions, {} recommendations",
            state.kpis.total_patients,
            state.predictions.len(),
            state.recommendations.len()
        );
    }

    results
}
