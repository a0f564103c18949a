//! Scheduler - one timer thread per tick processor.
//!
//! Each thread waits on its own `crossbeam_channel::tick` and a shared stop
//! channel. Stopping disconnects the stop channel and joins every thread,
//! so a tick that is already running finishes before `stop` returns.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TickPeriods;
use crate::error::{EngineError, EngineResult};
use crate::runner::{TickKind, TickRunner};

struct Timers {
    // Never sent on; dropping it wakes every thread
    stop: Sender<()>,
    threads: Vec<(TickKind, JoinHandle<()>)>,
}

#[derive(Default)]
pub struct Scheduler {
    timers: Option<Timers>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.timers.is_some()
    }

    /// Spawn the five timer threads. Returns `Ok(false)` if already running.
    /// Each thread gets its own generator seeded from `rng`.
    pub fn start(
        &mut self,
        runner: Arc<TickRunner>,
        periods: &TickPeriods,
        rng: &mut impl Rng,
    ) -> EngineResult<bool> {
        if self.timers.is_some() {
            return Ok(false);
        }

        let (stop_tx, stop_rx) = bounded::<()>(0);
        let mut threads = Vec::with_capacity(TickKind::ALL.len());

        for kind in TickKind::ALL {
            let period = kind.period(periods);
            let runner = Arc::clone(&runner);
            let stop = stop_rx.clone();
            let seed: u64 = rng.gen();

            let spawned = thread::Builder::new()
                .name(format!("wardflow-{}", kind.name()))
                .spawn(move || timer_loop(kind, period, &runner, &stop, seed));

            match spawned {
                Ok(handle) => threads.push((kind, handle)),
                Err(source) => {
                    drop(stop_tx);
                    join_all(threads);
                    return Err(EngineError::Spawn {
                        processor: kind.name(),
                        source,
                    });
                }
            }
        }

        info!("scheduler started {} timers", threads.len());
        self.timers = Some(Timers {
            stop: stop_tx,
            threads,
        });
        Ok(true)
    }

    /// Cancel every timer and wait for in-flight ticks. Returns `false` if
    /// nothing was running.
    pub fn stop(&mut self) -> bool {
        match self.timers.take() {
            Some(Timers { stop, threads }) => {
                drop(stop);
                join_all(threads);
                info!("scheduler stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn join_all(threads: Vec<(TickKind, JoinHandle<()>)>) {
    for (kind, handle) in threads {
        if handle.join().is_err() {
            error!("{} timer thread exited abnormally", kind.name());
        }
    }
}

fn timer_loop(kind: TickKind, period: Duration, runner: &TickRunner, stop: &Receiver<()>, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let ticker = tick(period);

    loop {
        select! {
            recv(stop) -> _ => break,
            recv(ticker) -> _ => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| runner.run(kind, &mut rng)));
                if outcome.is_err() {
                    error!("{} tick panicked; skipped", kind.name());
                }
            }
        }
    }
}
