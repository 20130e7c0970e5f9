//! Trace Replay Driver.
//!
//! Stands in for a cache's issue path: it walks a live access log, moves the
//! shared clock to each access's recorded tick, issues every request that is
//! ready by then, and notifies the prefetcher of the access. The result
//! reports how many demand accesses found their block already prefetched.

use std::collections::HashSet;

use super::clock::{Clock, SimClock};
use crate::common::Tick;
use crate::prefetch::Prefetcher;
use crate::prefetch::trace::PredictionTrace;

/// Outcome of one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Live accesses replayed.
    pub accesses: u64,
    /// Requests issued (dequeued) during the replay.
    pub issued: u64,
    /// Issued requests whose block had already been prefetched.
    pub redundant: u64,
    /// Accesses whose block had been prefetched before the access.
    pub covered: u64,
    /// Requests still queued when the log ended.
    pub leftover: u64,
    /// Clock value after the last access.
    pub final_tick: Tick,
}

impl ReplayReport {
    /// Covered accesses as a percentage of all accesses.
    pub fn coverage(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            100.0 * (self.covered as f64 / self.accesses as f64)
        }
    }

    /// Prints the replay report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("TRACE REPLAY");
        println!("==========================================================");
        println!("replay.accesses          {}", self.accesses);
        println!("replay.final_tick        {}", self.final_tick);
        println!("replay.issued            {}", self.issued);
        println!("replay.redundant         {}", self.redundant);
        println!("replay.leftover          {}", self.leftover);
        println!(
            "replay.covered           {} ({:.2}%)",
            self.covered,
            self.coverage()
        );
        println!("----------------------------------------------------------");
    }
}

/// Replays a live access log through a prefetcher.
#[derive(Clone, Debug)]
pub struct TraceReplay {
    clock: SimClock,
    block_size: u64,
}

impl TraceReplay {
    /// Creates a replay driver.
    ///
    /// # Arguments
    ///
    /// * `clock` - Handle to the same clock the prefetcher reads.
    /// * `block_size` - Block size in bytes (power of two) for coverage accounting.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is not a non-zero power of two.
    pub const fn new(clock: SimClock, block_size: usize) -> Self {
        assert!(block_size.is_power_of_two(), "block size must be a non-zero power of two");
        Self {
            clock,
            block_size: block_size as u64,
        }
    }

    /// Runs the replay.
    ///
    /// The clock never moves backwards; an access recorded earlier than the
    /// current tick is replayed at the current tick.
    pub fn run<P: Prefetcher + ?Sized>(
        &self,
        prefetcher: &mut P,
        accesses: &PredictionTrace,
    ) -> ReplayReport {
        let mut report = ReplayReport::default();
        let mut prefetched = HashSet::new();

        for access in accesses {
            if access.recorded_tick > self.clock.now() {
                self.clock.set(access.recorded_tick);
            }
            self.issue_ready(prefetcher, &mut prefetched, &mut report);

            let block = access.addr.block_align(self.block_size).val();
            if prefetched.contains(&block) {
                report.covered += 1;
            }
            report.accesses += 1;
            prefetcher.notify(access.addr.val());
        }

        self.issue_ready(prefetcher, &mut prefetched, &mut report);
        report.leftover = prefetcher.pending() as u64;
        report.final_tick = self.clock.now();

        tracing::info!(
            accesses = report.accesses,
            issued = report.issued,
            covered = report.covered,
            "trace replay finished"
        );
        report
    }

    /// Issues every request that is ready by the current tick.
    fn issue_ready<P: Prefetcher + ?Sized>(
        &self,
        prefetcher: &mut P,
        prefetched: &mut HashSet<u64>,
        report: &mut ReplayReport,
    ) {
        let now = self.clock.now();
        while prefetcher.next_ready_tick().is_some_and(|tick| tick <= now) {
            let Some(request) = prefetcher.dequeue() else {
                break;
            };
            report.issued += 1;
            if !prefetched.insert(request.addr().val()) {
                report.redundant += 1;
            }
        }
    }
}
