//! Prefetch statistics collection and reporting.
//!
//! This module tracks the engine counters exposed to the host. It provides:
//! 1. **Issued count:** Requests handed to the cache; the signal hosts report.
//! 2. **Engine activity:** Predictions loaded, requests synthesized, trace entries confirmed.

/// Snapshot of oracle prefetcher counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Predictions in the loaded trace.
    pub predictions: u64,
    /// Requests synthesized and queued.
    pub synthesized: u64,
    /// Requests handed out by `dequeue`.
    pub issued: u64,
    /// Live accesses that confirmed the next unconfirmed prediction.
    pub matched: u64,
}

impl PrefetchStats {
    /// Requests still queued (synthesized but not issued).
    pub const fn pending(&self) -> u64 {
        self.synthesized.saturating_sub(self.issued)
    }

    /// Fraction of the trace confirmed by the live stream, in percent.
    pub fn match_rate(&self) -> f64 {
        if self.predictions == 0 {
            0.0
        } else {
            100.0 * (self.matched as f64 / self.predictions as f64)
        }
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("ORACLE PREFETCHER STATISTICS");
        println!("==========================================================");
        println!("pf.predictions           {}", self.predictions);
        println!("pf.synthesized           {}", self.synthesized);
        println!("pf.issued                {}", self.issued);
        println!("pf.pending               {}", self.pending());
        println!(
            "pf.matched               {} ({:.2}%)",
            self.matched,
            self.match_rate()
        );
        println!("----------------------------------------------------------");
    }
}
