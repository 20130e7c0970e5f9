//! Mock collaborators.

use mockall::mock;
use oracle_prefetch::common::Tick;
use oracle_prefetch::prefetch::{PrefetchRequest, Prefetcher};
use oracle_prefetch::sim::Clock;

mock! {
    pub HostClock {}

    impl Clock for HostClock {
        fn now(&self) -> Tick;
    }
}

mock! {
    pub CachePrefetcher {}

    impl Prefetcher for CachePrefetcher {
        fn notify(&mut self, addr: u64);
        fn next_ready_tick(&self) -> Option<Tick>;
        fn dequeue(&mut self) -> Option<PrefetchRequest>;
        fn pending(&self) -> usize;
    }
}
