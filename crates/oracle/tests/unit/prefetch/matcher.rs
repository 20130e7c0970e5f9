//! # Access Matcher Tests
//!
//! Covers seeding, the refill window sliding across recorded hits, block
//! matching of live accesses, and clamping at the end of the trace.

use oracle_prefetch::common::PhysAddr;
use oracle_prefetch::prefetch::AccessMatcher;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::entries;

fn addrs(list: &[u64]) -> Vec<PhysAddr> {
    list.iter().copied().map(PhysAddr::new).collect()
}

// ══════════════════════════════════════════════════════════
// 1. Seeding
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, 4, 0)]
#[case(2, 4, 2)]
#[case(4, 4, 4)]
#[case(250, 4, 4)]
#[case(3, 0, 0)]
fn seed_takes_min_of_distance_and_len(
    #[case] distance: usize,
    #[case] len: usize,
    #[case] expected: usize,
) {
    let rows: Vec<(u64, u64, bool)> = (0..len as u64).map(|i| (i, i << 12, true)).collect();
    let trace = entries(&rows);
    let matcher = AccessMatcher::new(distance, 64);

    let seed = matcher.seed(&trace);
    assert_eq!(seed.len(), expected);
    for (i, addr) in seed.iter().enumerate() {
        assert_eq!(*addr, PhysAddr::new((i as u64) << 12));
    }
}

#[test]
fn fresh_matcher_state() {
    let matcher = AccessMatcher::new(5, 64);
    assert_eq!(matcher.notify_index(), 0);
    assert_eq!(matcher.hit_count(), 0);
    assert_eq!(matcher.cursor(), 0);
    assert_eq!(matcher.window(), 5);
    assert_eq!(matcher.distance(), 5);
    assert!(!matcher.is_exhausted());
}

#[rstest]
#[case(0)]
#[case(48)]
#[should_panic(expected = "block size must be a non-zero power of two")]
fn rejects_non_power_of_two_block(#[case] block: usize) {
    let _ = AccessMatcher::new(1, block);
}

// ══════════════════════════════════════════════════════════
// 2. Refill window
// ══════════════════════════════════════════════════════════

/// With no lookahead, a leading run of `n` hits yields `n + 1` refills.
#[test]
fn hit_run_with_zero_distance() {
    let trace = entries(&[
        (1, 0x1000, false),
        (2, 0x2000, false),
        (3, 0x3000, false),
        (4, 0x4000, true),
        (5, 0x5000, true),
    ]);
    let mut matcher = AccessMatcher::new(0, 64);

    let refills = matcher.observe(&trace, 0x9000);
    assert_eq!(refills, addrs(&[0x1000, 0x2000, 0x3000, 0x4000]));
    assert_eq!(matcher.hit_count(), 3);
    assert_eq!(matcher.notify_index(), 0);
    assert_eq!(matcher.cursor(), 3);
}

/// The window sits `distance` entries ahead and slides across the hit run.
#[test]
fn hit_run_with_lookahead() {
    let trace = entries(&[
        (1, 0x1000, false),
        (2, 0x2000, true),
        (3, 0x3000, true),
        (4, 0x4000, true),
        (5, 0x5000, true),
    ]);
    let mut matcher = AccessMatcher::new(2, 64);

    // Window at 2 emits 0x3000; entry 0 is a hit so it slides to 3 and emits
    // 0x4000; entry 1 is a miss so it stops.
    let refills = matcher.observe(&trace, 0x2000);
    assert_eq!(refills, addrs(&[0x3000, 0x4000]));
    assert_eq!(matcher.hit_count(), 1);
    // Cursor is now entry 1 (0x2000), which the access confirms.
    assert_eq!(matcher.notify_index(), 1);
    assert_eq!(matcher.cursor(), 2);
}

/// An all-hit trace lets the window run to the end in one notification.
#[test]
fn all_hits_run_to_end_of_trace() {
    let trace = entries(&[
        (1, 0x1000, false),
        (2, 0x2000, false),
        (3, 0x3000, false),
        (4, 0x4000, false),
        (5, 0x5000, false),
    ]);
    let mut matcher = AccessMatcher::new(2, 64);

    let refills = matcher.observe(&trace, 0xdead_0000);
    assert_eq!(refills, addrs(&[0x3000, 0x4000, 0x5000]));
    assert_eq!(matcher.hit_count(), 3);
    assert!(!matcher.is_exhausted());

    // Window is past the end: nothing more to emit.
    assert!(matcher.observe(&trace, 0xdead_0000).is_empty());
}

/// Without progress the same window entry is emitted again.
#[test]
fn mismatch_does_not_advance() {
    let trace = entries(&[(1, 0x1000, true), (2, 0x2000, true), (3, 0x3000, true)]);
    let mut matcher = AccessMatcher::new(1, 64);

    assert_eq!(matcher.observe(&trace, 0x1040), addrs(&[0x2000]));
    assert_eq!(matcher.notify_index(), 0);
    assert_eq!(matcher.observe(&trace, 0x5000), addrs(&[0x2000]));
    assert_eq!(matcher.notify_index(), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Matching
// ══════════════════════════════════════════════════════════

/// Any address inside the expected block confirms it.
#[rstest]
#[case(0x1000)]
#[case(0x1010)]
#[case(0x103f)]
fn match_within_block(#[case] live: u64) {
    let trace = entries(&[(1, 0x1000, true), (2, 0x2000, true)]);
    let mut matcher = AccessMatcher::new(1, 64);

    let _ = matcher.observe(&trace, live);
    assert_eq!(matcher.notify_index(), 1);
}

#[test]
fn walk_through_miss_trace() {
    let trace = entries(&[(1, 0x1000, true), (2, 0x2000, true), (3, 0x3000, true)]);
    let mut matcher = AccessMatcher::new(1, 64);

    assert_eq!(matcher.observe(&trace, 0x1010), addrs(&[0x2000]));
    assert_eq!(matcher.observe(&trace, 0x2000), addrs(&[0x3000]));
    assert!(!matcher.is_exhausted());
    assert!(matcher.observe(&trace, 0x3000).is_empty());
    assert_eq!(matcher.notify_index(), 3);
    assert_eq!(matcher.cursor(), trace.len());
    assert!(matcher.is_exhausted());
}

// ══════════════════════════════════════════════════════════
// 4. End of trace
// ══════════════════════════════════════════════════════════

#[test]
fn exhausted_matcher_clamps() {
    let trace = entries(&[(1, 0x1000, true)]);
    let mut matcher = AccessMatcher::new(1, 64);

    assert!(matcher.observe(&trace, 0x1000).is_empty());
    assert_eq!(matcher.notify_index(), 1);
    assert!(matcher.is_exhausted());

    for _ in 0..10 {
        assert!(matcher.observe(&trace, 0x1000).is_empty());
    }
    assert!(matcher.is_exhausted());
    assert_eq!(matcher.notify_index(), 1);
    assert_eq!(matcher.cursor(), 1);
}

#[test]
fn empty_trace_is_inert() {
    let trace = entries(&[]);
    let mut matcher = AccessMatcher::new(4, 64);
    assert!(matcher.seed(&trace).is_empty());
    assert!(matcher.observe(&trace, 0x1000).is_empty());
    assert!(matcher.is_exhausted());
}

proptest! {
    /// Progress never goes backwards and never leaves the trace.
    #[test]
    fn cursor_is_monotonic_and_bounded(
        rows in prop::collection::vec((0u64..6, any::<bool>()), 0..32),
        distance in 0usize..8,
        live in prop::collection::vec(0u64..6, 0..64),
    ) {
        let tuples: Vec<(u64, u64, bool)> = rows
            .iter()
            .enumerate()
            .map(|(i, &(block, miss))| (i as u64, block << 6, miss))
            .collect();
        let trace = entries(&tuples);
        let mut matcher = AccessMatcher::new(distance, 64);

        for block in live {
            let before = (matcher.notify_index(), matcher.hit_count());
            let refills = matcher.observe(&trace, block << 6);

            prop_assert!(matcher.notify_index() >= before.0);
            prop_assert!(matcher.notify_index() <= before.0 + 1);
            prop_assert!(matcher.hit_count() >= before.1);
            prop_assert!(matcher.cursor() <= trace.len());
            prop_assert!(refills.len() <= trace.len());
            prop_assert_eq!(matcher.is_exhausted(), matcher.cursor() == trace.len());
        }
    }
}
