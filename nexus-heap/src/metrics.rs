//! Operation counters for instrumented data structures.
//!
//! A [`MetricsCollector`] is a bundle of five counters that a heap bumps as
//! it works. Collectors are shared through `Rc`, so several heaps can report
//! into the same bundle:
//!
//! ```
//! use nexus_heap::{MetricsCollector, MinHeap};
//! use std::rc::Rc;
//!
//! let metrics = Rc::new(MetricsCollector::new());
//! let mut a: MinHeap<u32> = MinHeap::with_config(16, true, Some(Rc::clone(&metrics)));
//! let mut b: MinHeap<u32> = MinHeap::with_config(16, true, Some(Rc::clone(&metrics)));
//!
//! a.insert(3);
//! b.insert(1);
//! a.merge(b);
//!
//! assert_eq!(metrics.allocations(), 2);
//! assert!(metrics.array_accesses() > 0);
//! ```
//!
//! Counters use `Cell`, which makes the collector `!Sync`. Sharing across
//! threads needs an outer lock, same as the heaps that write into it.

use std::cell::Cell;
use std::fmt;

/// Mutable bundle of algorithmic cost counters.
///
/// Increments take `&self`. Counters only move up, except through
/// [`reset`](Self::reset). Amounts are unsigned so a negative increment
/// cannot be expressed; increments saturate at `u64::MAX`.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    comparisons: Cell<u64>,
    swaps: Cell<u64>,
    array_accesses: Cell<u64>,
    allocations: Cell<u64>,
    recursive_calls: Cell<u64>,
}

#[inline]
fn bump(counter: &Cell<u64>, amount: u64) {
    counter.set(counter.get().saturating_add(amount));
}

impl MetricsCollector {
    /// Column names matching [`csv_row`](Self::csv_row), in order.
    pub const CSV_HEADER: &'static str =
        "comparisons,swaps,arrayAccesses,allocations,recursiveCalls";

    /// Creates a collector with all counters at zero.
    pub const fn new() -> Self {
        Self {
            comparisons: Cell::new(0),
            swaps: Cell::new(0),
            array_accesses: Cell::new(0),
            allocations: Cell::new(0),
            recursive_calls: Cell::new(0),
        }
    }

    /// Adds `amount` to the comparison counter.
    #[inline]
    pub fn inc_comparisons(&self, amount: u64) {
        bump(&self.comparisons, amount);
    }

    /// Adds `amount` to the swap counter.
    #[inline]
    pub fn inc_swaps(&self, amount: u64) {
        bump(&self.swaps, amount);
    }

    /// Adds `amount` to the array access counter.
    #[inline]
    pub fn inc_array_accesses(&self, amount: u64) {
        bump(&self.array_accesses, amount);
    }

    /// Adds `amount` to the allocation counter.
    #[inline]
    pub fn inc_allocations(&self, amount: u64) {
        bump(&self.allocations, amount);
    }

    /// Adds `amount` to the recursive call counter.
    ///
    /// The heap itself is iterative and never touches this counter.
    #[inline]
    pub fn inc_recursive_calls(&self, amount: u64) {
        bump(&self.recursive_calls, amount);
    }

    /// Number of element comparisons recorded.
    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Number of element swaps recorded.
    #[inline]
    pub fn swaps(&self) -> u64 {
        self.swaps.get()
    }

    /// Number of storage reads and writes recorded.
    #[inline]
    pub fn array_accesses(&self) -> u64 {
        self.array_accesses.get()
    }

    /// Number of storage allocations recorded.
    #[inline]
    pub fn allocations(&self) -> u64 {
        self.allocations.get()
    }

    /// Number of recursive calls recorded.
    #[inline]
    pub fn recursive_calls(&self) -> u64 {
        self.recursive_calls.get()
    }

    /// Zeroes all five counters.
    pub fn reset(&self) {
        self.comparisons.set(0);
        self.swaps.set(0);
        self.array_accesses.set(0);
        self.allocations.set(0);
        self.recursive_calls.set(0);
    }

    /// Returns a point-in-time copy of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            comparisons: self.comparisons(),
            swaps: self.swaps(),
            array_accesses: self.array_accesses(),
            allocations: self.allocations(),
            recursive_calls: self.recursive_calls(),
        }
    }

    /// Returns [`CSV_HEADER`](Self::CSV_HEADER).
    pub fn csv_header(&self) -> &'static str {
        Self::CSV_HEADER
    }

    /// Current counter values as a comma-joined row.
    pub fn csv_row(&self) -> String {
        self.snapshot().csv_row()
    }
}

/// Frozen copy of a [`MetricsCollector`].
///
/// `Display` renders the same row as [`csv_row`](Self::csv_row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Element comparisons.
    pub comparisons: u64,
    /// Element swaps.
    pub swaps: u64,
    /// Storage reads and writes.
    pub array_accesses: u64,
    /// Storage allocations.
    pub allocations: u64,
    /// Recursive calls.
    pub recursive_calls: u64,
}

impl MetricsSnapshot {
    /// Counter values as `comparisons,swaps,arrayAccesses,allocations,recursiveCalls`.
    pub fn csv_row(&self) -> String {
        self.to_string()
    }

    /// Work recorded between `earlier` and `self`.
    ///
    /// Useful on a shared collector, where absolute values mix the work of
    /// several heaps. Saturates at zero if the collector was reset in between.
    pub fn delta(&self, earlier: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            comparisons: self.comparisons.saturating_sub(earlier.comparisons),
            swaps: self.swaps.saturating_sub(earlier.swaps),
            array_accesses: self.array_accesses.saturating_sub(earlier.array_accesses),
            allocations: self.allocations.saturating_sub(earlier.allocations),
            recursive_calls: self.recursive_calls.saturating_sub(earlier.recursive_calls),
        }
    }

    /// Returns `true` if every counter in `self` is at least the one in `earlier`.
    pub fn dominates(&self, earlier: &MetricsSnapshot) -> bool {
        self.comparisons >= earlier.comparisons
            && self.swaps >= earlier.swaps
            && self.array_accesses >= earlier.array_accesses
            && self.allocations >= earlier.allocations
            && self.recursive_calls >= earlier.recursive_calls
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.comparisons,
            self.swaps,
            self.array_accesses,
            self.allocations,
            self.recursive_calls
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let m = MetricsCollector::new();
        assert_eq!(m.snapshot(), MetricsSnapshot::default());
        assert_eq!(m.csv_row(), "0,0,0,0,0");
    }

    #[test]
    fn increments_are_independent() {
        let m = MetricsCollector::new();
        m.inc_comparisons(1);
        m.inc_swaps(2);
        m.inc_array_accesses(3);
        m.inc_allocations(4);
        m.inc_recursive_calls(5);

        assert_eq!(m.comparisons(), 1);
        assert_eq!(m.swaps(), 2);
        assert_eq!(m.array_accesses(), 3);
        assert_eq!(m.allocations(), 4);
        assert_eq!(m.recursive_calls(), 5);
        assert_eq!(m.csv_row(), "1,2,3,4,5");
    }

    #[test]
    fn reset_zeroes_everything() {
        let m = MetricsCollector::new();
        m.inc_comparisons(10);
        m.inc_array_accesses(30);
        m.inc_recursive_calls(1);
        m.reset();
        assert_eq!(m.csv_row(), "0,0,0,0,0");
    }

    #[test]
    fn header_matches_row_arity() {
        let m = MetricsCollector::new();
        assert_eq!(m.csv_header(), MetricsCollector::CSV_HEADER);
        assert_eq!(
            m.csv_header().split(',').count(),
            m.csv_row().split(',').count()
        );
        assert_eq!(
            m.csv_header(),
            "comparisons,swaps,arrayAccesses,allocations,recursiveCalls"
        );
    }

    #[test]
    fn increments_saturate() {
        let m = MetricsCollector::new();
        m.inc_swaps(u64::MAX);
        m.inc_swaps(1);
        assert_eq!(m.swaps(), u64::MAX);
    }

    #[test]
    fn delta_between_snapshots() {
        let m = MetricsCollector::new();
        m.inc_comparisons(5);
        let before = m.snapshot();
        m.inc_comparisons(3);
        m.inc_allocations(1);
        let after = m.snapshot();

        let d = after.delta(&before);
        assert_eq!(d.comparisons, 3);
        assert_eq!(d.allocations, 1);
        assert_eq!(d.swaps, 0);
        assert!(after.dominates(&before));
        assert!(!before.dominates(&after));
    }

    #[test]
    fn delta_after_reset_saturates() {
        let m = MetricsCollector::new();
        m.inc_array_accesses(9);
        let before = m.snapshot();
        m.reset();
        assert_eq!(m.snapshot().delta(&before).array_accesses, 0);
    }

    #[test]
    fn display_is_csv_row() {
        let s = MetricsSnapshot {
            comparisons: 7,
            swaps: 6,
            array_accesses: 5,
            allocations: 4,
            recursive_calls: 3,
        };
        assert_eq!(s.to_string(), "7,6,5,4,3");
        assert_eq!(s.csv_row(), "7,6,5,4,3");
    }
}
