//! Instrumented binary min-heap.
//!
//! [`MinHeap`] is a classic array-backed binary heap that reports what it
//! costs. Every comparison, swap, storage access and growth is counted in a
//! [`MetricsCollector`], which makes the crate useful for studying the
//! behaviour of heap algorithms rather than just using one.
//!
//! # Quick Start
//!
//! ```
//! use nexus_heap::MinHeap;
//!
//! let mut heap = MinHeap::build_heap(vec![5, 3, 8, 1, 2, 7, 4]);
//! heap.insert(0);
//!
//! assert_eq!(heap.extract_min(), Ok(0));
//! assert_eq!(heap.extract_min(), Ok(1));
//!
//! let m = heap.metrics();
//! println!("{}", m.csv_header());
//! println!("{}", m.csv_row());
//! ```
//!
//! # Operations
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | [`insert`](MinHeap::insert) | O(log n) | sift-up |
//! | [`extract_min`](MinHeap::extract_min) | O(log n) | sift-down |
//! | [`peek`](MinHeap::peek) | O(1) | |
//! | [`decrease_key`](MinHeap::decrease_key) | O(log n) | by storage position |
//! | [`merge`](MinHeap::merge) | O(n + m) | one rebuild, not m inserts |
//! | [`build_heap`](MinHeap::build_heap) | O(n) | bottom-up heapify |
//!
//! # Metrics Sharing
//!
//! Collectors are passed as `Rc<MetricsCollector>`. Hand the same `Rc` to
//! several heaps to aggregate their work, or let each heap create its own.
//! Neither the heap nor the collector is `Sync`; there is no internal
//! locking.
//!
//! # Benchmark Harness
//!
//! The [`runner`] module drives the heap through build / insert / drain
//! cycles and reports timings plus counters. The `heap_bench` binary wraps
//! it with a console front end.

#![warn(missing_docs)]

pub mod error;
pub mod heap;
pub mod metrics;
pub mod runner;

pub use error::HeapError;
pub use heap::{DEFAULT_CAPACITY, MinHeap};
pub use metrics::{MetricsCollector, MetricsSnapshot};
