//! Array-backed binary min-heap with operation counters.
//!
//! Elements live in a single `Vec` laid out in the usual implicit-tree
//! order: the children of slot `i` sit at `2i + 1` and `2i + 2`, its parent
//! at `(i - 1) / 2`. The root (slot 0) is always the minimum.
//!
//! Every comparison, swap, storage access and growth is reported to a
//! [`MetricsCollector`] unless tracking was switched off at construction.

use std::rc::Rc;

use tracing::trace;

use crate::{HeapError, MetricsCollector};

/// Capacity used when none (or zero) is requested.
pub const DEFAULT_CAPACITY: usize = 16;

#[inline]
const fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
const fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// A binary min-heap that counts the work it does.
///
/// # Example
///
/// ```
/// use nexus_heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.insert(30);
/// heap.insert(10);
/// heap.insert(20);
///
/// assert_eq!(heap.peek(), Ok(&10));
/// assert_eq!(heap.extract_min(), Ok(10));
/// assert_eq!(heap.extract_min(), Ok(20));
/// assert_eq!(heap.extract_min(), Ok(30));
/// assert!(heap.extract_min().is_err());
///
/// assert!(heap.metrics().comparisons() > 0);
/// ```
///
/// # Capacity
///
/// The heap tracks its own logical capacity and grows it to
/// `max(required, 2 * capacity)` whenever an insert or merge would overflow.
/// Capacity never shrinks. Each growth counts as one allocation.
///
/// # Shared metrics
///
/// The collector is held through an `Rc`. Pass the same handle to several
/// heaps to aggregate their costs:
///
/// ```
/// use nexus_heap::{MetricsCollector, MinHeap};
/// use std::rc::Rc;
///
/// let metrics = Rc::new(MetricsCollector::new());
/// let mut heap: MinHeap<i32> = MinHeap::with_config(4, true, Some(Rc::clone(&metrics)));
/// heap.insert(1);
/// assert_eq!(metrics.allocations(), 1);
/// assert_eq!(metrics.array_accesses(), 1);
/// ```
#[derive(Debug)]
pub struct MinHeap<T> {
    /// Valid elements, heap-ordered. `data.len()` is the logical count.
    data: Vec<T>,
    /// Logical capacity; drives the growth policy and allocation counting.
    capacity: usize,
    metrics: Rc<MetricsCollector>,
    track: bool,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap with [`DEFAULT_CAPACITY`], tracking enabled and
    /// a private collector.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CAPACITY, true, None)
    }

    /// Creates an empty heap with the given capacity, tracking enabled and a
    /// private collector.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, true, None)
    }

    /// Creates an empty heap.
    ///
    /// - `capacity` of zero falls back to [`DEFAULT_CAPACITY`].
    /// - `metrics` of `None` creates a private collector.
    /// - With `track_metrics` false no counter is ever touched, even on a
    ///   supplied collector.
    ///
    /// Counts one allocation when tracking.
    pub fn with_config(
        capacity: usize,
        track_metrics: bool,
        metrics: Option<Rc<MetricsCollector>>,
    ) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        let heap = Self {
            data: Vec::with_capacity(capacity),
            capacity,
            metrics: metrics.unwrap_or_default(),
            track: track_metrics,
        };
        heap.count_allocation();
        heap
    }

    /// Builds a heap from `elements` in linear time.
    ///
    /// The heap gets capacity `max(len, DEFAULT_CAPACITY)` and a fresh
    /// private collector. An empty vector yields a valid empty heap.
    ///
    /// ```
    /// use nexus_heap::MinHeap;
    ///
    /// let mut heap = MinHeap::build_heap(vec![5, 3, 8, 1, 2, 7, 4]);
    /// let mut out = Vec::new();
    /// while let Ok(v) = heap.extract_min() {
    ///     out.push(v);
    /// }
    /// assert_eq!(out, vec![1, 2, 3, 4, 5, 7, 8]);
    /// ```
    pub fn build_heap(elements: Vec<T>) -> Self {
        let len = elements.len();
        let mut heap = Self::with_config(len.max(DEFAULT_CAPACITY), true, None);
        if len > 0 {
            heap.data.extend(elements);
            heap.count_accesses(len as u64);
            heap.heapify();
        }
        heap
    }

    /// Copies `elements` into a new heap and heapifies it.
    pub fn from_slice(elements: &[T]) -> Self
    where
        T: Clone,
    {
        Self::build_heap(elements.to_vec())
    }

    /// Materializes any collection and builds a heap from it.
    ///
    /// Element order is whatever the iterator yields; the resulting heap is
    /// valid either way.
    pub fn from_collection<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::build_heap(elements.into_iter().collect())
    }

    /// Returns the number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the logical capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if operations are being counted.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.track
    }

    /// Returns the collector this heap reports into.
    #[inline]
    pub fn metrics(&self) -> &Rc<MetricsCollector> {
        &self.metrics
    }

    /// Valid elements in storage order (not sorted).
    ///
    /// Does not count as an access.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the heap, returning its elements in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns `true` if every element is no smaller than its parent.
    ///
    /// Uncounted; intended for assertions.
    pub fn is_heap(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[i] >= self.data[parent(i)])
    }

    /// Returns the minimum element without removing it.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyStructure`] if the heap is empty.
    pub fn peek(&self) -> Result<&T, HeapError> {
        let min = self.data.first().ok_or(HeapError::EmptyStructure)?;
        self.count_accesses(1);
        Ok(min)
    }

    /// Inserts a value, sifting it up into place.
    pub fn insert(&mut self, value: T) {
        self.ensure_capacity(self.data.len() + 1);
        self.data.push(value);
        self.count_accesses(1);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the minimum element.
    ///
    /// The last element moves to the root and is sifted down.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyStructure`] if the heap is empty.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyStructure);
        }

        self.count_accesses(1);
        let min = self.data.swap_remove(0);

        if self.data.is_empty() {
            // root slot cleared
            self.count_accesses(1);
        } else {
            // last moved to root, its old slot cleared
            self.count_accesses(2);
            self.sift_down(0);
        }

        Ok(min)
    }

    /// Replaces the element at storage position `index` with a smaller (or
    /// equal) value and sifts it up.
    ///
    /// Positions are those of [`as_slice`](Self::as_slice). The rest of the
    /// heap is assumed valid and is not re-checked.
    ///
    /// # Errors
    ///
    /// - [`HeapError::IndexOutOfRange`] if `index >= len`.
    /// - [`HeapError::InvalidArgument`] if `new_value` is greater than the
    ///   current value.
    ///
    /// A rejected value still counts one access and one comparison, the
    /// read that validated it. An out-of-range index counts nothing.
    ///
    /// ```
    /// use nexus_heap::{HeapError, MinHeap};
    ///
    /// let mut heap = MinHeap::new();
    /// heap.insert(10);
    /// heap.insert(20);
    /// heap.insert(30);
    ///
    /// heap.decrease_key(2, 5).unwrap();
    /// assert_eq!(heap.peek(), Ok(&5));
    ///
    /// assert!(matches!(heap.decrease_key(1, 99), Err(HeapError::InvalidArgument { .. })));
    /// assert!(matches!(heap.decrease_key(3, 1), Err(HeapError::IndexOutOfRange { .. })));
    /// ```
    pub fn decrease_key(&mut self, index: usize, new_value: T) -> Result<(), HeapError> {
        let len = self.data.len();
        if index >= len {
            return Err(HeapError::IndexOutOfRange { index, len });
        }

        self.count_accesses(1);
        self.count_comparisons(1);
        if new_value > self.data[index] {
            return Err(HeapError::InvalidArgument {
                reason: "new value greater than current",
            });
        }

        self.data[index] = new_value;
        self.count_accesses(1);
        self.sift_up(index);
        Ok(())
    }

    /// Moves every element of `other` into this heap and rebuilds the heap
    /// order once.
    ///
    /// `other` is consumed. Its collector is left untouched; work done here
    /// is reported to this heap's collector. An empty `other` is a no-op.
    pub fn merge(&mut self, other: MinHeap<T>) {
        if other.is_empty() {
            return;
        }

        let incoming = other.data.len();
        self.ensure_capacity(self.data.len() + incoming);
        self.data.extend(other.data);
        self.count_accesses(incoming as u64);
        self.heapify();
    }

    /// Removes all elements, dropping them immediately.
    ///
    /// Capacity is kept. Counts one access per cleared slot.
    pub fn clear(&mut self) {
        let cleared = self.data.len();
        self.data.clear();
        if cleared > 0 {
            self.count_accesses(cleared as u64);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_capacity(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }

        let new_capacity = required.max(self.capacity.saturating_mul(2));
        self.data.reserve_exact(new_capacity - self.data.len());
        trace!(from = self.capacity, to = new_capacity, "grew heap storage");
        self.capacity = new_capacity;
        self.count_allocation();
    }

    /// Sift-down every internal node, last to first.
    fn heapify(&mut self) {
        let len = self.data.len();
        if len <= 1 {
            return;
        }
        for i in (0..=parent(len - 1)).rev() {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, pos: usize) {
        let mut cur = pos;
        while cur > 0 {
            let p = parent(cur);
            if self.less(cur, p) {
                self.swap(cur, p);
                cur = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, pos: usize) {
        let len = self.data.len();
        let mut cur = pos;
        loop {
            let left = left_child(cur);
            let right = left + 1;
            let mut smallest = cur;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }

            if smallest == cur {
                break;
            }
            self.swap(cur, smallest);
            cur = smallest;
        }
    }

    /// Counted `data[a] < data[b]`.
    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.count_accesses(2);
        self.count_comparisons(1);
        self.data[a] < self.data[b]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        if self.track {
            self.metrics.inc_swaps(1);
            self.metrics.inc_array_accesses(3);
        }
    }

    #[inline]
    fn count_accesses(&self, amount: u64) {
        if self.track {
            self.metrics.inc_array_accesses(amount);
        }
    }

    #[inline]
    fn count_comparisons(&self, amount: u64) {
        if self.track {
            self.metrics.inc_comparisons(amount);
        }
    }

    #[inline]
    fn count_allocation(&self) {
        if self.track {
            self.metrics.inc_allocations(1);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_collection(iter)
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
