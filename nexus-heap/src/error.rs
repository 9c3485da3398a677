//! Error types for heap operations.

use thiserror::Error;

/// Failure returned by a [`MinHeap`](crate::MinHeap) operation.
///
/// Every fallible operation validates its arguments before touching the
/// heap, so an `Err` always leaves the heap exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `peek` or `extract_min` was called on a heap with no elements.
    #[error("heap is empty")]
    EmptyStructure,

    /// An argument was rejected.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: &'static str,
    },

    /// A positional index fell outside `[0, len)`.
    #[error("index {index} out of range for heap of length {len}")]
    IndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// Logical length of the heap at the time of the call.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(HeapError::EmptyStructure.to_string(), "heap is empty");
        assert_eq!(
            HeapError::InvalidArgument {
                reason: "new value greater than current"
            }
            .to_string(),
            "invalid argument: new value greater than current"
        );
        assert_eq!(
            HeapError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "index 7 out of range for heap of length 3"
        );
    }
}
