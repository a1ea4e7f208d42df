//! Fixed-capacity retention of the K largest elements.
//!
//! [`BoundedTopK`] keeps its elements in a [`BinaryHeap`] of [`Reverse`]d values, so the
//! smallest retained element sits at the root. Deciding whether a candidate makes the cut is a
//! single comparison and an insertion costs `O(log K)`.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::AnalysisError;

/// Holds at most `capacity` elements, always the largest seen so far under `T`'s ordering.
#[derive(Debug)]
pub struct BoundedTopK<T> {
    /// Min-heap of retained elements.
    heap: BinaryHeap<Reverse<T>>,
    /// Maximum number of retained elements.
    capacity: usize,
}

impl<T: Ord> BoundedTopK<T> {
    /// Creates an empty collector retaining at most `capacity` elements.
    ///
    /// Fails with [`AnalysisError::InvalidArgument`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, AnalysisError> {
        if capacity == 0 {
            return Err(AnalysisError::InvalidArgument(
                "top-k capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            heap: BinaryHeap::with_capacity(capacity.min(4096) + 1),
            capacity,
        })
    }

    /// Maximum number of retained elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true once `capacity` elements are retained.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The smallest retained element.
    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(min)| min)
    }

    /// Returns true if `candidate` would be retained by [`insert`](Self::insert).
    pub fn would_accept(&self, candidate: &T) -> bool {
        match self.peek_min() {
            Some(min) if self.is_full() => candidate > min,
            _ => true,
        }
    }

    /// Offers an element.
    ///
    /// Returns the element that was discarded as a result: the previous minimum when the
    /// collector overflowed, the candidate itself when it did not make the cut, or `None` when
    /// nothing was discarded.
    pub fn insert(&mut self, item: T) -> Option<T> {
        if !self.would_accept(&item) {
            return Some(item);
        }
        self.heap.push(Reverse(item));
        if self.heap.len() > self.capacity {
            self.pop_min()
        } else {
            None
        }
    }

    /// Removes and returns the smallest retained element.
    pub fn pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(min)| min)
    }

    /// Consumes the collector, returning the retained elements largest first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // Ascending order of `Reverse<T>` is descending order of `T`.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(item)| item)
            .collect()
    }
}
