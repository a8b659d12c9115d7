//! Priority queues shared by the round scheduler and the router.
//!
//! Two variants sit behind the [`PriorityQueue`] trait:
//! - [`OrderedQueue`] keeps entries in a sorted `Vec`. Head is the lowest
//!   priority and equal priorities keep insertion order. Used for callback
//!   lists that are traversed without removal.
//! - [`IndexedHeap`] is a binary min-heap with a value → slot index, giving
//!   logarithmic insert/extract and decrease-key. Used for Dijkstra and for
//!   timers.
//!
//! [`AnyQueue`] picks one of the two at runtime from a [`QueueMode`].

mod heap;
mod ordered;

use std::hash::Hash;

pub use heap::IndexedHeap;
pub use ordered::OrderedQueue;

use crate::error::QueueError;

/// Operations common to both queue variants.
pub trait PriorityQueue<V, P> {
    /// Add `value` with `priority`.
    fn insert(&mut self, value: V, priority: P) -> Result<(), QueueError>;

    /// The minimum entry, without removing it.
    fn peek(&self) -> Option<(&V, &P)>;

    /// Remove and return the minimum entry.
    fn extract_min(&mut self) -> Result<(V, P), QueueError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// NaN is the only value that fails to compare with itself.
pub(crate) fn is_comparable<P: PartialOrd>(priority: &P) -> bool {
    priority.partial_cmp(priority).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueMode {
    /// Sorted sequence, linear insert, duplicates allowed.
    #[default]
    Ordered,
    /// Indexed binary heap, unique values.
    Indexed,
}

/// A priority queue whose backing variant is chosen at construction.
#[derive(Debug, Clone)]
pub enum AnyQueue<V, P> {
    Ordered(OrderedQueue<V, P>),
    Indexed(IndexedHeap<V, P>),
}

impl<V, P> AnyQueue<V, P>
where
    V: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    pub fn new(mode: QueueMode) -> Self {
        match mode {
            QueueMode::Ordered => AnyQueue::Ordered(OrderedQueue::new()),
            QueueMode::Indexed => AnyQueue::Indexed(IndexedHeap::new()),
        }
    }

    pub fn mode(&self) -> QueueMode {
        match self {
            AnyQueue::Ordered(_) => QueueMode::Ordered,
            AnyQueue::Indexed(_) => QueueMode::Indexed,
        }
    }

    pub fn decrease_key(&mut self, value: &V, priority: P) -> Result<(), QueueError> {
        match self {
            AnyQueue::Ordered(q) => q.decrease_key(value, priority),
            AnyQueue::Indexed(q) => q.decrease_key(value, priority),
        }
    }
}

impl<V, P> PriorityQueue<V, P> for AnyQueue<V, P>
where
    V: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    fn insert(&mut self, value: V, priority: P) -> Result<(), QueueError> {
        match self {
            AnyQueue::Ordered(q) => q.insert(value, priority),
            AnyQueue::Indexed(q) => q.insert(value, priority),
        }
    }

    fn peek(&self) -> Option<(&V, &P)> {
        match self {
            AnyQueue::Ordered(q) => q.peek(),
            AnyQueue::Indexed(q) => q.peek(),
        }
    }

    fn extract_min(&mut self) -> Result<(V, P), QueueError> {
        match self {
            AnyQueue::Ordered(q) => q.extract_min(),
            AnyQueue::Indexed(q) => q.extract_min(),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyQueue::Ordered(q) => q.len(),
            AnyQueue::Indexed(q) => q.len(),
        }
    }
}
