use std::collections::HashMap;
use std::hash::Hash;

use super::{PriorityQueue, is_comparable};
use crate::error::QueueError;

#[derive(Debug, Clone)]
struct HeapNode<V, P> {
    value: V,
    priority: P,
}

/// Binary min-heap with a value → slot index.
///
/// Values are unique. Every swap updates the index for both values, so
/// `positions[nodes[i].value] == i` holds after each public call.
#[derive(Debug, Clone)]
pub struct IndexedHeap<V, P> {
    nodes: Vec<HeapNode<V, P>>,
    positions: HashMap<V, usize>,
}

impl<V, P> Default for IndexedHeap<V, P> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V, P> IndexedHeap<V, P>
where
    V: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    /// Current priority of a queued value.
    pub fn priority_of(&self, value: &V) -> Option<P> {
        self.positions.get(value).map(|&i| self.nodes[i].priority)
    }

    /// Lower the priority of a queued value and restore heap order.
    ///
    /// Lowering to the current priority is a no-op.
    pub fn decrease_key(&mut self, value: &V, priority: P) -> Result<(), QueueError> {
        let &pos = self.positions.get(value).ok_or(QueueError::UnknownValue)?;
        if !is_comparable(&priority) || priority > self.nodes[pos].priority {
            return Err(QueueError::InvalidPriority);
        }
        self.nodes[pos].priority = priority;
        self.sift_up(pos);
        Ok(())
    }

    /// Drop a queued value wherever it sits.
    pub fn remove(&mut self, value: &V) -> Option<P> {
        let pos = self.positions.remove(value)?;
        let last = self.nodes.len() - 1;
        if pos != last {
            self.swap(pos, last);
        }
        let node = self.nodes.pop()?;
        if pos < self.nodes.len() {
            // The moved node may belong above or below its new slot.
            self.sift_up(pos);
            self.sift_down(pos);
        }
        Some(node.priority)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.positions.clear();
    }

    /// Entries in heap-array order (not priority order).
    pub fn iter(&self) -> impl Iterator<Item = (&V, &P)> {
        self.nodes.iter().map(|n| (&n.value, &n.priority))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        if let Some(slot) = self.positions.get_mut(&self.nodes[a].value) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(&self.nodes[b].value) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[i].priority < self.nodes[parent].priority {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.nodes[left].priority < self.nodes[smallest].priority {
                smallest = left;
            }
            if right < len && self.nodes[right].priority < self.nodes[smallest].priority {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn invariants_hold(&self) -> bool {
        let ordered = (1..self.nodes.len())
            .all(|i| !(self.nodes[i].priority < self.nodes[(i - 1) / 2].priority));
        let indexed = self.positions.len() == self.nodes.len()
            && self
                .nodes
                .iter()
                .enumerate()
                .all(|(i, n)| self.positions.get(&n.value) == Some(&i));
        ordered && indexed
    }
}

impl<V, P> PriorityQueue<V, P> for IndexedHeap<V, P>
where
    V: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    fn insert(&mut self, value: V, priority: P) -> Result<(), QueueError> {
        if !is_comparable(&priority) {
            return Err(QueueError::InvalidPriority);
        }
        if self.positions.contains_key(&value) {
            return Err(QueueError::DuplicateValue);
        }
        let pos = self.nodes.len();
        self.positions.insert(value.clone(), pos);
        self.nodes.push(HeapNode { value, priority });
        self.sift_up(pos);
        Ok(())
    }

    fn peek(&self) -> Option<(&V, &P)> {
        self.nodes.first().map(|n| (&n.value, &n.priority))
    }

    fn extract_min(&mut self) -> Result<(V, P), QueueError> {
        if self.nodes.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let last = self.nodes.len() - 1;
        self.swap(0, last);
        let node = self.nodes.pop().ok_or(QueueError::EmptyQueue)?;
        self.positions.remove(&node.value);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok((node.value, node.priority))
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn extract_min_returns_ascending_priorities() {
        let mut heap = IndexedHeap::new();
        for (v, p) in [(1, 50), (2, 10), (3, 40), (4, 20), (5, 30)] {
            heap.insert(v, p).unwrap();
            assert!(heap.invariants_hold());
        }
        let mut out = Vec::new();
        while let Ok((v, _)) = heap.extract_min() {
            assert!(heap.invariants_hold());
            out.push(v);
        }
        assert_eq!(out, vec![2, 4, 5, 3, 1]);
    }

    #[test]
    fn empty_heap_reports_empty_queue() {
        let mut heap: IndexedHeap<u32, u32> = IndexedHeap::new();
        assert_eq!(heap.extract_min(), Err(QueueError::EmptyQueue));
        assert!(heap.peek().is_none());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut heap = IndexedHeap::new();
        heap.insert("a", 1).unwrap();
        assert_eq!(heap.insert("a", 0), Err(QueueError::DuplicateValue));
        assert_eq!(heap.priority_of(&"a"), Some(1));
    }

    #[test]
    fn decrease_key_moves_value_to_root() {
        let mut heap = IndexedHeap::new();
        for v in 0..10u32 {
            heap.insert(v, 100 + v).unwrap();
        }
        heap.decrease_key(&9, 1).unwrap();
        assert!(heap.invariants_hold());
        assert_eq!(heap.peek(), Some((&9, &1)));
    }

    #[test]
    fn decrease_key_unknown_value() {
        let mut heap = IndexedHeap::new();
        heap.insert(1u32, 5u32).unwrap();
        assert_eq!(heap.decrease_key(&2, 1), Err(QueueError::UnknownValue));
    }

    #[test]
    fn decrease_key_rejects_increase() {
        let mut heap = IndexedHeap::new();
        heap.insert(1u32, 5u32).unwrap();
        assert_eq!(heap.decrease_key(&1, 6), Err(QueueError::InvalidPriority));
        assert_eq!(heap.priority_of(&1), Some(5));
    }

    #[test]
    fn decrease_key_to_same_priority_is_noop() {
        let mut heap = IndexedHeap::new();
        heap.insert(1u32, 5u32).unwrap();
        heap.insert(2u32, 3u32).unwrap();
        heap.decrease_key(&1, 5).unwrap();
        assert_eq!(heap.peek(), Some((&2, &3)));
    }

    #[test]
    fn remove_from_middle_keeps_order() {
        let mut heap = IndexedHeap::new();
        for v in 0..20u32 {
            heap.insert(v, (v * 7) % 20).unwrap();
        }
        assert_eq!(heap.remove(&5), Some(15));
        assert_eq!(heap.remove(&5), None);
        assert!(heap.invariants_hold());
        assert_eq!(heap.len(), 19);
    }

    #[test]
    fn random_operations_preserve_invariants() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut heap = IndexedHeap::new();
        let mut next_value = 0u32;
        for _ in 0..2_000 {
            match rng.random_range(0..4) {
                0 | 1 => {
                    heap.insert(next_value, rng.random_range(0..1_000u32)).unwrap();
                    next_value += 1;
                }
                2 => {
                    let _ = heap.extract_min();
                }
                _ => {
                    if next_value > 0 {
                        let v = rng.random_range(0..next_value);
                        if let Some(p) = heap.priority_of(&v) {
                            heap.decrease_key(&v, p / 2).unwrap();
                        }
                    }
                }
            }
            assert!(heap.invariants_hold());
        }
    }
}
