use super::{PriorityQueue, is_comparable};
use crate::error::QueueError;

#[derive(Debug, Clone)]
struct Entry<V, P> {
    value: V,
    priority: P,
}

/// Insertion-sorted sequence. Duplicates are allowed.
///
/// Traversal from the head yields ascending priority; an entry inserted with
/// a priority equal to existing ones lands after all of them.
#[derive(Debug, Clone)]
pub struct OrderedQueue<V, P> {
    entries: Vec<Entry<V, P>>,
}

impl<V, P> Default for OrderedQueue<V, P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V, P: PartialOrd> OrderedQueue<V, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value at the head (lowest priority), if any.
    pub fn head_value(&self) -> Option<&V> {
        self.entries.first().map(|e| &e.value)
    }

    /// Entries in priority order, without removal.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &P)> {
        self.entries.iter().map(|e| (&e.value, &e.priority))
    }

    /// Entries in priority order with mutable access to the values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&mut V, &P)> {
        self.entries.iter_mut().map(|e| (&mut e.value, &e.priority))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V: PartialEq, P: PartialOrd> OrderedQueue<V, P> {
    /// Lower the priority of the first entry holding `value` and move it
    /// behind any entries already at the new priority. Linear.
    ///
    /// Lowering to the current priority is a no-op.
    pub fn decrease_key(&mut self, value: &V, priority: P) -> Result<(), QueueError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.value == *value)
            .ok_or(QueueError::UnknownValue)?;
        if !is_comparable(&priority) || priority > self.entries[pos].priority {
            return Err(QueueError::InvalidPriority);
        }
        if priority == self.entries[pos].priority {
            return Ok(());
        }
        let entry = self.entries.remove(pos);
        self.insert(entry.value, priority)
    }
}

impl<V, P: PartialOrd> PriorityQueue<V, P> for OrderedQueue<V, P> {
    fn insert(&mut self, value: V, priority: P) -> Result<(), QueueError> {
        if !is_comparable(&priority) {
            return Err(QueueError::InvalidPriority);
        }
        // First slot whose priority is strictly greater keeps ties stable.
        let pos = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(pos, Entry { value, priority });
        Ok(())
    }

    fn peek(&self) -> Option<(&V, &P)> {
        self.entries.first().map(|e| (&e.value, &e.priority))
    }

    fn extract_min(&mut self) -> Result<(V, P), QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let entry = self.entries.remove(0);
        Ok((entry.value, entry.priority))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
