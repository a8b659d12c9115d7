use thiserror::Error;

/// Failures reported by the priority queue variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue is empty")]
    EmptyQueue,

    #[error("value is not tracked by the queue")]
    UnknownValue,

    #[error("value is already tracked by the queue")]
    DuplicateValue,

    /// Raised for a decrease-key that would raise the priority, and for
    /// priorities that cannot be ordered at all (NaN).
    #[error("priority is not valid for this operation")]
    InvalidPriority,
}

/// Failures reported by graph mutation and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range for a graph of {size} vertices")]
    OutOfRangeVertex { vertex: usize, size: usize },

    #[error("edge {index} does not exist on vertex {vertex} (out-degree {degree})")]
    EdgeOutOfRange {
        vertex: usize,
        index: usize,
        degree: usize,
    },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Top-level error for the simulation facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
