use crate::error::GraphError;

pub type Vertex = usize;

/// A directed, weighted edge. Identity is positional within its vertex's
/// list and is not stable across deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Vertex,
    pub cost: u64,
}

/// Adjacency-list graph over the fixed vertex set `0..size`.
///
/// Vertex ids never change. A deleted vertex keeps its id and simply has
/// no outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(size: usize) -> Self {
        Self {
            edges: vec![Vec::new(); size],
            edge_count: 0,
        }
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Append an edge. Parallel edges are allowed.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, cost: u64) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        self.edges[from].push(Edge { to, cost });
        self.edge_count += 1;
        Ok(())
    }

    /// Add an edge unless one `from → to` already exists, in which case the
    /// cheaper of the two costs is kept.
    pub fn add_edge_dedup(&mut self, from: Vertex, to: Vertex, cost: u64) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        if let Some(edge) = self.edges[from].iter_mut().find(|e| e.to == to) {
            edge.cost = edge.cost.min(cost);
            return Ok(());
        }
        self.add_edge(from, to, cost)
    }

    /// Deduplicated edges in both directions.
    pub fn add_undirected_edge(&mut self, a: Vertex, b: Vertex, cost: u64) -> Result<(), GraphError> {
        self.add_edge_dedup(a, b, cost)?;
        self.add_edge_dedup(b, a, cost)
    }

    /// Swap-remove the `index`-th outgoing edge of `from`.
    ///
    /// The last edge of the list takes the removed slot, so previously
    /// captured indices for `from` are invalidated.
    pub fn delete_edge(&mut self, from: Vertex, index: usize) -> Result<Edge, GraphError> {
        self.check(from)?;
        let list = &mut self.edges[from];
        if index >= list.len() {
            return Err(GraphError::EdgeOutOfRange {
                vertex: from,
                index,
                degree: list.len(),
            });
        }
        let removed = list.swap_remove(index);
        self.edge_count -= 1;
        Ok(removed)
    }

    /// Drop every outgoing edge of `vertex`. The id stays valid.
    pub fn delete_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError> {
        self.check(vertex)?;
        let list = &mut self.edges[vertex];
        self.edge_count -= list.len();
        list.clear();
        Ok(())
    }

    /// Outgoing edges of `vertex`.
    pub fn neighbors(&self, vertex: Vertex) -> Result<&[Edge], GraphError> {
        self.check(vertex)?;
        Ok(&self.edges[vertex])
    }

    pub(crate) fn check(&self, vertex: Vertex) -> Result<(), GraphError> {
        if vertex < self.edges.len() {
            Ok(())
        } else {
            Err(GraphError::OutOfRangeVertex {
                vertex,
                size: self.edges.len(),
            })
        }
    }
}
