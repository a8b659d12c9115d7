use super::graph::{Graph, Vertex};
use crate::error::GraphError;
use crate::queue::{IndexedHeap, PriorityQueue};

/// Sentinel distance for vertices the source cannot reach.
pub const UNREACHABLE: u64 = u64::MAX;

/// Result of a single-source search, indexed by vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source: Vertex,
    pub distance: Vec<u64>,
    pub predecessor: Vec<Option<Vertex>>,
}

impl ShortestPaths {
    pub fn is_reachable(&self, target: Vertex) -> bool {
        self.distance.get(target).is_some_and(|&d| d != UNREACHABLE)
    }

    pub fn distance_to(&self, target: Vertex) -> Option<u64> {
        self.distance.get(target).copied().filter(|&d| d != UNREACHABLE)
    }

    /// Vertices from the source to `target`, both inclusive.
    pub fn path_to(&self, target: Vertex) -> Option<Vec<Vertex>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra from `start` over the graph as it is right now.
///
/// Distance and predecessor arrays are sized to `graph.size()` before any
/// write. O((V + E) log V).
pub fn shortest_paths_from(graph: &Graph, start: Vertex) -> Result<ShortestPaths, GraphError> {
    graph.check(start)?;
    let size = graph.size();
    let mut distance = vec![UNREACHABLE; size];
    let mut predecessor = vec![None; size];
    distance[start] = 0;

    let mut queue = IndexedHeap::with_capacity(size);
    for (vertex, &d) in distance.iter().enumerate() {
        queue.insert(vertex, d)?;
    }

    while !queue.is_empty() {
        let (vertex, dist) = queue.extract_min()?;
        if dist == UNREACHABLE {
            // Everything left in the queue is unreachable too.
            break;
        }
        for edge in graph.neighbors(vertex)? {
            let alt = dist.saturating_add(edge.cost);
            if alt < distance[edge.to] {
                distance[edge.to] = alt;
                predecessor[edge.to] = Some(vertex);
                queue.decrease_key(&edge.to, alt)?;
            }
        }
    }

    Ok(ShortestPaths {
        source: start,
        distance,
        predecessor,
    })
}
