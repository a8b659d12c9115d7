//! Routing over a mutable, dense integer-indexed graph.

mod dijkstra;
mod graph;

pub use dijkstra::{ShortestPaths, UNREACHABLE, shortest_paths_from};
pub use graph::{Edge, Graph, Vertex};
