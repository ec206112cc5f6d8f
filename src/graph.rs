use thiserror::Error;

use crate::types::{compute_k, compute_t, Cost, NodeId};

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("edge weight must be non-negative and finite, got {weight}")]
    InvalidWeight { weight: Cost },
}

/// Directed graph over dense node ids with non-negative finite edge weights.
///
/// Self-loops and parallel edges are allowed. Out-edges keep insertion order,
/// which fixes the relaxation order (and therefore the predecessor trees) of a
/// solve. Queries with an id outside `[0, num_vertices)` panic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adj: Vec<Vec<(NodeId, Cost)>>,
    num_edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            num_edges: 0,
        }
    }

    /// Ensures `id` exists, growing the vertex range to `id + 1` if needed.
    pub fn add_vertex(&mut self, id: NodeId) {
        if id >= self.adj.len() {
            self.adj.resize(id + 1, Vec::new());
        }
    }

    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, weight: Cost) -> Result<(), GraphError> {
        if !(weight >= 0.0) || !weight.is_finite() {
            return Err(GraphError::InvalidWeight { weight });
        }
        self.add_vertex(src);
        self.add_vertex(dst);
        self.adj[src].push((dst, weight));
        self.num_edges += 1;
        Ok(())
    }

    pub fn from_edges(edges: &[(NodeId, NodeId, Cost)]) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for &(src, dst, weight) in edges {
            graph.add_edge(src, dst, weight)?;
        }
        Ok(graph)
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn has_vertex(&self, id: NodeId) -> bool {
        id < self.adj.len()
    }

    pub fn out_edges(&self, u: NodeId) -> &[(NodeId, Cost)] {
        &self.adj[u]
    }

    pub fn out_degree(&self, u: NodeId) -> usize {
        self.adj[u].len()
    }

    /// Settling-count parameter k, derived from the vertex count.
    pub fn k(&self) -> usize {
        compute_k(self.num_vertices())
    }

    /// Recursion-geometry parameter t, derived from the vertex count.
    pub fn t(&self) -> usize {
        compute_t(self.num_vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_weights() {
        let mut g = Graph::new();
        assert_eq!(
            g.add_edge(0, 1, -1.0),
            Err(GraphError::InvalidWeight { weight: -1.0 })
        );
        assert!(g.add_edge(0, 1, f64::INFINITY).is_err());
        assert!(g.add_edge(0, 1, f64::NAN).is_err());
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn add_edge_grows_vertex_range() {
        let mut g = Graph::new();
        g.add_edge(2, 5, 1.5).unwrap();
        assert_eq!(g.num_vertices(), 6);
        assert_eq!(g.out_edges(2), &[(5, 1.5)]);
        assert!(g.out_edges(5).is_empty());
    }

    #[test]
    fn self_loops_and_parallel_edges_allowed() {
        let mut g = Graph::new();
        g.add_edge(0, 0, 0.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(0, 1, 2.0).unwrap();
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.out_degree(0), 3);
    }

    #[test]
    fn from_edges_builds_adjacency() {
        let g = Graph::from_edges(&[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0)]).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.out_edges(0), &[(1, 1.0), (2, 5.0)]);
    }

    #[test]
    fn parameters_come_from_vertex_count() {
        let g = Graph::with_vertices(1024);
        assert_eq!(g.k(), 8);
        assert_eq!(g.t(), 64);
    }
}
