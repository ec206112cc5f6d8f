use crate::types::{Cost, NodeId, INFINITE_COST, INVALID_NODE};

/// Per-vertex tentative distances and predecessors for one solve.
///
/// Distances only ever decrease; they are upper bounds on the true
/// shortest-path distance at every point during a solve. The predecessor is
/// updated conservatively (also on equal-cost relaxations), so it may describe
/// a different shortest-path tree than the one realizing `dist` — callers that
/// need a coherent tree should rebuild it from the final distances.
#[derive(Debug, Clone)]
pub struct DistState {
    dist: Vec<Cost>,
    pred: Vec<NodeId>,
}

impl DistState {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            dist: vec![INFINITE_COST; num_nodes],
            pred: vec![INVALID_NODE; num_nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    pub fn get(&self, node_id: NodeId) -> Cost {
        self.dist[node_id]
    }

    pub fn set(&mut self, node_id: NodeId, cost: Cost) {
        self.dist[node_id] = cost;
    }

    pub fn pred(&self, node_id: NodeId) -> Option<NodeId> {
        let p = self.pred[node_id];
        (p != INVALID_NODE).then_some(p)
    }

    pub fn has_pred(&self, node_id: NodeId) -> bool {
        self.pred[node_id] != INVALID_NODE
    }

    pub fn set_pred(&mut self, node_id: NodeId, pred: NodeId) {
        self.pred[node_id] = pred;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_infinite_without_predecessors() {
        let state = DistState::new(4);
        for v in 0..4 {
            assert_eq!(state.get(v), INFINITE_COST);
            assert_eq!(state.pred(v), None);
            assert!(!state.has_pred(v));
        }
    }

    #[test]
    fn set_and_get() {
        let mut state = DistState::new(3);
        state.set(1, 2.5);
        state.set_pred(1, 0);
        assert_eq!(state.get(1), 2.5);
        assert_eq!(state.pred(1), Some(0));
        assert_eq!(state.get(2), INFINITE_COST);
    }
}
