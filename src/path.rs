use hashbrown::{HashMap, HashSet};

use crate::state::DistState;
use crate::types::NodeId;

/// Walks predecessors from `target` back to the root and returns the path in
/// source-to-target order.
///
/// Returns an empty path when the target was never reached, when the walk does
/// not end at `source`, or when it cycles. Predecessors are rewritten on
/// equal-cost relaxations, so the walked tree is one of possibly several trees
/// consistent with the final distances.
pub fn reconstruct_path(state: &DistState, source: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut v = target;
    loop {
        if !seen.insert(v) {
            return Vec::new();
        }
        path.push(v);
        match state.pred(v) {
            Some(p) => v = p,
            None => break,
        }
    }
    path.reverse();
    if path.first() != Some(&source) {
        return Vec::new();
    }
    path
}

pub fn reconstruct_paths(
    state: &DistState,
    source: NodeId,
    targets: &[NodeId],
) -> HashMap<NodeId, Vec<NodeId>> {
    let mut out = HashMap::with_capacity(targets.len());
    for &target in targets {
        out.insert(target, reconstruct_path(state, source, target));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_state() -> DistState {
        // 0 -> 1 -> 2, vertex 3 unreached
        let mut state = DistState::new(4);
        state.set(0, 0.0);
        state.set(1, 1.0);
        state.set_pred(1, 0);
        state.set(2, 2.0);
        state.set_pred(2, 1);
        state
    }

    #[test]
    fn walks_back_to_the_source() {
        let state = chain_state();
        assert_eq!(reconstruct_path(&state, 0, 2), vec![0, 1, 2]);
        assert_eq!(reconstruct_path(&state, 0, 0), vec![0]);
    }

    #[test]
    fn unreached_or_foreign_targets_give_empty_paths() {
        let state = chain_state();
        assert!(reconstruct_path(&state, 0, 3).is_empty());
        // Walk ends at 0, not at the requested source 1.
        assert!(reconstruct_path(&state, 1, 0).is_empty());
    }

    #[test]
    fn predecessor_cycles_are_detected() {
        let mut state = DistState::new(2);
        state.set_pred(0, 1);
        state.set_pred(1, 0);
        assert!(reconstruct_path(&state, 0, 1).is_empty());
    }

    #[test]
    fn batch_reconstruction_covers_all_targets() {
        let state = chain_state();
        let paths = reconstruct_paths(&state, 0, &[1, 2, 3]);
        assert_eq!(paths[&1], vec![0, 1]);
        assert_eq!(paths[&2], vec![0, 1, 2]);
        assert!(paths[&3].is_empty());
    }
}
