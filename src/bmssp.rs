// BMSSP, implemented from
// "Breaking the Sorting Barrier for Directed Single-Source Shortest Paths"
// (Duan, Mao, Mao, Shu, Yin, April 2025) (arXiv:2504.17033v1)

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::binary_heap::IndexedHeap;
use crate::block_data_structure::{BlockList, PullResult};
use crate::graph::Graph;
use crate::state::DistState;
use crate::types::{compute_top_level, pow2_saturating, Cost, NodeId, INFINITE_COST};

#[derive(Clone, Copy)]
struct LocalLabel {
    cost: Cost,
    pred: Option<NodeId>,
}

// Returns a set of pivots P and the set W of vertices reached within k
// relaxation rounds from the frontier, all with distance < bound. Pivots are
// the frontier vertices rooting relaxation trees of size >= k; if the reach
// blows past k * |frontier| the whole frontier is returned as P instead.
pub fn find_pivots(
    graph: &Graph,
    bound: Cost,
    frontier: &[NodeId],
    k: usize,
    state: &mut DistState,
) -> (Vec<NodeId>, Vec<NodeId>) {
    let mut local: HashMap<NodeId, LocalLabel> = HashMap::with_capacity(frontier.len() * 2);
    let mut seeds: Vec<NodeId> = Vec::with_capacity(frontier.len());
    for &s in frontier {
        if let Entry::Vacant(e) = local.entry(s) {
            e.insert(LocalLabel {
                cost: state.get(s),
                pred: None,
            });
            seeds.push(s);
        }
    }

    let mut reached = seeds.clone();
    let limit = k.saturating_mul(seeds.len());
    let mut layer = seeds.clone();
    for _ in 0..k {
        let mut next_layer = Vec::new();
        for &u in &layer {
            let du = local[&u].cost;
            for &(v, weight) in graph.out_edges(u) {
                let nd = du + weight;
                if nd >= bound {
                    continue;
                }
                match local.entry(v) {
                    Entry::Occupied(mut e) => {
                        if nd < e.get().cost {
                            *e.get_mut() = LocalLabel {
                                cost: nd,
                                pred: Some(u),
                            };
                        }
                    }
                    Entry::Vacant(e) => {
                        e.insert(LocalLabel {
                            cost: nd,
                            pred: Some(u),
                        });
                        reached.push(v);
                        next_layer.push(v);
                    }
                }
            }
        }
        // Reached too much: stop and keep the whole frontier as pivots.
        if reached.len() > limit {
            return (seeds, reached);
        }
        if next_layer.is_empty() {
            break;
        }
        layer = next_layer;
    }

    // Forest of final relaxation predecessors; a frontier vertex that kept
    // its seed label is a root.
    let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for &v in &reached {
        if let Some(p) = local[&v].pred {
            children.entry(p).or_default().push(v);
        }
    }
    let mut pivots: Vec<NodeId> = Vec::new();
    for &v in &reached {
        if local[&v].pred.is_none() && subtree_size(v, &children) >= k {
            pivots.push(v);
        }
    }
    if pivots.is_empty() {
        pivots = seeds;
    }

    // Fold local improvements back into the shared state.
    for &v in &reached {
        let cost = local[&v].cost;
        if cost < state.get(v) {
            state.set(v, cost);
        }
    }

    (pivots, reached)
}

fn subtree_size(root: NodeId, children: &HashMap<NodeId, Vec<NodeId>>) -> usize {
    let mut size = 0;
    let mut stack = vec![root];
    while let Some(v) = stack.pop() {
        size += 1;
        if let Some(kids) = children.get(&v) {
            stack.extend_from_slice(kids);
        }
    }
    size
}

// Bounded partial Dijkstra from a single source whose tentative distance is
// already set. Settles until the bound is hit or k+1 vertices are taken; with
// k+1 settlements the new boundary is the distance of the last one taken.
pub fn base_case(
    graph: &Graph,
    bound: Cost,
    source: NodeId,
    state: &mut DistState,
    k: usize,
) -> (Cost, Vec<NodeId>) {
    let mut settled: Vec<NodeId> = Vec::new();
    if !graph.has_vertex(source) {
        return (bound, settled);
    }

    if state.get(source) == INFINITE_COST {
        state.set(source, 0.0);
    }
    let mut heap = IndexedHeap::with_capacity(k + 1);
    heap.insert(source, state.get(source));
    let mut in_settled: HashSet<NodeId> = HashSet::with_capacity(k + 1);

    while settled.len() <= k {
        let Some((u, du)) = heap.extract_min() else {
            break;
        };
        if du >= bound {
            break;
        }
        if !in_settled.insert(u) {
            continue;
        }
        settled.push(u);
        for &(v, weight) in graph.out_edges(u) {
            let alt = du + weight;
            let dv = state.get(v);
            if alt <= bound && alt <= dv {
                if alt < dv {
                    state.set(v, alt);
                }
                state.set_pred(v, u);
                heap.insert(v, alt);
            }
        }
    }

    if settled.len() > k {
        let last = *settled.last().expect("k+1 settlements");
        (state.get(last), settled)
    } else {
        (bound, settled)
    }
}

// One frame of the bounded multi-source recursion: reduce the frontier to
// pivots, then repeatedly pull a prefix of the workset, recurse a level down
// on it, and relax outward from whatever the sub-call settled.
pub fn bmssp(
    graph: &Graph,
    level: usize,
    bound: Cost,
    frontier: &[NodeId],
    state: &mut DistState,
    k: usize,
    t: usize,
) -> (Cost, Vec<NodeId>) {
    if frontier.is_empty() {
        return (bound, Vec::new());
    }
    if level == 0 {
        // Callers hand the base case an effectively singleton frontier.
        return base_case(graph, bound, frontier[0], state, k);
    }

    let (pivots, reached) = find_pivots(graph, bound, frontier, k, state);

    let m = pow2_saturating((level - 1).saturating_mul(t)).min(graph.num_vertices().max(1));
    let mut workset = BlockList::new(m, bound);
    for &p in &pivots {
        let d = state.get(p);
        if d < bound {
            workset.insert(p, d);
        }
    }

    let settle_limit = k.saturating_mul(pow2_saturating(level.saturating_mul(t)));
    let mut settled: Vec<NodeId> = Vec::new();
    let mut in_settled: HashSet<NodeId> = HashSet::new();
    let mut boundary = bound;

    while !workset.is_empty() {
        let PullResult(pairs, sub_bound) = workset.pull();
        if pairs.is_empty() {
            break;
        }
        let sub_frontier: Vec<NodeId> = pairs.iter().map(|&(id, _)| id).collect();
        let (sub_boundary, sub_settled) =
            bmssp(graph, level - 1, sub_bound, &sub_frontier, state, k, t);
        boundary = boundary.min(sub_boundary);

        for &u in &sub_settled {
            if in_settled.insert(u) {
                settled.push(u);
            }
            let du = state.get(u);
            for &(v, weight) in graph.out_edges(u) {
                let alt = du + weight;
                let dv = state.get(v);
                if alt < bound && alt <= dv {
                    if alt < dv {
                        state.set(v, alt);
                        state.set_pred(v, u);
                        workset.insert(v, alt);
                    } else {
                        state.set_pred(v, u);
                        // An equal-cost path into a vertex this frame already
                        // settled adds nothing; requeueing it would cycle
                        // forever on zero-weight loops.
                        if !in_settled.contains(&v) {
                            workset.insert(v, alt);
                        }
                    }
                } else if boundary <= alt && alt < sub_bound && !in_settled.contains(&v) {
                    // Cheaper than anything left in the workset.
                    workset.batch_prepend(vec![(v, alt)]);
                }
            }
        }

        if settled.len() > settle_limit {
            break;
        }
    }

    // Vertices completed by the pivot search count as settled for the caller.
    for &v in &reached {
        if in_settled.insert(v) {
            settled.push(v);
        }
    }

    (boundary, settled)
}

/// Full single-source shortest paths from `source`.
///
/// Returns distance and predecessor maps holding only vertices with a finite
/// distance respectively a known predecessor. A source outside the graph
/// yields empty maps.
pub fn solve(graph: &Graph, source: NodeId) -> (HashMap<NodeId, Cost>, HashMap<NodeId, NodeId>) {
    let mut dist_map = HashMap::new();
    let mut pred_map = HashMap::new();
    if !graph.has_vertex(source) {
        return (dist_map, pred_map);
    }

    let n = graph.num_vertices();
    let mut state = DistState::new(n);
    state.set(source, 0.0);
    let k = graph.k();
    let t = graph.t();
    let top_level = compute_top_level(n, t);
    bmssp(graph, top_level, INFINITE_COST, &[source], &mut state, k, t);

    for v in 0..n {
        let d = state.get(v);
        if d.is_finite() {
            dist_map.insert(v, d);
        }
        if let Some(p) = state.pred(v) {
            pred_map.insert(v, p);
        }
    }
    (dist_map, pred_map)
}
