use orx_priority_queue::*;

use crate::graph::Graph;
use crate::types::{Cost, NodeId, INFINITE_COST};

/// Dijkstra from `start` to all nodes. Returns distances, `f64::INFINITY`
/// when unreachable. The reference algorithm the engine is checked against.
pub fn dijkstra_all(graph: &Graph, start: NodeId) -> Vec<Cost> {
    let n = graph.num_vertices();
    let mut dist = vec![INFINITE_COST; n];
    if start >= n {
        return dist;
    }

    let mut pq: BinaryHeapWithMap<NodeId, Cost> = BinaryHeapWithMap::new();
    dist[start] = 0.0;
    pq.push(start, 0.0);

    while let Some((u, du)) = pq.pop() {
        for &(v, w) in graph.out_edges(u) {
            let alt = du + w;
            if alt < dist[v] {
                dist[v] = alt;
                pq.decrease_key_or_push(&v, alt);
            }
        }
    }
    dist
}
