//! Single-source shortest paths on directed graphs with non-negative weights,
//! built around the bounded multi-source shortest path (BMSSP) recursion from
//! "Breaking the Sorting Barrier for Directed Single-Source Shortest Paths"
//! (Duan, Mao, Mao, Shu, Yin, April 2025, arXiv:2504.17033).
//!
//! [`solve`] runs the full pipeline. The pieces it is built from — the block
//! workset, the indexed heap, the pivot finder, the bounded base case — are
//! exported so they can be exercised on their own.

mod binary_heap;
mod block_data_structure;
mod bmssp;
mod dijkstra;
mod graph;
mod path;
mod state;
mod types;

pub use binary_heap::IndexedHeap;
pub use block_data_structure::{BlockList, PullResult};
pub use bmssp::{base_case, bmssp, find_pivots, solve};
pub use dijkstra::dijkstra_all;
pub use graph::{Graph, GraphError};
pub use path::{reconstruct_path, reconstruct_paths};
pub use state::DistState;
pub use types::{
    compute_k, compute_t, compute_top_level, Cost, NodeId, INFINITE_COST, INVALID_NODE,
};
