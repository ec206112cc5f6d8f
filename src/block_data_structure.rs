/*
Block data structure from arXiv:2504.17033 (Lemma 3.3), the frontier workset
of the BMSSP recursion.

Parameterized by a block capacity M and an upper bound B over all stored
values. Two block sequences are kept: a LIFO of batch-prepended blocks (all
values below everything present at prepend time) and an ordered list of
insertion blocks partitioning (-inf, B] by per-block upper bounds. Supported
operations are insert, batch_prepend, and pull.
*/

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use std::collections::VecDeque;

use crate::types::{Cost, NodeId};

#[derive(Debug)]
struct Block {
    /// Pairs sorted by cost.
    nodes: Vec<(NodeId, Cost)>,
    /// Every cost in this block is <= upper_bound. Meaningful for insertion
    /// blocks only; prepend blocks carry the global bound.
    upper_bound: Cost,
}

impl Block {
    fn new(upper_bound: Cost) -> Self {
        Self {
            nodes: Vec::new(),
            upper_bound,
        }
    }

    fn from_nodes(upper_bound: Cost, nodes: Vec<(NodeId, Cost)>) -> Self {
        Self { nodes, upper_bound }
    }
}

/// Pairs pulled from the workset, plus the separating boundary: pulled values
/// are <= the boundary, everything still stored is >= it.
pub struct PullResult(pub Vec<(NodeId, Cost)>, pub Cost);

/// Two-sequence block workset.
///
/// The key-min map is the authoritative content: it records the smallest value
/// admitted per key, and an insert or prepend that does not strictly lower it
/// is dropped. Superseded pairs may linger inside blocks; they are skipped and
/// discarded when a pull reaches them.
#[derive(Debug)]
pub struct BlockList {
    m: usize,
    bound: Cost,
    prepend_blocks: VecDeque<Block>,
    insert_blocks: VecDeque<Block>,
    key_min: HashMap<NodeId, Cost>,
}

impl BlockList {
    pub fn new(m: usize, bound: Cost) -> Self {
        Self {
            m: m.max(1),
            bound,
            prepend_blocks: VecDeque::new(),
            insert_blocks: VecDeque::from([Block::new(bound)]),
            key_min: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.key_min.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_min.is_empty()
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn bound(&self) -> Cost {
        self.bound
    }

    pub fn num_prepend_blocks(&self) -> usize {
        self.prepend_blocks.len()
    }

    pub fn num_insert_blocks(&self) -> usize {
        self.insert_blocks.len()
    }

    /// Admits `cost` for `node_id` when it strictly lowers the recorded
    /// minimum and is below the global bound.
    pub fn insert(&mut self, node_id: NodeId, cost: Cost) {
        if cost >= self.bound {
            return;
        }
        match self.key_min.entry(node_id) {
            Entry::Occupied(mut e) => {
                if *e.get() <= cost {
                    return;
                }
                e.insert(cost);
            }
            Entry::Vacant(e) => {
                e.insert(cost);
            }
        }

        // The last insertion block has upper_bound == bound, so the partition
        // search always lands on a block.
        let i = self
            .insert_blocks
            .partition_point(|block| block.upper_bound < cost);
        let block = &mut self.insert_blocks[i];
        if let Some(old) = block.nodes.iter().position(|&(id, _)| id == node_id) {
            block.nodes.remove(old);
        }
        let at = block.nodes.partition_point(|&(_, c)| c < cost);
        block.nodes.insert(at, (node_id, cost));
        if block.nodes.len() > self.m {
            self.split_block(i);
        }
    }

    /// Splits an over-full insertion block at its median position. The left
    /// half keeps the block's slot and takes the right half's minimum as its
    /// new upper bound; the right half keeps the old upper bound.
    fn split_block(&mut self, i: usize) {
        let block = &mut self.insert_blocks[i];
        let mid = block.nodes.len() / 2;
        let right_nodes = block.nodes.split_off(mid);
        let right = Block::from_nodes(block.upper_bound, right_nodes);
        block.upper_bound = right.nodes[0].1;
        self.insert_blocks.insert(i + 1, right);
    }

    /// Prepends a batch whose values the caller guarantees to be strictly
    /// below everything currently stored. The guarantee is not checked;
    /// violating it degrades the pull boundary silently.
    pub fn batch_prepend(&mut self, pairs: Vec<(NodeId, Cost)>) {
        let mut kept: Vec<(NodeId, Cost)> = pairs
            .into_iter()
            .filter(|&(_, cost)| cost < self.bound)
            .collect();

        // One slot per key: keep the smallest value offered in this batch.
        kept.sort_unstable_by_key(|&(id, _)| id);
        kept.dedup_by(|a, b| {
            if a.0 == b.0 {
                b.1 = a.1.min(b.1);
                true
            } else {
                false
            }
        });

        let key_min = &mut self.key_min;
        kept.retain(|&(id, cost)| match key_min.entry(id) {
            Entry::Occupied(mut e) => {
                if *e.get() <= cost {
                    false
                } else {
                    e.insert(cost);
                    true
                }
            }
            Entry::Vacant(e) => {
                e.insert(cost);
                true
            }
        });
        if kept.is_empty() {
            return;
        }

        kept.sort_by(|a, b| a.1.partial_cmp(&b.1).expect("costs are never NaN"));
        if kept.len() <= self.m {
            self.prepend_blocks
                .push_front(Block::from_nodes(self.bound, kept));
        } else {
            let chunks: Vec<Vec<(NodeId, Cost)>> =
                kept.chunks(self.m).map(|chunk| chunk.to_vec()).collect();
            // Push in reverse so the smallest-valued chunk ends up frontmost.
            for chunk in chunks.into_iter().rev() {
                self.prepend_blocks
                    .push_front(Block::from_nodes(self.bound, chunk));
            }
        }
    }

    /// Removes and returns up to M live pairs, prepend blocks first, then
    /// insertion blocks, together with the separating boundary.
    pub fn pull(&mut self) -> PullResult {
        let mut pulled = Vec::with_capacity(self.m.min(self.key_min.len()));
        Self::drain_blocks(
            &mut self.prepend_blocks,
            &mut self.key_min,
            self.m,
            &mut pulled,
        );
        if pulled.len() < self.m {
            Self::drain_blocks(
                &mut self.insert_blocks,
                &mut self.key_min,
                self.m,
                &mut pulled,
            );
        }
        if self.insert_blocks.is_empty() {
            // Keep the partition invariant: one block always covers up to B.
            self.insert_blocks.push_back(Block::new(self.bound));
        }
        let boundary = self.min_remaining().unwrap_or(self.bound);
        PullResult(pulled, boundary)
    }

    fn drain_blocks(
        blocks: &mut VecDeque<Block>,
        key_min: &mut HashMap<NodeId, Cost>,
        m: usize,
        pulled: &mut Vec<(NodeId, Cost)>,
    ) {
        while let Some(block) = blocks.front_mut() {
            let mut consumed = 0;
            for i in 0..block.nodes.len() {
                let (node_id, cost) = block.nodes[i];
                if key_min.get(&node_id) != Some(&cost) {
                    // Superseded copy, discard.
                    consumed += 1;
                    continue;
                }
                if pulled.len() == m {
                    break;
                }
                key_min.remove(&node_id);
                pulled.push((node_id, cost));
                consumed += 1;
            }
            if consumed == block.nodes.len() {
                blocks.pop_front();
            } else {
                block.nodes.drain(..consumed);
                return;
            }
        }
    }

    /// Smallest live value still stored, scanning the prepend LIFO and the
    /// first non-exhausted insertion block.
    fn min_remaining(&self) -> Option<Cost> {
        let d0 = Self::first_live(&self.prepend_blocks, &self.key_min);
        let d1 = Self::first_live(&self.insert_blocks, &self.key_min);
        match (d0, d1) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn first_live(blocks: &VecDeque<Block>, key_min: &HashMap<NodeId, Cost>) -> Option<Cost> {
        for block in blocks {
            for &(node_id, cost) in &block.nodes {
                if key_min.get(&node_id) == Some(&cost) {
                    return Some(cost);
                }
            }
        }
        None
    }
}
