//! Min-priority frontier over search nodes.
//!
//! `BinaryHeap` is a max-heap, so entries are keyed by `Reverse<FrontierKey>`
//! to pop the lowest `(f, h, seq)` first. The sequence number is assigned
//! here, so ties on `f` and `h` resolve in insertion order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, SearchNode};

#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Discovered but not yet expanded nodes, cheapest first.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) {
        let key = FrontierKey::new(&node, self.next_seq);
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove the node with the smallest key.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier reached
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Total pushes so far
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
