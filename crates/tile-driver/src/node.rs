//! Search nodes and their frontier ordering key.

use std::cmp::Ordering;

use crate::heuristic::estimate;
use crate::puzzle::{Move, Puzzle};

/// A configuration reached by a specific move sequence.
///
/// Fields are fixed at construction; expanding a node creates children
/// rather than touching the parent.
#[derive(Debug, Clone)]
pub struct SearchNode {
    puzzle: Puzzle,
    g: u32,
    h: u32,
    moves: Vec<Move>,
}

impl SearchNode {
    /// The start node: no moves taken yet.
    pub fn root(puzzle: Puzzle) -> Self {
        let h = estimate(&puzzle);
        Self {
            puzzle,
            g: 0,
            h,
            moves: Vec::new(),
        }
    }

    /// A child reached from `parent` by `mv`, landing on `puzzle`.
    pub fn child(parent: &SearchNode, mv: Move, puzzle: Puzzle) -> Self {
        let h = estimate(&puzzle);
        let mut moves = Vec::with_capacity(parent.moves.len() + 1);
        moves.extend_from_slice(&parent.moves);
        moves.push(mv);
        Self {
            puzzle,
            g: parent.g + 1,
            h,
            moves,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Path cost from the start
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Estimated remaining cost
    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }
}

/// Two nodes are the same search state when they hold the same configuration.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.puzzle == other.puzzle
    }
}

impl Eq for SearchNode {}

/// Frontier ordering: lowest `f`, then lowest `h`, then first inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f: u32,
    pub h: u32,
    pub seq: u64,
}

impl FrontierKey {
    pub fn new(node: &SearchNode, seq: u64) -> Self {
        Self {
            f: node.f(),
            h: node.h(),
            seq,
        }
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then(self.h.cmp(&other.h))
            .then(self.seq.cmp(&other.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_cost() {
        let root = SearchNode::root(Puzzle::from_tiles(&[3, 2, 1, 0]).unwrap());
        assert_eq!(root.g(), 0);
        assert_eq!(root.h(), 6);
        assert_eq!(root.f(), 6);
        assert!(root.moves().is_empty());
        assert_eq!(root.last_move(), None);
    }

    #[test]
    fn test_child_accumulates_path() {
        let root = SearchNode::root(Puzzle::from_tiles(&[1, 4, 2, 3, 0, 5, 6, 7, 8]).unwrap());
        let up = root.puzzle().apply(Move::Up).unwrap();
        let child = SearchNode::child(&root, Move::Up, up);
        assert_eq!(child.g(), 1);
        assert_eq!(child.h(), 1);
        assert_eq!(child.moves(), &[Move::Up]);

        let left = child.puzzle().apply(Move::Left).unwrap();
        let grandchild = SearchNode::child(&child, Move::Left, left);
        assert_eq!(grandchild.g(), 2);
        assert_eq!(grandchild.h(), 0);
        assert_eq!(grandchild.moves(), &[Move::Up, Move::Left]);
        // parent untouched
        assert_eq!(child.moves(), &[Move::Up]);
    }

    #[test]
    fn test_key_ordering() {
        let a = FrontierKey { f: 4, h: 2, seq: 9 };
        let b = FrontierKey { f: 5, h: 0, seq: 0 };
        let c = FrontierKey { f: 4, h: 1, seq: 10 };
        let d = FrontierKey { f: 4, h: 1, seq: 11 };
        assert!(a < b);
        assert!(c < a);
        assert!(c < d);
    }

    #[test]
    fn test_equality_is_by_configuration() {
        let puzzle = Puzzle::from_tiles(&[1, 0, 2, 3]).unwrap();
        let root = SearchNode::root(puzzle.clone());
        let there = root.puzzle().apply(Move::Down).unwrap();
        let child = SearchNode::child(&root, Move::Down, there);
        let back = child.puzzle().apply(Move::Up).unwrap();
        let grandchild = SearchNode::child(&child, Move::Up, back);
        assert_eq!(grandchild, root);
        assert_ne!(grandchild.g(), root.g());
    }
}
