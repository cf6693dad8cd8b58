//! Admissible distance estimate: Manhattan distance plus linear conflicts.
//!
//! A tile that sits in its goal row (or column) but is out of order with
//! other such tiles in that line must step out of the line and back in,
//! which Manhattan distance does not count. Per line, the fewest tiles that
//! have to step out is the line length minus its longest increasing run of
//! goal positions; each costs two extra moves.

use serde::Serialize;
use smallvec::SmallVec;

use crate::puzzle::{Puzzle, MAX_WIDTH};

type Line = SmallVec<[u8; MAX_WIDTH]>;

/// Breakdown of an estimate, as reported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub manhattan: u32,
    pub linear_conflict: u32,
    pub total: u32,
}

/// Lower bound on the number of moves from `puzzle` to the goal.
pub fn estimate(puzzle: &Puzzle) -> u32 {
    breakdown(puzzle).total
}

pub fn breakdown(puzzle: &Puzzle) -> Estimate {
    let manhattan = manhattan_distance(puzzle.tiles(), puzzle.width());
    let linear_conflict = linear_conflicts(puzzle.tiles(), puzzle.width());
    Estimate {
        manhattan,
        linear_conflict,
        total: manhattan + linear_conflict,
    }
}

pub fn manhattan_distance(tiles: &[u8], width: usize) -> u32 {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(i, &tile)| {
            let goal = tile as usize;
            let rows = (i / width).abs_diff(goal / width);
            let cols = (i % width).abs_diff(goal % width);
            (rows + cols) as u32
        })
        .sum()
}

/// Extra moves forced by tiles that share their goal line but are in the
/// wrong order within it.
pub fn linear_conflicts(tiles: &[u8], width: usize) -> u32 {
    let mut rows: SmallVec<[Line; MAX_WIDTH]> = SmallVec::from_elem(Line::new(), width);
    let mut cols: SmallVec<[Line; MAX_WIDTH]> = SmallVec::from_elem(Line::new(), width);

    // Row-major scan keeps each line in left-to-right / top-to-bottom order.
    for (i, &tile) in tiles.iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let goal = tile as usize;
        if i / width == goal / width {
            rows[i / width].push(tile);
        }
        if i % width == goal % width {
            cols[i % width].push(tile);
        }
    }

    let removals: usize = rows
        .iter()
        .chain(cols.iter())
        .map(|line| min_removals_to_sort(line))
        .sum();
    2 * removals as u32
}

/// Fewest elements to drop so the rest is strictly ascending.
pub fn min_removals_to_sort(values: &[u8]) -> usize {
    values.len() - longest_increasing_subsequence(values)
}

/// Patience-sorting LIS, O(n log n).
fn longest_increasing_subsequence(values: &[u8]) -> usize {
    let mut tails: SmallVec<[u8; MAX_WIDTH]> = SmallVec::new();
    for &v in values {
        match tails.binary_search(&v) {
            Ok(_) => {}
            Err(pos) if pos == tails.len() => tails.push(v),
            Err(pos) => tails[pos] = v,
        }
    }
    tails.len()
}
