//! A* search for an optimal move sequence.
//!
//! The frontier is ordered by `f = g + h` with the Manhattan plus linear
//! conflict estimate, which never overestimates, so the first node popped
//! with `h == 0` ends a shortest path. A best-known `g` per configuration
//! keeps worse duplicates out of the frontier, and the move that undoes
//! the previous one is never generated.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{AbortReason, SolveError};
use crate::frontier::Frontier;
use crate::node::SearchNode;
use crate::puzzle::{format_moves, Move, Puzzle};

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Stop after this many node expansions
    pub max_expansions: Option<usize>,
    /// Stop after this much wall-clock time
    pub timeout: Option<Duration>,
    /// Reject configurations in the unreachable parity class before searching
    pub check_solvability: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            timeout: None,
            check_solvability: true,
        }
    }
}

/// Counters describing one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub frontier_high_water: usize,
    pub time_elapsed_ms: u64,
}

/// An optimal solution and how it was found
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

impl Solution {
    /// Moves in the `HJKL` alphabet.
    pub fn move_string(&self) -> String {
        format_moves(&self.moves)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Solve a raw configuration with default settings, returning the move string.
///
/// The string is empty when `tiles` is already solved.
pub fn solve(tiles: &[u8]) -> Result<String, SolveError> {
    let puzzle = Puzzle::from_tiles(tiles)?;
    solve_puzzle(&puzzle, &SolverConfig::default()).map(|s| s.move_string())
}

/// Find a minimum-length move sequence from `puzzle` to the goal.
pub fn solve_puzzle(puzzle: &Puzzle, config: &SolverConfig) -> Result<Solution, SolveError> {
    let start_time = Instant::now();
    let deadline = config.timeout.map(|t| start_time + t);

    if config.check_solvability && !puzzle.is_solvable() {
        debug!(tiles = ?puzzle.tiles(), "rejected by parity check");
        return Err(SolveError::Unsolvable);
    }

    let root = SearchNode::root(puzzle.clone());
    debug!(width = puzzle.width(), h = root.h(), "starting search");
    if root.h() == 0 {
        return Ok(Solution {
            moves: Vec::new(),
            stats: SearchStats {
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                ..Default::default()
            },
        });
    }

    let mut frontier = Frontier::new();
    let mut best_g: FxHashMap<Puzzle, u32> = FxHashMap::default();
    best_g.insert(puzzle.clone(), 0);
    frontier.push(root);

    let mut nodes_expanded: usize = 0;

    while let Some(node) = frontier.pop() {
        if node.h() == 0 {
            let stats = SearchStats {
                nodes_expanded,
                nodes_generated: frontier.pushed() as usize,
                frontier_high_water: frontier.high_water(),
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
            debug!(
                length = node.g(),
                expanded = stats.nodes_expanded,
                generated = stats.nodes_generated,
                "solved"
            );
            return Ok(Solution {
                moves: node.into_moves(),
                stats,
            });
        }

        // A cheaper path to this configuration was queued after this one.
        if best_g.get(node.puzzle()).is_some_and(|&g| g < node.g()) {
            continue;
        }

        if let Some(reason) = check_bounds(config, deadline, nodes_expanded) {
            warn!(%reason, expanded = nodes_expanded, "search aborted");
            return Err(SolveError::SearchAborted {
                reason,
                nodes_expanded,
            });
        }

        nodes_expanded += 1;
        trace!(g = node.g(), h = node.h(), frontier = frontier.len(), "expanding");

        let undo = node.last_move().map(Move::opposite);
        for (mv, next) in node.puzzle().legal_moves() {
            if Some(mv) == undo {
                continue;
            }
            let g = node.g() + 1;
            if best_g.get(&next).is_some_and(|&known| known <= g) {
                continue;
            }
            best_g.insert(next.clone(), g);
            frontier.push(SearchNode::child(&node, mv, next));
        }
    }

    // Only reachable with the parity check disabled.
    debug!(expanded = nodes_expanded, "frontier exhausted");
    Err(SolveError::Unsolvable)
}

fn check_bounds(
    config: &SolverConfig,
    deadline: Option<Instant>,
    nodes_expanded: usize,
) -> Option<AbortReason> {
    if config
        .max_expansions
        .is_some_and(|limit| nodes_expanded >= limit)
    {
        return Some(AbortReason::ExpansionLimit);
    }
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Some(AbortReason::Timeout);
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::heuristic::estimate;
    use crate::replay::verify_solution;

    /// Exact distance to the goal for every reachable configuration.
    fn bfs_distances(width: usize) -> FxHashMap<Puzzle, u32> {
        let goal = Puzzle::solved(width).unwrap();
        let mut dist = FxHashMap::default();
        let mut queue = VecDeque::new();
        dist.insert(goal.clone(), 0);
        queue.push_back(goal);
        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            for (_, next) in current.legal_moves() {
                if !dist.contains_key(&next) {
                    dist.insert(next.clone(), d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    #[test]
    fn test_already_solved_returns_empty() {
        assert_eq!(solve(&[0, 1, 2, 3]).unwrap(), "");
        assert_eq!(solve(&[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap(), "");

        let solution = solve_puzzle(&Puzzle::solved(4).unwrap(), &SolverConfig::default()).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.stats.nodes_expanded, 0);
    }

    #[test]
    fn test_two_by_two_reference() {
        let moves = solve(&[3, 2, 1, 0]).unwrap();
        assert_eq!(moves.len(), 6);
        let puzzle = Puzzle::from_tiles(&[3, 2, 1, 0]).unwrap();
        assert!(verify_solution(&puzzle, &moves));
    }

    #[test]
    fn test_three_by_three_reference() {
        let tiles = [1, 4, 2, 3, 0, 5, 6, 7, 8];
        let moves = solve(&tiles).unwrap();
        assert_eq!(moves, "KH");

        let dist = bfs_distances(3);
        let puzzle = Puzzle::from_tiles(&tiles).unwrap();
        assert_eq!(moves.len() as u32, dist[&puzzle]);
        assert!(verify_solution(&puzzle, &moves));
    }

    #[test]
    fn test_every_two_by_two_is_optimal() {
        let dist = bfs_distances(2);
        assert_eq!(dist.len(), 12);
        for (puzzle, &d) in &dist {
            let solution = solve_puzzle(puzzle, &SolverConfig::default()).unwrap();
            assert_eq!(solution.len() as u32, d, "{:?}", puzzle.tiles());
            assert!(verify_solution(puzzle, &solution.move_string()));
        }
    }

    #[test]
    fn test_estimate_is_admissible() {
        for width in [2, 3] {
            for (puzzle, &d) in &bfs_distances(width) {
                assert!(estimate(puzzle) <= d, "{:?}", puzzle.tiles());
            }
        }
    }

    #[test]
    fn test_three_by_three_matches_bfs() {
        let dist = bfs_distances(3);
        assert_eq!(dist.len(), 181_440);

        let mut sampled: Vec<(&Puzzle, &u32)> = dist.iter().collect();
        sampled.sort_by(|a, b| b.1.cmp(a.1).then(a.0.tiles().cmp(b.0.tiles())));
        // The hardest configurations first, then a spread of the rest.
        let picks = sampled.iter().take(2).chain(sampled.iter().step_by(9_001));
        for &(puzzle, &d) in picks {
            let solution = solve_puzzle(puzzle, &SolverConfig::default()).unwrap();
            assert_eq!(solution.len() as u32, d, "{:?}", puzzle.tiles());
            assert!(verify_solution(puzzle, &solution.move_string()));
        }
    }

    #[test]
    fn test_four_by_four_scramble() {
        let scramble = "JJLLJLKHKKLJJHJL";
        let mut puzzle = Puzzle::solved(4).unwrap();
        for ch in scramble.chars() {
            puzzle = puzzle.apply(Move::from_char(ch).unwrap()).unwrap();
        }

        let solution = solve_puzzle(&puzzle, &SolverConfig::default()).unwrap();
        assert!(solution.len() <= scramble.len());
        assert_eq!(solution.len() % 2, scramble.len() % 2);
        assert!(verify_solution(&puzzle, &solution.move_string()));
        assert!(solution.stats.nodes_generated >= solution.stats.nodes_expanded);
    }

    #[test]
    fn test_result_is_reproducible() {
        let tiles = [8, 1, 2, 0, 4, 3, 7, 5, 6];
        let puzzle = Puzzle::from_tiles(&tiles).unwrap();
        assert!(puzzle.is_solvable());
        let first = solve(&tiles).unwrap();
        let second = solve(&tiles).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsolvable_rejected_up_front() {
        let puzzle = Puzzle::from_tiles(&[0, 2, 1, 3, 4, 5, 6, 7, 8]).unwrap();
        let err = solve_puzzle(&puzzle, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, SolveError::Unsolvable);
    }

    #[test]
    fn test_unsolvable_exhausts_without_parity_check() {
        let puzzle = Puzzle::from_tiles(&[0, 2, 1, 3]).unwrap();
        let config = SolverConfig {
            check_solvability: false,
            ..Default::default()
        };
        assert_eq!(solve_puzzle(&puzzle, &config).unwrap_err(), SolveError::Unsolvable);
    }

    #[test]
    fn test_malformed_input_rejected() {
        assert_eq!(
            solve(&[1, 2, 3, 4]).unwrap_err(),
            SolveError::TileOutOfRange { tile: 4, max: 3 }
        );
        assert_eq!(
            solve(&[0, 1, 2]).unwrap_err(),
            SolveError::InvalidLength { len: 3 }
        );
    }

    #[test]
    fn test_bounds_abort_search() {
        let puzzle = Puzzle::from_tiles(&[8, 1, 2, 0, 4, 3, 7, 5, 6]).unwrap();

        let config = SolverConfig {
            max_expansions: Some(1),
            ..Default::default()
        };
        match solve_puzzle(&puzzle, &config) {
            Err(SolveError::SearchAborted {
                reason: AbortReason::ExpansionLimit,
                nodes_expanded,
            }) => assert_eq!(nodes_expanded, 1),
            other => panic!("expected expansion abort, got {other:?}"),
        }

        let config = SolverConfig {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(matches!(
            solve_puzzle(&puzzle, &config),
            Err(SolveError::SearchAborted {
                reason: AbortReason::Timeout,
                ..
            })
        ));
    }
}
