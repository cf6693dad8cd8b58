//! Optimal solver for the N-puzzle (sliding tile puzzle).
//!
//! This crate finds a minimum-length move sequence that restores a
//! scrambled square board to ascending order, using A* with a Manhattan
//! distance plus linear conflict estimate. Moves are reported in the
//! `HJKL` alphabet, naming where the blank goes.

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod puzzle;
pub mod replay;
pub mod solver;

// Re-export main types
pub use error::{AbortReason, SolveError};
pub use heuristic::{breakdown, estimate, Estimate};
pub use puzzle::{format_moves, parse_moves, Move, Puzzle, PuzzleConfig};
pub use replay::{replay, verify_solution, ReplayResult};
pub use solver::{solve, solve_puzzle, SearchStats, Solution, SolverConfig};
