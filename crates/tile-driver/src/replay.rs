//! Move-string replay for checking solutions.
//!
//! Replays a move string against a start configuration and records where,
//! if anywhere, the goal was first reached.

use crate::error::SolveError;
use crate::puzzle::{parse_moves, Puzzle};

/// Outcome of replaying a move string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Configuration after the last move
    pub end: Puzzle,
    /// Number of moves applied
    pub steps: usize,
    /// Moves applied when the goal was first seen (0 = start was solved)
    pub first_solved_at: Option<usize>,
}

impl ReplayResult {
    /// Ends on the goal and never touched it earlier.
    pub fn solved_exactly(&self) -> bool {
        self.first_solved_at == Some(self.steps)
    }
}

/// Apply every move in `moves` to `start`, in order.
pub fn replay(start: &Puzzle, moves: &str) -> Result<ReplayResult, SolveError> {
    let parsed = parse_moves(moves)?;

    let mut current = start.clone();
    let mut first_solved_at = current.is_solved().then_some(0);
    for (i, &mv) in parsed.iter().enumerate() {
        current = current
            .apply(mv)
            .ok_or(SolveError::IllegalMove { step: i + 1, mv })?;
        if first_solved_at.is_none() && current.is_solved() {
            first_solved_at = Some(i + 1);
        }
    }

    Ok(ReplayResult {
        end: current,
        steps: parsed.len(),
        first_solved_at,
    })
}

/// Check that `moves` takes `puzzle` to the goal, stopping exactly there.
pub fn verify_solution(puzzle: &Puzzle, moves: &str) -> bool {
    replay(puzzle, moves).is_ok_and(|r| r.solved_exactly())
}
