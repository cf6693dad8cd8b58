//! Error types for puzzle validation, move replay and search.
//!
//! Validation errors are raised before any search work begins. Search
//! outcomes that are not a solution (unsolvable input, exceeded bounds)
//! are reported through the same type so callers handle one `Result`.

use crate::puzzle::Move;

/// Everything that can go wrong between reading a configuration and
/// returning a move string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The tile count is not a perfect square of a supported width.
    #[error("invalid tile count {len}: expected width² cells with 2 <= width <= 16")]
    InvalidLength { len: usize },

    /// A tile value is outside `0..width²`.
    #[error("tile {tile} out of range: values must lie in 0..={max}")]
    TileOutOfRange { tile: u8, max: u8 },

    /// A tile value occurs more than once.
    #[error("duplicate tile {tile}")]
    DuplicateTile { tile: u8 },

    /// No cell holds the blank (0).
    #[error("configuration has no blank (0)")]
    MissingBlank,

    /// A character in a move string is not one of `H`, `J`, `K`, `L`.
    #[error("invalid move character {ch:?}: expected one of H, J, K, L")]
    InvalidMove { ch: char },

    /// A move would push the blank off the board.
    #[error("move {step} ({mv}) is illegal from the current configuration")]
    IllegalMove { step: usize, mv: Move },

    /// The configuration is in the other parity class from the goal.
    #[error("no solution exists: configuration is in the unsolvable parity class")]
    Unsolvable,

    /// The search hit a caller-imposed bound before finding the goal.
    #[error("search aborted after {nodes_expanded} expansions: {reason}")]
    SearchAborted {
        reason: AbortReason,
        nodes_expanded: usize,
    },
}

/// Which bound stopped an aborted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// `SolverConfig::max_expansions` was reached
    ExpansionLimit,
    /// `SolverConfig::timeout` elapsed
    Timeout,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::ExpansionLimit => write!(f, "expansion limit reached"),
            AbortReason::Timeout => write!(f, "timeout"),
        }
    }
}
