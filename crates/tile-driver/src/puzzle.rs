//! Puzzle representation: immutable tile configurations and the
//! transition function between them.
//!
//! A configuration is a row-major list of `width²` distinct values where
//! `0` is the blank. The goal is the ascending list `0, 1, 2, ...`, so the
//! blank's home is the top-left cell. Moves never mutate a configuration;
//! they return a new one.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::SolveError;

/// Smallest supported board width
pub const MIN_WIDTH: usize = 2;
/// Largest supported board width (tiles are stored as `u8`)
pub const MAX_WIDTH: usize = 16;

/// A move, named by where the blank goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Left,
    Down,
    Up,
    Right,
}

impl Move {
    /// All moves in expansion order (`H`, `J`, `K`, `L`).
    pub const ALL: [Move; 4] = [Move::Left, Move::Down, Move::Up, Move::Right];

    pub fn opposite(self) -> Move {
        match self {
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
        }
    }

    /// Row and column offset of the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Move::Left => 'H',
            Move::Down => 'J',
            Move::Up => 'K',
            Move::Right => 'L',
        }
    }

    pub fn from_char(ch: char) -> Result<Move, SolveError> {
        match ch {
            'H' => Ok(Move::Left),
            'J' => Ok(Move::Down),
            'K' => Ok(Move::Up),
            'L' => Ok(Move::Right),
            _ => Err(SolveError::InvalidMove { ch }),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse a move string such as `"KH"`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, SolveError> {
    s.chars().map(Move::from_char).collect()
}

/// Render moves in the `HJKL` alphabet.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| m.to_char()).collect()
}

/// One tile configuration.
///
/// Construction validates the configuration, so every `Puzzle` holds
/// exactly one of each value in `0..width²`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Puzzle {
    tiles: Box<[u8]>,
    width: usize,
    blank: usize,
}

impl Puzzle {
    /// Build a puzzle from an explicit row-major configuration.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, SolveError> {
        let len = tiles.len();
        let width = (MIN_WIDTH..=MAX_WIDTH)
            .find(|w| w * w == len)
            .ok_or(SolveError::InvalidLength { len })?;

        let max = (len - 1) as u8;
        let mut seen = [false; MAX_WIDTH * MAX_WIDTH];
        for &tile in tiles {
            if tile > max {
                return Err(SolveError::TileOutOfRange { tile, max });
            }
            if seen[tile as usize] {
                return Err(SolveError::DuplicateTile { tile });
            }
            seen[tile as usize] = true;
        }

        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or(SolveError::MissingBlank)?;

        Ok(Self {
            tiles: tiles.into(),
            width,
            blank,
        })
    }

    /// The goal configuration of the given width.
    pub fn solved(width: usize) -> Result<Self, SolveError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(SolveError::InvalidLength { len: width * width });
        }
        let tiles: Vec<u8> = (0..width * width).map(|v| v as u8).collect();
        Ok(Self {
            tiles: tiles.into_boxed_slice(),
            width,
            blank: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Cell index of the blank
    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, &t)| t as usize == i)
    }

    /// Apply a move, or `None` if the blank would leave the board.
    pub fn apply(&self, mv: Move) -> Option<Puzzle> {
        let (dr, dc) = mv.delta();
        let row = (self.blank / self.width) as isize + dr;
        let col = (self.blank % self.width) as isize + dc;
        let bound = self.width as isize;
        if row < 0 || row >= bound || col < 0 || col >= bound {
            return None;
        }

        let target = row as usize * self.width + col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Puzzle {
            tiles,
            width: self.width,
            blank: target,
        })
    }

    /// Every legal move with its resulting configuration, in `Move::ALL` order.
    pub fn legal_moves(&self) -> SmallVec<[(Move, Puzzle); 4]> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply(mv).map(|next| (mv, next)))
            .collect()
    }

    /// Whether the goal is reachable from this configuration.
    ///
    /// Each move is one transposition of the full permutation (blank
    /// included) and shifts the blank by one cell, so the permutation
    /// parity always matches the parity of the blank's distance from its
    /// home cell on a reachable configuration.
    pub fn is_solvable(&self) -> bool {
        let blank_distance = self.blank / self.width + self.blank % self.width;
        count_inversions(&self.tiles) % 2 == blank_distance % 2
    }
}

fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

impl TryFrom<Vec<u8>> for Puzzle {
    type Error = SolveError;

    fn try_from(tiles: Vec<u8>) -> Result<Self, Self::Error> {
        Puzzle::from_tiles(&tiles)
    }
}

impl From<Puzzle> for Vec<u8> {
    fn from(puzzle: Puzzle) -> Self {
        puzzle.tiles.into_vec()
    }
}

/// Puzzle input file as read by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub tiles: Puzzle,
}
