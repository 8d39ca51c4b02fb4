//! # 2048
//!
//! 4x4 sliding merge puzzle. A shift collapses every line toward the
//! moving edge preserving tile order, merges adjacent equal pairs once
//! each, then spawns a single `2` at a random empty cell. A direction
//! that changes nothing is not a legal move: it spawns no tile and does
//! not count. The round is lost when the board is full and no adjacent
//! equal pair remains in any row or column.

use crate::games::Direction;
use crate::{GameEngine, Status};
use arcade_board::Grid;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;

pub const SIZE: usize = 4;

#[derive(Debug, Clone)]
pub struct Game2048State {
    /// Tile values; 0 is empty.
    board: Grid<u32>,
    /// Spawn-cell selection lives in the state so a transition is a pure
    /// function of the state snapshot.
    rng: Xoshiro256PlusPlus,
}

/// Collapses one line's non-empty values toward the front and merges
/// adjacent equal pairs front-first, each value merging at most once.
fn merge_line(values: &[u32]) -> Vec<u32> {
    let mut merged = Vec::with_capacity(values.len());
    let mut i = 0;
    while i < values.len() {
        if i + 1 < values.len() && values[i] == values[i + 1] {
            merged.push(values[i] * 2);
            i += 2;
        } else {
            merged.push(values[i]);
            i += 1;
        }
    }
    merged
}

impl Game2048State {
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Deterministic construction for scripted rounds.
    pub fn with_seed(seed: u64) -> Self {
        let mut state = Game2048State {
            board: Grid::new(SIZE, SIZE, 0),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        };
        state.spawn_tile();
        state
    }

    /// A board with fixed tiles, row-major. For scripted rounds.
    pub fn with_board(rows: [[u32; SIZE]; SIZE], seed: u64) -> Self {
        Game2048State {
            board: Grid::from_fn(SIZE, SIZE, |r, c| rows[r][c]),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn board(&self) -> &Grid<u32> {
        &self.board
    }

    /// The board after shifting in `dir`, before any spawn.
    fn shifted(&self, dir: Direction) -> Grid<u32> {
        let mut next = Grid::new(SIZE, SIZE, 0);
        for lane in 0..SIZE {
            // Cell order along the lane, starting at the moving edge.
            let order: Vec<(usize, usize)> = (0..SIZE)
                .map(|i| match dir {
                    Direction::Up => (i, lane),
                    Direction::Down => (SIZE - 1 - i, lane),
                    Direction::Left => (lane, i),
                    Direction::Right => (lane, SIZE - 1 - i),
                })
                .collect();
            let values: Vec<u32> = order
                .iter()
                .map(|&cell| self.board[cell])
                .filter(|&v| v != 0)
                .collect();
            let merged = merge_line(&values);
            for (slot, &value) in order.iter().zip(merged.iter()) {
                next[*slot] = value;
            }
        }
        next
    }

    fn spawn_tile(&mut self) {
        let empties: Vec<(usize, usize)> = self
            .board
            .iter()
            .filter(|(_, &v)| v == 0)
            .map(|(cell, _)| cell)
            .collect();
        if empties.is_empty() {
            return;
        }
        let cell = empties[self.rng.gen_range(0..empties.len())];
        self.board[cell] = 2;
    }

    /// True when some row or column holds an adjacent equal pair.
    fn any_merge_possible(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE - 1 {
                if self.board[(r, c)] == self.board[(r, c + 1)]
                    || self.board[(c, r)] == self.board[(c + 1, r)]
                {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for Game2048State {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for Game2048State {
    type Move = Direction;

    /// A shift is legal only when it changes the board; a no-op direction
    /// spawns nothing and does not count as a move.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        self.shifted(*mv) != self.board
    }

    fn apply(&mut self, mv: &Self::Move) {
        self.board = self.shifted(*mv);
        self.spawn_tile();
    }

    fn status(&self) -> Status {
        let full = self.board.iter().all(|(_, &v)| v != 0);
        if full && !self.any_merge_possible() {
            Status::Loss
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for Game2048State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                match self.board[(r, c)] {
                    0 => write!(f, "{:>5}", ".")?,
                    v => write!(f, "{:>5}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
