//! # Connect Four
//!
//! Players alternate dropping discs into columns; gravity pulls each disc
//! to the lowest empty row. The first run of four in a row (horizontally,
//! vertically, or diagonally) wins, and the winning cells are reported so
//! a UI can highlight them. A full board with no run is a draw.

use crate::{GameEngine, Status};
use arcade_board::{run_through, Grid};
use std::fmt;
use std::str::FromStr;

/// Column to drop a disc into, 0-based.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

/// Complete state of a Connect Four game.
///
/// The board uses 1 for the first player's discs, -1 for the second's,
/// and 0 for empty cells.
#[derive(Debug, Clone)]
pub struct Connect4State {
    board: Grid<i32>,
    current_player: i32,
    /// Number of discs in a row needed to win.
    line_size: usize,
    /// Cell filled by the last drop, if any.
    last_move: Option<(usize, usize)>,
}

impl Connect4State {
    /// Creates a game on the standard 6x7 board with a 4-disc win line.
    pub fn new() -> Self {
        Self::with_dimensions(6, 7, 4)
    }

    pub fn with_dimensions(rows: usize, cols: usize, line_size: usize) -> Self {
        Connect4State {
            board: Grid::new(rows, cols, 0),
            current_player: 1,
            line_size,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Grid<i32> {
        &self.board
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|(_, &cell)| cell != 0)
    }

    /// The token that just completed a run, if the last drop won.
    fn winner(&self) -> Option<i32> {
        let (r, c) = self.last_move?;
        let player = self.board[(r, c)];
        if player == 0 {
            return None;
        }
        run_through(&self.board, r, c, &player, self.line_size).map(|_| player)
    }
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for Connect4State {
    type Move = Connect4Move;

    fn current_actor(&self) -> i32 {
        self.current_player
    }

    /// A drop is legal while the column exists and its top cell is empty.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        mv.0 < self.board.cols() && self.board[(0, mv.0)] == 0
    }

    fn apply(&mut self, mv: &Self::Move) {
        for r in (0..self.board.rows()).rev() {
            if self.board[(r, mv.0)] == 0 {
                self.board[(r, mv.0)] = self.current_player;
                self.last_move = Some((r, mv.0));
                self.current_player = -self.current_player;
                return;
            }
        }
    }

    fn status(&self) -> Status {
        if let Some(player) = self.winner() {
            Status::Win(player)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        let (r, c) = self.last_move?;
        let player = self.board[(r, c)];
        if player == 0 {
            return None;
        }
        run_through(&self.board, r, c, &player, self.line_size)
    }

    fn fresh(&self) -> Self {
        Self::with_dimensions(self.board.rows(), self.board.cols(), self.line_size)
    }
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.board.rows() {
            for c in 0..self.board.cols() {
                let symbol = match self.board[(r, c)] {
                    1 => "R",
                    -1 => "Y",
                    _ => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}
