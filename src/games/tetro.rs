//! # Tetro
//!
//! Falling-block game on a 12x10 well. Three shapes (single cell, 2-tall
//! bar, 2x2 square) spawn at the top-left and fall one row per gravity
//! tick. A blocked tick locks the piece: fully occupied rows become
//! permanently marked (they never clear), locking any cell inside the
//! top eight rows loses the round, and marking five rows wins it. The
//! gravity tick arrives as an ordinary move, submitted by the session's
//! timer (see [`crate::scheduler::run_gravity`]).

use crate::{GameEngine, Status};
use arcade_board::Grid;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use std::str::FromStr;

pub const ROWS: usize = 12;
pub const COLS: usize = 10;
/// Locking a cell above this row loses the round.
pub const TOP_ZONE_ROWS: usize = 8;
/// Marked rows needed to win.
pub const TARGET_ROWS: usize = 5;

/// Shape cells as offsets from the piece's top-left anchor.
const SHAPES: [&[(usize, usize)]; 3] = [
    &[(0, 0)],
    &[(0, 0), (1, 0)],
    &[(0, 0), (0, 1), (1, 0), (1, 1)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetroCell {
    Empty,
    Locked,
    /// Part of a completed row; permanent.
    Marked,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TetroMove {
    Left,
    Right,
    /// One gravity step; locks the piece when it cannot descend.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: usize,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct TetroState {
    board: Grid<TetroCell>,
    piece: Option<Piece>,
    marked_rows: usize,
    lost: bool,
    rng: Xoshiro256PlusPlus,
}

impl TetroState {
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Deterministic piece sequence for scripted rounds.
    pub fn with_seed(seed: u64) -> Self {
        let mut state = TetroState {
            board: Grid::new(ROWS, COLS, TetroCell::Empty),
            piece: None,
            marked_rows: 0,
            lost: false,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        };
        state.spawn_piece();
        state
    }

    pub fn board(&self) -> &Grid<TetroCell> {
        &self.board
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    pub fn marked_rows(&self) -> usize {
        self.marked_rows
    }

    fn spawn_piece(&mut self) {
        let shape = self.rng.gen_range(0..SHAPES.len());
        self.piece = Some(Piece {
            shape,
            row: 0,
            col: 0,
        });
    }

    /// True if the piece can move by `(dr, dc)` without leaving the well
    /// or hitting an occupied cell.
    fn can_move(&self, piece: Piece, dr: i32, dc: i32) -> bool {
        SHAPES[piece.shape].iter().all(|&(r, c)| {
            let nr = piece.row as i32 + r as i32 + dr;
            let nc = piece.col as i32 + c as i32 + dc;
            nr >= 0
                && (nr as usize) < ROWS
                && nc >= 0
                && (nc as usize) < COLS
                && self.board[(nr as usize, nc as usize)] == TetroCell::Empty
        })
    }

    fn lock_piece(&mut self, piece: Piece) {
        for &(r, c) in SHAPES[piece.shape] {
            let cell = (piece.row + r, piece.col + c);
            self.board[cell] = TetroCell::Locked;
            if cell.0 < TOP_ZONE_ROWS {
                self.lost = true;
            }
        }

        // Completed rows turn marked and stay that way.
        for r in 0..ROWS {
            let full = (0..COLS).all(|c| self.board[(r, c)] != TetroCell::Empty);
            let already = (0..COLS).all(|c| self.board[(r, c)] == TetroCell::Marked);
            if full && !already {
                for c in 0..COLS {
                    self.board[(r, c)] = TetroCell::Marked;
                }
            }
        }
        self.marked_rows = (0..ROWS)
            .filter(|&r| (0..COLS).all(|c| self.board[(r, c)] == TetroCell::Marked))
            .count();

        if self.lost || self.marked_rows >= TARGET_ROWS {
            self.piece = None;
        } else {
            self.spawn_piece();
        }
    }
}

impl Default for TetroState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for TetroState {
    type Move = TetroMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        let Some(piece) = self.piece else {
            return false;
        };
        match mv {
            TetroMove::Left => self.can_move(piece, 0, -1),
            TetroMove::Right => self.can_move(piece, 0, 1),
            // A tick always resolves: the piece descends or locks.
            TetroMove::Tick => true,
        }
    }

    fn apply(&mut self, mv: &Self::Move) {
        let Some(piece) = self.piece else {
            return;
        };
        match mv {
            TetroMove::Left => {
                if let Some(p) = self.piece.as_mut() {
                    p.col -= 1;
                }
            }
            TetroMove::Right => {
                if let Some(p) = self.piece.as_mut() {
                    p.col += 1;
                }
            }
            TetroMove::Tick => {
                if self.can_move(piece, 1, 0) {
                    if let Some(p) = self.piece.as_mut() {
                        p.row += 1;
                    }
                } else {
                    self.lock_piece(piece);
                }
            }
        }
    }

    fn status(&self) -> Status {
        if self.lost {
            Status::Loss
        } else if self.marked_rows >= TARGET_ROWS {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for TetroState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let piece_cells: Vec<(usize, usize)> = self
            .piece
            .map(|p| {
                SHAPES[p.shape]
                    .iter()
                    .map(|&(r, c)| (p.row + r, p.col + c))
                    .collect()
            })
            .unwrap_or_default();
        for r in 0..ROWS {
            for c in 0..COLS {
                let symbol = if piece_cells.contains(&(r, c)) {
                    "@"
                } else {
                    match self.board[(r, c)] {
                        TetroCell::Empty => ".",
                        TetroCell::Locked => "#",
                        TetroCell::Marked => "=",
                    }
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for TetroMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "a" => Ok(TetroMove::Left),
            "right" | "r" | "d" => Ok(TetroMove::Right),
            "tick" | "t" | "" => Ok(TetroMove::Tick),
            other => Err(format!("unknown tetro move: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A state with a chosen board and active piece, bypassing the RNG.
    fn scripted(piece: Piece, locked: &[(usize, usize)]) -> TetroState {
        let mut board = Grid::new(ROWS, COLS, TetroCell::Empty);
        for &cell in locked {
            board[cell] = TetroCell::Locked;
        }
        TetroState {
            board,
            piece: Some(piece),
            marked_rows: 0,
            lost: false,
            rng: Xoshiro256PlusPlus::seed_from_u64(1),
        }
    }

    fn single(row: usize, col: usize) -> Piece {
        Piece {
            shape: 0,
            row,
            col,
        }
    }

    #[test]
    fn test_tick_descends_until_floor() {
        let mut game = scripted(single(ROWS - 2, 0), &[]);
        game.apply(&TetroMove::Tick);
        assert_eq!(game.piece().unwrap().row, ROWS - 1);

        // Next tick cannot descend: the piece locks and a new one spawns.
        game.apply(&TetroMove::Tick);
        assert_eq!(game.board()[(ROWS - 1, 0)], TetroCell::Locked);
        let respawned = game.piece().unwrap();
        assert_eq!((respawned.row, respawned.col), (0, 0));
    }

    #[test]
    fn test_horizontal_moves_respect_walls() {
        let mut game = scripted(single(ROWS - 1, 0), &[]);
        assert!(!game.is_legal(&TetroMove::Left));
        assert!(game.is_legal(&TetroMove::Right));
        game.apply(&TetroMove::Right);
        assert_eq!(game.piece().unwrap().col, 1);
    }

    #[test]
    fn test_horizontal_moves_respect_locked_cells() {
        let game = scripted(single(ROWS - 1, 3), &[(ROWS - 1, 4)]);
        assert!(!game.is_legal(&TetroMove::Right));
        assert!(game.is_legal(&TetroMove::Left));
    }

    #[test]
    fn test_full_row_marks_permanently() {
        // Bottom row already filled except the last column.
        let filled: Vec<(usize, usize)> = (0..COLS - 1).map(|c| (ROWS - 1, c)).collect();
        let mut game = scripted(single(ROWS - 1, COLS - 1), &filled);
        game.apply(&TetroMove::Tick); // cannot descend, locks and completes the row

        assert_eq!(game.marked_rows(), 1);
        assert_eq!(game.board()[(ROWS - 1, 0)], TetroCell::Marked);
        assert_eq!(game.board()[(ROWS - 1, COLS - 1)], TetroCell::Marked);
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn test_lock_in_top_zone_loses() {
        // A column of locked cells forces the piece to rest high up.
        let stack: Vec<(usize, usize)> = (TOP_ZONE_ROWS..ROWS).map(|r| (r, 0)).collect();
        let mut game = scripted(single(TOP_ZONE_ROWS - 1, 0), &stack);
        game.apply(&TetroMove::Tick);

        assert_eq!(game.status(), Status::Loss);
        assert!(game.piece().is_none());
        assert!(!game.is_legal(&TetroMove::Tick));
    }

    #[test]
    fn test_win_at_target_rows() {
        // Four rows already marked, bottom row one cell short.
        let mut board = Grid::new(ROWS, COLS, TetroCell::Empty);
        for r in ROWS - 5..ROWS - 1 {
            for c in 0..COLS {
                board[(r, c)] = TetroCell::Marked;
            }
        }
        for c in 0..COLS - 1 {
            board[(ROWS - 1, c)] = TetroCell::Locked;
        }
        let mut game = TetroState {
            board,
            piece: Some(single(ROWS - 1, COLS - 1)),
            marked_rows: 4,
            lost: false,
            rng: Xoshiro256PlusPlus::seed_from_u64(1),
        };
        game.apply(&TetroMove::Tick);

        assert_eq!(game.marked_rows(), TARGET_ROWS);
        assert_eq!(game.status(), Status::Win(1));
        assert!(game.piece().is_none());
    }

    #[test]
    fn test_square_shape_locks_all_cells() {
        let piece = Piece {
            shape: 2,
            row: ROWS - 2,
            col: 4,
        };
        let mut game = scripted(piece, &[]);
        game.apply(&TetroMove::Tick);

        for cell in [
            (ROWS - 2, 4),
            (ROWS - 2, 5),
            (ROWS - 1, 4),
            (ROWS - 1, 5),
        ] {
            assert_eq!(game.board()[cell], TetroCell::Locked);
        }
    }
}
