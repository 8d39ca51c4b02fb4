//! # Minesweeper
//!
//! 9x9 board with 10 mines. Revealing a zero-adjacency cell floods the
//! connected zero region and its numbered border; revealing a mine
//! uncovers every mine and ends the round. Flags toggle on unrevealed
//! cells and feed the approximate mines-left counter (mines minus flags,
//! no correctness cross-check).

use crate::{GameEngine, Status};
use arcade_board::{flood_fill, Connectivity, Grid};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const ROWS: usize = 9;
pub const COLS: usize = 9;
pub const MINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Number of neighboring mines (0-8).
    pub adjacent: u8,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum MinesweeperMove {
    Reveal(usize, usize),
    Flag(usize, usize),
}

#[derive(Debug, Clone)]
pub struct MinesweeperState {
    cells: Grid<Cell>,
    /// Set when a mine has been revealed; the round is lost.
    exploded: bool,
}

impl MinesweeperState {
    /// A fresh board with `MINES` mines placed at distinct random cells.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let mut mines = Vec::with_capacity(MINES);
        while mines.len() < MINES {
            let cell = (rng.gen_range(0..ROWS), rng.gen_range(0..COLS));
            if !mines.contains(&cell) {
                mines.push(cell);
            }
        }
        Self::with_mines(&mines)
    }

    /// A board with a fixed mine layout. Useful for scripted rounds.
    pub fn with_mines(mines: &[(usize, usize)]) -> Self {
        let mut cells = Grid::new(ROWS, COLS, Cell::default());
        for &(r, c) in mines {
            cells[(r, c)].has_mine = true;
        }
        for r in 0..ROWS {
            for c in 0..COLS {
                if cells[(r, c)].has_mine {
                    continue;
                }
                let count = cells
                    .neighbors(r, c, Connectivity::Diagonal)
                    .filter(|&(nr, nc)| cells[(nr, nc)].has_mine)
                    .count();
                cells[(r, c)].adjacent = count as u8;
            }
        }
        MinesweeperState {
            cells,
            exploded: false,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row, col).ok()
    }

    /// Approximate remaining-mine count: mines minus flags placed,
    /// with no check that the flags sit on actual mines.
    pub fn mines_left(&self) -> i32 {
        let mines = self.cells.iter().filter(|(_, cell)| cell.has_mine).count();
        let flags = self.cells.iter().filter(|(_, cell)| cell.flagged).count();
        mines as i32 - flags as i32
    }

    fn reveal(&mut self, row: usize, col: usize) {
        if self.cells[(row, col)].has_mine {
            self.cells[(row, col)].revealed = true;
            self.exploded = true;
            // Show the player where every mine was.
            for r in 0..ROWS {
                for c in 0..COLS {
                    if self.cells[(r, c)].has_mine {
                        self.cells[(r, c)].revealed = true;
                    }
                }
            }
            return;
        }

        let cells = &mut self.cells;
        flood_fill(ROWS, COLS, (row, col), Connectivity::Diagonal, |r, c| {
            let cell = &mut cells[(r, c)];
            if cell.revealed || cell.flagged || cell.has_mine {
                return false;
            }
            cell.revealed = true;
            // Only zero-adjacency cells propagate; numbered cells reveal
            // alone and seal the border of the flooded region.
            cell.adjacent == 0
        });
    }
}

impl Default for MinesweeperState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for MinesweeperState {
    type Move = MinesweeperMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        match *mv {
            MinesweeperMove::Reveal(r, c) => match self.cells.get(r, c) {
                Ok(cell) => !cell.revealed && !cell.flagged,
                Err(_) => false,
            },
            MinesweeperMove::Flag(r, c) => match self.cells.get(r, c) {
                Ok(cell) => !cell.revealed,
                Err(_) => false,
            },
        }
    }

    fn apply(&mut self, mv: &Self::Move) {
        match *mv {
            MinesweeperMove::Reveal(r, c) => self.reveal(r, c),
            MinesweeperMove::Flag(r, c) => {
                let cell = &mut self.cells[(r, c)];
                cell.flagged = !cell.flagged;
            }
        }
    }

    fn status(&self) -> Status {
        if self.exploded {
            return Status::Loss;
        }
        let cleared = self
            .cells
            .iter()
            .all(|(_, cell)| cell.has_mine || cell.revealed);
        if cleared {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for MinesweeperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..ROWS {
            for c in 0..COLS {
                let cell = self.cells[(r, c)];
                let symbol = if cell.revealed {
                    if cell.has_mine {
                        "*".to_string()
                    } else if cell.adjacent > 0 {
                        cell.adjacent.to_string()
                    } else {
                        " ".to_string()
                    }
                } else if cell.flagged {
                    "F".to_string()
                } else {
                    ".".to_string()
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for MinesweeperMove {
    type Err = String;

    /// `row,col` reveals; `f row,col` toggles a flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (flag, coords) = match trimmed.strip_prefix("f ") {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let parts: Vec<&str> = coords.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err("expected format: row,col or f row,col".to_string());
        }
        let r = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let c = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        if flag {
            Ok(MinesweeperMove::Flag(r, c))
        } else {
            Ok(MinesweeperMove::Reveal(r, c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All mines in the bottom-right 2x5 block, leaving the top-left
    /// corner a large zero-adjacency region.
    fn corner_mines() -> MinesweeperState {
        MinesweeperState::with_mines(&[
            (7, 4),
            (7, 5),
            (7, 6),
            (7, 7),
            (7, 8),
            (8, 4),
            (8, 5),
            (8, 6),
            (8, 7),
            (8, 8),
        ])
    }

    #[test]
    fn test_adjacency_counts() {
        let game = corner_mines();
        assert_eq!(game.cell(0, 0).unwrap().adjacent, 0);
        assert_eq!(game.cell(6, 4).unwrap().adjacent, 2);
        assert_eq!(game.cell(6, 3).unwrap().adjacent, 1);
    }

    #[test]
    fn test_flood_reveal_stops_at_border() {
        let mut game = corner_mines();
        game.apply(&MinesweeperMove::Reveal(0, 0));

        // The zero region and its numbered border open up...
        assert!(game.cell(0, 8).unwrap().revealed);
        assert!(game.cell(6, 4).unwrap().revealed);
        assert!(game.cell(8, 3).unwrap().revealed);
        // ...but mines stay hidden.
        assert!(!game.cell(7, 4).unwrap().revealed);
        assert!(!game.cell(8, 8).unwrap().revealed);
        // Everything safe was reached, so the round is already won.
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_numbered_cell_reveals_alone() {
        let mut game = corner_mines();
        game.apply(&MinesweeperMove::Reveal(6, 4));

        assert!(game.cell(6, 4).unwrap().revealed);
        assert!(!game.cell(6, 3).unwrap().revealed);
        assert!(!game.cell(5, 4).unwrap().revealed);
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn test_flag_blocks_flood() {
        let mut game = corner_mines();
        game.apply(&MinesweeperMove::Flag(3, 3));
        game.apply(&MinesweeperMove::Reveal(0, 0));

        assert!(!game.cell(3, 3).unwrap().revealed);
        assert!(game.cell(3, 2).unwrap().revealed);
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn test_mine_reveal_loses_and_shows_mines() {
        let mut game = corner_mines();
        game.apply(&MinesweeperMove::Reveal(7, 4));

        assert_eq!(game.status(), Status::Loss);
        assert!(game.cell(8, 8).unwrap().revealed);
        assert!(game.cell(7, 7).unwrap().revealed);
    }

    #[test]
    fn test_reveal_legality() {
        let mut game = corner_mines();
        game.apply(&MinesweeperMove::Flag(2, 2));
        assert!(!game.is_legal(&MinesweeperMove::Reveal(2, 2)));
        game.apply(&MinesweeperMove::Reveal(6, 4));
        assert!(!game.is_legal(&MinesweeperMove::Reveal(6, 4)));
        assert!(!game.is_legal(&MinesweeperMove::Flag(6, 4)));
        assert!(!game.is_legal(&MinesweeperMove::Reveal(9, 0)));
    }

    #[test]
    fn test_mines_left_counter() {
        let mut game = corner_mines();
        assert_eq!(game.mines_left(), 10);
        game.apply(&MinesweeperMove::Flag(0, 0));
        game.apply(&MinesweeperMove::Flag(0, 1));
        assert_eq!(game.mines_left(), 8);
        // Unflagging restores the count; placement is never checked.
        game.apply(&MinesweeperMove::Flag(0, 0));
        assert_eq!(game.mines_left(), 9);
    }

    #[test]
    fn test_random_board_has_ten_mines() {
        let game = MinesweeperState::new();
        let mines = (0..ROWS)
            .flat_map(|r| (0..COLS).map(move |c| (r, c)))
            .filter(|&(r, c)| game.cell(r, c).unwrap().has_mine)
            .count();
        assert_eq!(mines, MINES);
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            "3,4".parse::<MinesweeperMove>().unwrap(),
            MinesweeperMove::Reveal(3, 4)
        );
        assert_eq!(
            "f 3,4".parse::<MinesweeperMove>().unwrap(),
            MinesweeperMove::Flag(3, 4)
        );
    }
}
