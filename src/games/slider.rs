use crate::games::Direction;
use crate::{GameEngine, Status};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

/// Flat index of the tile to slide into the blank.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SliderMove(pub usize);

/// 3x3 sliding tile puzzle: tiles 0-7 plus one blank. Solved when the
/// tiles sit in order with the blank in the last cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderState {
    board: [Option<u8>; CELLS],
    blank: usize,
}

fn solved_board() -> [Option<u8>; CELLS] {
    let mut board = [None; CELLS];
    for (i, slot) in board.iter_mut().enumerate().take(CELLS - 1) {
        *slot = Some(i as u8);
    }
    board
}

fn manhattan(a: usize, b: usize) -> usize {
    let (ar, ac) = (a / SIDE, a % SIDE);
    let (br, bc) = (b / SIDE, b % SIDE);
    ar.abs_diff(br) + ac.abs_diff(bc)
}

impl SliderState {
    /// A shuffled board, rerolled until it is not already solved.
    ///
    /// The shuffle is uniform over tile arrangements and does not check
    /// solvability, so a round may have no path to the solved order by
    /// legal moves alone; the solve shortcut always remains available.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut tiles: Vec<u8> = (0..(CELLS - 1) as u8).collect();
            tiles.shuffle(&mut rng);
            let blank = rng.gen_range(0..CELLS);

            let mut board = [None; CELLS];
            let mut next = tiles.into_iter();
            for (i, slot) in board.iter_mut().enumerate() {
                if i != blank {
                    *slot = next.next();
                }
            }

            let state = SliderState { board, blank };
            if state.board != solved_board() {
                return state;
            }
        }
    }

    /// A fixed arrangement. For scripted rounds; exactly one cell must be
    /// `None`.
    pub fn with_board(board: [Option<u8>; CELLS]) -> Self {
        let blank = board
            .iter()
            .position(|cell| cell.is_none())
            .expect("board needs a blank cell");
        SliderState { board, blank }
    }

    pub fn tile(&self, index: usize) -> Option<u8> {
        self.board.get(index).copied().flatten()
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Jumps straight to the solved arrangement. An administrative
    /// override, not a move: it does not count or score.
    pub fn solve(&mut self) {
        self.board = solved_board();
        self.blank = CELLS - 1;
    }

    /// The tile index an arrow key pushes into the blank, mirroring the
    /// click controls: `Up` moves the tile below the blank up, and so on.
    pub fn target_for(&self, dir: Direction) -> Option<usize> {
        let (row, col) = (self.blank / SIDE, self.blank % SIDE);
        match dir {
            Direction::Up if row < SIDE - 1 => Some(self.blank + SIDE),
            Direction::Down if row > 0 => Some(self.blank - SIDE),
            Direction::Left if col < SIDE - 1 => Some(self.blank + 1),
            Direction::Right if col > 0 => Some(self.blank - 1),
            _ => None,
        }
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for SliderState {
    type Move = SliderMove;

    /// Legal iff the target is exactly one orthogonal step from the blank.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        mv.0 < CELLS && manhattan(mv.0, self.blank) == 1
    }

    fn apply(&mut self, mv: &Self::Move) {
        self.board.swap(self.blank, mv.0);
        self.blank = mv.0;
    }

    fn status(&self) -> Status {
        if self.board == solved_board() {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for SliderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIDE {
            for c in 0..SIDE {
                match self.board[r * SIDE + c] {
                    Some(tile) => write!(f, "{} ", tile + 1)?,
                    None => write!(f, "_ ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for SliderMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(SliderMove(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One move away from solved: blank in the middle of the bottom row.
    fn nearly_solved() -> SliderState {
        SliderState::with_board([
            Some(0),
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            Some(5),
            Some(6),
            None,
            Some(7),
        ])
    }

    #[test]
    fn test_only_adjacent_tiles_move() {
        let game = nearly_solved();
        assert!(game.is_legal(&SliderMove(4)));
        assert!(game.is_legal(&SliderMove(6)));
        assert!(game.is_legal(&SliderMove(8)));
        // Diagonal and distant tiles stay put.
        assert!(!game.is_legal(&SliderMove(0)));
        assert!(!game.is_legal(&SliderMove(3)));
        assert!(!game.is_legal(&SliderMove(9)));
    }

    #[test]
    fn test_swap_moves_blank() {
        let mut game = nearly_solved();
        game.apply(&SliderMove(8));
        assert_eq!(game.blank(), 8);
        assert_eq!(game.tile(7), Some(7));
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_solve_shortcut() {
        let mut game = SliderState::new();
        assert_eq!(game.status(), Status::InProgress);
        game.solve();
        assert_eq!(game.status(), Status::Win(1));
        assert_eq!(game.blank(), 8);
    }

    #[test]
    fn test_arrow_targets_mirror_blank_position() {
        let game = nearly_solved(); // blank at 7, middle of bottom row
        assert_eq!(game.target_for(Direction::Down), Some(4));
        assert_eq!(game.target_for(Direction::Left), Some(8));
        assert_eq!(game.target_for(Direction::Right), Some(6));
        assert_eq!(game.target_for(Direction::Up), None);
    }

    #[test]
    fn test_generated_board_never_starts_solved() {
        for _ in 0..20 {
            let game = SliderState::new();
            assert_eq!(game.status(), Status::InProgress);
        }
    }
}
