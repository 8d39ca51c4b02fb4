use crate::{GameEngine, Status};
use std::fmt;
use std::str::FromStr;

const SIZE: usize = 3;

// The eight straight lines on the 3x3 board, as flat cell indices.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize, pub usize);

/// 1 = X, -1 = O, 0 = empty.
#[derive(Debug, Clone)]
pub struct TicTacToeState {
    board: [i32; SIZE * SIZE],
    current_player: i32,
}

impl TicTacToeState {
    pub fn new() -> Self {
        TicTacToeState {
            board: [0; SIZE * SIZE],
            current_player: 1,
        }
    }

    /// The winning token and line, if any line is complete.
    fn winner(&self) -> Option<(i32, [usize; 3])> {
        for line in WIN_LINES {
            let [a, b, c] = line;
            if self.board[a] != 0 && self.board[a] == self.board[b] && self.board[a] == self.board[c]
            {
                return Some((self.board[a], line));
            }
        }
        None
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|&cell| cell != 0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<i32> {
        if row < SIZE && col < SIZE {
            Some(self.board[row * SIZE + col])
        } else {
            None
        }
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for TicTacToeState {
    type Move = TicTacToeMove;

    fn current_actor(&self) -> i32 {
        self.current_player
    }

    fn is_legal(&self, mv: &Self::Move) -> bool {
        mv.0 < SIZE && mv.1 < SIZE && self.board[mv.0 * SIZE + mv.1] == 0
    }

    fn apply(&mut self, mv: &Self::Move) {
        self.board[mv.0 * SIZE + mv.1] = self.current_player;
        self.current_player = -self.current_player;
    }

    fn status(&self) -> Status {
        if let Some((player, _)) = self.winner() {
            Status::Win(player)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }

    fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        self.winner()
            .map(|(_, line)| line.iter().map(|&i| (i / SIZE, i % SIZE)).collect())
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let symbol = match self.board[r * SIZE + c] {
                    1 => "X",
                    -1 => "O",
                    _ => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for TicTacToeMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err("expected format: row,col".to_string());
        }
        let r = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let c = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        Ok(TicTacToeMove(r, c))
    }
}
