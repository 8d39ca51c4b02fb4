//! # Game Wrapper Module - Unified Game Interface
//!
//! This module provides the abstraction layer that lets the session
//! controller and any UI collaborator work with every supported game
//! through a single concrete type. Each game keeps its own move and state
//! types; the wrapper enums bridge them to the generic [`GameEngine`]
//! surface without trait objects, so dispatch compiles down to a match.
//!
//! Alongside the uniform engine methods, the wrapper carries the few
//! game-specific extras the collaborators need: move parsing for the
//! terminal driver, the persisted-counter key a win increments, the
//! slider's solve shortcut, and the memory game's pending flip-back.

use crate::games::blanks::{BlanksMove, BlanksState};
use crate::games::connect4::{Connect4Move, Connect4State};
use crate::games::game2048::Game2048State;
use crate::games::hilo::{HiloMove, HiloState};
use crate::games::lightson::{LightsOnMove, LightsOnState};
use crate::games::memory::{MemoryMove, MemoryState};
use crate::games::minesweeper::{MinesweeperMove, MinesweeperState};
use crate::games::rps::{Choice, RpsState};
use crate::games::slider::{SliderMove, SliderState};
use crate::games::tetro::{TetroMove, TetroState};
use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};
use crate::games::wordguess::{WordGuessMove, WordGuessState};
use crate::games::Direction;
use crate::{GameEngine, Status};
use std::fmt;

/// Wrapper enum over every supported game state.
#[derive(Debug, Clone)]
pub enum GameWrapper {
    TicTacToe(TicTacToeState),
    Connect4(Connect4State),
    Minesweeper(MinesweeperState),
    Game2048(Game2048State),
    LightsOn(LightsOnState),
    Memory(MemoryState),
    Slider(SliderState),
    Tetro(TetroState),
    WordGuess(WordGuessState),
    Blanks(BlanksState),
    Hilo(HiloState),
    Rps(RpsState),
}

/// Wrapper enum over every supported move type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveWrapper {
    TicTacToe(TicTacToeMove),
    Connect4(Connect4Move),
    Minesweeper(MinesweeperMove),
    Game2048(Direction),
    LightsOn(LightsOnMove),
    Memory(MemoryMove),
    Slider(SliderMove),
    Tetro(TetroMove),
    WordGuess(WordGuessMove),
    Blanks(BlanksMove),
    Hilo(HiloMove),
    Rps(Choice),
}

impl fmt::Display for MoveWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::TicTacToe(m) => write!(f, "T({},{})", m.0, m.1),
            MoveWrapper::Connect4(m) => write!(f, "C4({})", m.0),
            MoveWrapper::Minesweeper(m) => match m {
                MinesweeperMove::Reveal(r, c) => write!(f, "M({},{})", r, c),
                MinesweeperMove::Flag(r, c) => write!(f, "MF({},{})", r, c),
            },
            MoveWrapper::Game2048(d) => write!(f, "2048({:?})", d),
            MoveWrapper::LightsOn(m) => write!(f, "L({},{})", m.0, m.1),
            MoveWrapper::Memory(m) => write!(f, "Mem({})", m.0),
            MoveWrapper::Slider(m) => write!(f, "S({})", m.0),
            MoveWrapper::Tetro(m) => write!(f, "Tet({:?})", m),
            MoveWrapper::WordGuess(m) => write!(f, "W({})", m.0),
            MoveWrapper::Blanks(m) => write!(f, "B({}={})", m.index, m.ch),
            MoveWrapper::Hilo(m) => write!(f, "H({})", m.0),
            MoveWrapper::Rps(c) => write!(f, "R({})", c),
        }
    }
}

impl fmt::Display for GameWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::TicTacToe(g) => write!(f, "{}", g),
            GameWrapper::Connect4(g) => write!(f, "{}", g),
            GameWrapper::Minesweeper(g) => write!(f, "{}", g),
            GameWrapper::Game2048(g) => write!(f, "{}", g),
            GameWrapper::LightsOn(g) => write!(f, "{}", g),
            GameWrapper::Memory(g) => write!(f, "{}", g),
            GameWrapper::Slider(g) => write!(f, "{}", g),
            GameWrapper::Tetro(g) => write!(f, "{}", g),
            GameWrapper::WordGuess(g) => write!(f, "{}", g),
            GameWrapper::Blanks(g) => write!(f, "{}", g),
            GameWrapper::Hilo(g) => write!(f, "{}", g),
            GameWrapper::Rps(g) => write!(f, "{}", g),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameEngine for GameWrapper {
            type Move = MoveWrapper;

            fn current_actor(&self) -> i32 {
                match self {
                    $(GameWrapper::$variant(g) => g.current_actor(),)*
                }
            }

            fn is_legal(&self, mv: &Self::Move) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.is_legal(m),)*
                    _ => false,
                }
            }

            fn apply(&mut self, mv: &Self::Move) {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.apply(m),)*
                    _ => panic!("mismatched game and move types"),
                }
            }

            fn status(&self) -> Status {
                match self {
                    $(GameWrapper::$variant(g) => g.status(),)*
                }
            }

            fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
                match self {
                    $(GameWrapper::$variant(g) => g.winning_line(),)*
                }
            }

            fn fresh(&self) -> Self {
                match self {
                    $(GameWrapper::$variant(g) => GameWrapper::$variant(g.fresh()),)*
                }
            }

            fn rematch(&self) -> Self {
                match self {
                    $(GameWrapper::$variant(g) => GameWrapper::$variant(g.rematch()),)*
                }
            }
        }

        impl GameWrapper {
            /// True when the move descriptor belongs to this game.
            pub fn matches(&self, mv: &MoveWrapper) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(_), MoveWrapper::$variant(_)) => true,)*
                    _ => false,
                }
            }
        }
    };
}

impl_game_dispatch!(
    TicTacToe,
    Connect4,
    Minesweeper,
    Game2048,
    LightsOn,
    Memory,
    Slider,
    Tetro,
    WordGuess,
    Blanks,
    Hilo,
    Rps
);

impl GameWrapper {
    pub fn game_name(&self) -> &'static str {
        match self {
            GameWrapper::TicTacToe(_) => "Tic-Tac-Toe",
            GameWrapper::Connect4(_) => "Connect Four",
            GameWrapper::Minesweeper(_) => "Minesweeper",
            GameWrapper::Game2048(_) => "2048",
            GameWrapper::LightsOn(_) => "Lights On",
            GameWrapper::Memory(_) => "Memory",
            GameWrapper::Slider(_) => "Slider",
            GameWrapper::Tetro(_) => "Tetro",
            GameWrapper::WordGuess(_) => "Word Guess",
            GameWrapper::Blanks(_) => "Blanks",
            GameWrapper::Hilo(_) => "Hi-Lo",
            GameWrapper::Rps(_) => "Rock-Paper-Scissors",
        }
    }

    /// The persisted counter a win by `actor` increments, if this game
    /// keeps one: tic-tac-toe counts each letter's wins separately, the
    /// three sample-exam games share a `gamesWon` total, and the rest
    /// don't persist anything.
    pub fn win_counter_key(&self, actor: i32) -> Option<&'static str> {
        match self {
            GameWrapper::TicTacToe(_) => Some(if actor == 1 { "tic-x-wins" } else { "tic-o-wins" }),
            GameWrapper::Slider(_) | GameWrapper::Tetro(_) | GameWrapper::Blanks(_) => {
                Some("gamesWon")
            }
            _ => None,
        }
    }

    /// The slider's administrative solve shortcut. Returns false for
    /// games without one.
    pub fn solve(&mut self) -> bool {
        match self {
            GameWrapper::Slider(g) => {
                g.solve();
                true
            }
            _ => false,
        }
    }

    /// The memory game's mismatched pair awaiting flip-back, if any.
    pub fn pending_flip(&self) -> Option<(usize, usize)> {
        match self {
            GameWrapper::Memory(g) => g.pending_pair(),
            _ => None,
        }
    }

    /// Flips the memory game's pending pair face-down. A no-op for every
    /// other game.
    pub fn flip_back_pending(&mut self) {
        if let GameWrapper::Memory(g) = self {
            g.flip_back_pending();
        }
    }

    /// Parses a move line for whichever game this is. Formats follow each
    /// move type's `FromStr`.
    pub fn parse_move(&self, s: &str) -> Result<MoveWrapper, String> {
        match self {
            GameWrapper::TicTacToe(_) => s.parse().map(MoveWrapper::TicTacToe),
            GameWrapper::Connect4(_) => s.parse().map(MoveWrapper::Connect4),
            GameWrapper::Minesweeper(_) => s.parse().map(MoveWrapper::Minesweeper),
            GameWrapper::Game2048(_) => s.parse().map(MoveWrapper::Game2048),
            GameWrapper::LightsOn(_) => s.parse().map(MoveWrapper::LightsOn),
            GameWrapper::Memory(_) => s.parse().map(MoveWrapper::Memory),
            GameWrapper::Slider(_) => s.parse().map(MoveWrapper::Slider),
            GameWrapper::Tetro(_) => s.parse().map(MoveWrapper::Tetro),
            GameWrapper::WordGuess(_) => s.parse().map(MoveWrapper::WordGuess),
            GameWrapper::Blanks(_) => s.parse().map(MoveWrapper::Blanks),
            GameWrapper::Hilo(_) => s.parse().map(MoveWrapper::Hilo),
            GameWrapper::Rps(_) => s.parse().map(MoveWrapper::Rps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let move_wrapper = MoveWrapper::TicTacToe(TicTacToeMove(1, 2));
        assert_eq!(format!("{}", move_wrapper), "T(1,2)");

        let game_wrapper = GameWrapper::TicTacToe(TicTacToeState::new());
        let _ = format!("{}", game_wrapper);
    }

    #[test]
    fn test_mismatched_move_is_illegal() {
        let game = GameWrapper::TicTacToe(TicTacToeState::new());
        let mv = MoveWrapper::Connect4(Connect4Move(0));
        assert!(!game.matches(&mv));
        assert!(!game.is_legal(&mv));
    }

    #[test]
    fn test_dispatch_applies_moves() {
        let mut game = GameWrapper::Connect4(Connect4State::new());
        let mv = MoveWrapper::Connect4(Connect4Move(3));
        assert!(game.is_legal(&mv));
        game.apply(&mv);
        assert_eq!(game.current_actor(), -1);
    }

    #[test]
    fn test_win_counter_keys() {
        let ttt = GameWrapper::TicTacToe(TicTacToeState::new());
        assert_eq!(ttt.win_counter_key(1), Some("tic-x-wins"));
        assert_eq!(ttt.win_counter_key(-1), Some("tic-o-wins"));

        let slider = GameWrapper::Slider(SliderState::new());
        assert_eq!(slider.win_counter_key(1), Some("gamesWon"));

        let hilo = GameWrapper::Hilo(HiloState::with_secret(5));
        assert_eq!(hilo.win_counter_key(1), None);
    }

    #[test]
    fn test_solve_only_for_slider() {
        let mut slider = GameWrapper::Slider(SliderState::new());
        assert!(slider.solve());
        assert_eq!(slider.status(), Status::Win(1));

        let mut ttt = GameWrapper::TicTacToe(TicTacToeState::new());
        assert!(!ttt.solve());
    }

    #[test]
    fn test_parse_move_per_game() {
        let game = GameWrapper::Game2048(Game2048State::with_seed(1));
        assert_eq!(
            game.parse_move("left").unwrap(),
            MoveWrapper::Game2048(Direction::Left)
        );
        assert!(game.parse_move("sideways").is_err());
    }
}
