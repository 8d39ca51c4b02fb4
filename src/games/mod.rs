//! # Game Engine Implementations
//!
//! This module contains the rule engines for all supported games. Each
//! engine implements the [`GameEngine`](crate::GameEngine) trait to provide
//! a consistent interface for the session controller and any UI collaborator.
//!
//! ## Supported games
//! - **Tic-Tac-Toe**: 3x3 line game for 2 players, eight win lines
//! - **Connect Four**: gravity-based connection game on a 6x7 grid for 2 players
//! - **Minesweeper**: 9x9 reveal/flag puzzle with flood reveal, 10 mines
//! - **2048**: 4x4 sliding merge puzzle with random tile spawns
//! - **Lights On**: 5x5 cross-toggle puzzle, win with every light off
//! - **Memory**: 4x4 pair-matching card grid with a delayed flip-back
//! - **Slider**: 3x3 sliding tile puzzle with a solve shortcut
//! - **Tetro**: falling-block game on a 12x10 well, win at five full rows
//! - **Word Guess**: five attempts at a hidden four-letter word
//! - **Blanks**: fill three hidden letters of a phrase
//! - **Hi-Lo**: guess a number from 1 to 100 in ten tries
//! - **Rock-Paper-Scissors**: single-round duel with running scores
//!
//! ## Adding a new game
//! Create a new module and implement:
//! 1. A move type (typically a tuple struct of coordinates or an enum)
//! 2. A state type with the `GameEngine` trait
//! 3. Display and parsing implementations for state and moves
//! 4. Game-specific rules and terminal conditions

pub mod blanks;
pub mod connect4;
pub mod game2048;
pub mod hilo;
pub mod lightson;
pub mod memory;
pub mod minesweeper;
pub mod rps;
pub mod slider;
pub mod tetro;
pub mod tictactoe;
pub mod wordguess;

/// A shift direction shared by the direction-driven games (2048, the
/// sliding puzzle's arrow controls, tetro's horizontal moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" => Ok(Direction::Up),
            "down" | "d" | "s" => Ok(Direction::Down),
            "left" | "l" | "a" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}
