use crate::{GameEngine, Status};
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

pub const WORD_LEN: usize = 4;
pub const MAX_GUESSES: usize = 5;

const WORDS: [&str; 6] = ["bear", "coal", "tide", "arch", "dish", "moss"];

/// Per-letter feedback on a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterMark {
    /// Right letter, right position.
    Correct,
    /// Letter occurs elsewhere in the word.
    Present,
    Absent,
}

/// A full four-letter guess.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WordGuessMove(pub String);

/// Guess a hidden four-letter word in five attempts, with per-letter
/// feedback after each row.
#[derive(Debug, Clone)]
pub struct WordGuessState {
    secret: String,
    rows: Vec<Vec<(char, LetterMark)>>,
}

impl WordGuessState {
    pub fn new() -> Self {
        let secret = WORDS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(WORDS[0]);
        Self::with_secret(secret)
    }

    pub fn with_secret(secret: &str) -> Self {
        WordGuessState {
            secret: secret.to_ascii_lowercase(),
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Vec<(char, LetterMark)>] {
        &self.rows
    }

    pub fn guesses_left(&self) -> usize {
        MAX_GUESSES - self.rows.len()
    }

    fn row_is_win(row: &[(char, LetterMark)]) -> bool {
        row.iter().all(|&(_, mark)| mark == LetterMark::Correct)
    }
}

impl Default for WordGuessState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for WordGuessState {
    type Move = WordGuessMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        mv.0.chars().count() == WORD_LEN
            && mv.0.chars().all(|ch| ch.is_ascii_alphabetic())
            && self.rows.len() < MAX_GUESSES
    }

    fn apply(&mut self, mv: &Self::Move) {
        let guess = mv.0.to_ascii_lowercase();
        let secret: Vec<char> = self.secret.chars().collect();
        let row = guess
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let mark = if secret[i] == ch {
                    LetterMark::Correct
                } else if secret.contains(&ch) {
                    LetterMark::Present
                } else {
                    LetterMark::Absent
                };
                (ch, mark)
            })
            .collect();
        self.rows.push(row);
    }

    fn status(&self) -> Status {
        if self.rows.iter().any(|row| Self::row_is_win(row)) {
            Status::Win(1)
        } else if self.rows.len() == MAX_GUESSES {
            Status::Loss
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for WordGuessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &(ch, mark) in row {
                let tag = match mark {
                    LetterMark::Correct => '+',
                    LetterMark::Present => '~',
                    LetterMark::Absent => '-',
                };
                write!(f, "{}{} ", ch, tag)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for WordGuessMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        if word.chars().count() != WORD_LEN {
            return Err(format!("guess must be {WORD_LEN} letters"));
        }
        Ok(WordGuessMove(word.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_guess_wins() {
        let mut game = WordGuessState::with_secret("tide");
        game.apply(&WordGuessMove("tide".into()));
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_letter_marks() {
        let mut game = WordGuessState::with_secret("bear");
        game.apply(&WordGuessMove("brag".into()));

        let row = &game.rows()[0];
        assert_eq!(row[0], ('b', LetterMark::Correct));
        assert_eq!(row[1], ('r', LetterMark::Present));
        assert_eq!(row[2], ('a', LetterMark::Correct));
        assert_eq!(row[3], ('g', LetterMark::Absent));
    }

    #[test]
    fn test_uppercase_guess_normalized() {
        let mut game = WordGuessState::with_secret("coal");
        game.apply(&WordGuessMove("COAL".into()));
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_loss_after_five_wrong_rows() {
        let mut game = WordGuessState::with_secret("moss");
        for _ in 0..MAX_GUESSES {
            game.apply(&WordGuessMove("dish".into()));
        }
        assert_eq!(game.status(), Status::Loss);
        assert!(!game.is_legal(&WordGuessMove("moss".into())));
    }

    #[test]
    fn test_malformed_guesses_illegal() {
        let game = WordGuessState::with_secret("arch");
        assert!(!game.is_legal(&WordGuessMove("arc".into())));
        assert!(!game.is_legal(&WordGuessMove("a1ch".into())));
        assert!(game.is_legal(&WordGuessMove("cash".into())));
    }

    #[test]
    fn test_guesses_left_counts_down() {
        let mut game = WordGuessState::with_secret("arch");
        assert_eq!(game.guesses_left(), 5);
        game.apply(&WordGuessMove("dish".into()));
        assert_eq!(game.guesses_left(), 4);
    }
}
