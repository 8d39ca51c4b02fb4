use crate::{GameEngine, Status};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const MIN: i32 = 1;
pub const MAX: i32 = 100;
pub const MAX_GUESSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    TooLow,
    TooHigh,
    Correct,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HiloMove(pub i32);

/// Guess a secret number from 1 to 100 in ten tries, with higher/lower
/// feedback after each guess.
#[derive(Debug, Clone)]
pub struct HiloState {
    secret: i32,
    history: Vec<(i32, Hint)>,
}

impl HiloState {
    pub fn new() -> Self {
        Self::with_secret(rand::thread_rng().gen_range(MIN..=MAX))
    }

    pub fn with_secret(secret: i32) -> Self {
        HiloState {
            secret,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[(i32, Hint)] {
        &self.history
    }

    pub fn guesses_left(&self) -> usize {
        MAX_GUESSES - self.history.len()
    }

    fn won(&self) -> bool {
        self.history
            .last()
            .is_some_and(|&(_, hint)| hint == Hint::Correct)
    }
}

impl Default for HiloState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for HiloState {
    type Move = HiloMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        (MIN..=MAX).contains(&mv.0) && self.history.len() < MAX_GUESSES
    }

    fn apply(&mut self, mv: &Self::Move) {
        let hint = match mv.0.cmp(&self.secret) {
            std::cmp::Ordering::Less => Hint::TooLow,
            std::cmp::Ordering::Greater => Hint::TooHigh,
            std::cmp::Ordering::Equal => Hint::Correct,
        };
        self.history.push((mv.0, hint));
    }

    fn status(&self) -> Status {
        if self.won() {
            Status::Win(1)
        } else if self.history.len() == MAX_GUESSES {
            Status::Loss
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for HiloState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (guess, hint)) in self.history.iter().enumerate() {
            let text = match hint {
                Hint::TooLow => "too low",
                Hint::TooHigh => "too high",
                Hint::Correct => "correct",
            };
            writeln!(f, "guess {}: {} ({})", i + 1, guess, text)?;
        }
        write!(f, "guesses left: {}", self.guesses_left())
    }
}

impl FromStr for HiloMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.trim().parse::<i32>().map_err(|e| e.to_string())?;
        Ok(HiloMove(n))
    }
}
