use crate::{GameEngine, Status};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Scissors,
    Paper,
    Rock,
}

impl Choice {
    fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Rock, Choice::Scissors)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub user: Choice,
    pub computer: Choice,
    /// `Win(1)` for the user, `Win(-1)` for the computer, `Draw` on a tie.
    pub outcome: Status,
}

/// One round of rock-paper-scissors against a computer opponent, with
/// running score totals. The round resolves immediately; `rematch` keeps
/// the totals and `fresh` zeroes them.
#[derive(Debug, Clone)]
pub struct RpsState {
    user_score: u32,
    computer_score: u32,
    round: Option<Round>,
    /// The computer's throw comes from here, so resolving a round is a
    /// pure function of the state snapshot.
    rng: Xoshiro256PlusPlus,
}

impl RpsState {
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    pub fn with_seed(seed: u64) -> Self {
        RpsState {
            user_score: 0,
            computer_score: 0,
            round: None,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.user_score, self.computer_score)
    }

    pub fn round(&self) -> Option<Round> {
        self.round
    }
}

impl Default for RpsState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for RpsState {
    type Move = Choice;

    /// One throw per round; the round must be cleared before the next.
    fn is_legal(&self, _mv: &Self::Move) -> bool {
        self.round.is_none()
    }

    fn apply(&mut self, mv: &Self::Move) {
        let computer = match self.rng.gen_range(0..3) {
            0 => Choice::Scissors,
            1 => Choice::Paper,
            _ => Choice::Rock,
        };
        let outcome = if *mv == computer {
            Status::Draw
        } else if mv.beats(computer) {
            self.user_score += 1;
            Status::Win(1)
        } else {
            self.computer_score += 1;
            Status::Win(-1)
        };
        self.round = Some(Round {
            user: *mv,
            computer,
            outcome,
        });
    }

    fn status(&self) -> Status {
        match self.round {
            Some(round) => round.outcome,
            None => Status::InProgress,
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }

    /// Play-again clears the round but keeps the score totals.
    fn rematch(&self) -> Self {
        RpsState {
            user_score: self.user_score,
            computer_score: self.computer_score,
            round: None,
            rng: self.rng.clone(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Choice::Scissors => "scissors",
            Choice::Paper => "paper",
            Choice::Rock => "rock",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for RpsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "you {} - {} computer", self.user_score, self.computer_score)?;
        if let Some(round) = self.round {
            write!(f, "you threw {}, computer threw {}", round.user, round.computer)?;
        }
        Ok(())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scissors" | "s" => Ok(Choice::Scissors),
            "paper" | "p" => Ok(Choice::Paper),
            "rock" | "r" => Ok(Choice::Rock),
            other => Err(format!("unknown choice: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_table() {
        assert!(Choice::Scissors.beats(Choice::Paper));
        assert!(Choice::Paper.beats(Choice::Rock));
        assert!(Choice::Rock.beats(Choice::Scissors));
        assert!(!Choice::Paper.beats(Choice::Scissors));
        assert!(!Choice::Rock.beats(Choice::Rock));
    }

    #[test]
    fn test_round_resolves_and_blocks_further_throws() {
        let mut game = RpsState::with_seed(3);
        assert!(game.is_legal(&Choice::Rock));
        game.apply(&Choice::Rock);

        let round = game.round().expect("round resolved");
        assert_eq!(round.user, Choice::Rock);
        assert!(game.status().is_terminal());
        assert!(!game.is_legal(&Choice::Paper));
    }

    #[test]
    fn test_scores_track_outcomes() {
        let mut game = RpsState::with_seed(7);
        game.apply(&Choice::Rock);
        let (user, computer) = game.scores();
        match game.status() {
            Status::Win(1) => assert_eq!((user, computer), (1, 0)),
            Status::Win(-1) => assert_eq!((user, computer), (0, 1)),
            Status::Draw => assert_eq!((user, computer), (0, 0)),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_rematch_keeps_scores_fresh_clears_them() {
        let mut game = RpsState::with_seed(7);
        // Throw until somebody scores.
        loop {
            game.apply(&Choice::Rock);
            if game.scores() != (0, 0) {
                break;
            }
            game = game.rematch();
        }

        let scores = game.scores();
        let rematch = game.rematch();
        assert_eq!(rematch.scores(), scores);
        assert!(rematch.round().is_none());
        assert_eq!(rematch.status(), Status::InProgress);

        let fresh = game.fresh();
        assert_eq!(fresh.scores(), (0, 0));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let mut a = RpsState::with_seed(11);
        let mut b = RpsState::with_seed(11);
        a.apply(&Choice::Paper);
        b.apply(&Choice::Paper);
        assert_eq!(a.round(), b.round());
    }
}
