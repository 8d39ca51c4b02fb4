use crate::{GameEngine, Status};
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// How many characters of the phrase are hidden each round.
pub const HIDDEN: usize = 3;

const PHRASES: [&str; 7] = [
    "the fat cats",
    "larger frogs",
    "banana cakes",
    "purple llama",
    "french toast",
    "hawaii pizza",
    "winter boots",
];

/// Types `ch` into the blank at `index` (a position in the phrase).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BlanksMove {
    pub index: usize,
    pub ch: char,
}

/// Fill-in-the-blanks: a random phrase with three hidden non-space
/// characters. Entries may be overwritten until all three are correct.
#[derive(Debug, Clone)]
pub struct BlanksState {
    phrase: String,
    /// Hidden character positions, ascending.
    missing: Vec<usize>,
    /// What the player typed into each hidden position.
    entries: Vec<Option<char>>,
}

impl BlanksState {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let phrase = PHRASES.choose(&mut rng).copied().unwrap_or(PHRASES[0]);
        let mut non_space: Vec<usize> = phrase
            .char_indices()
            .filter(|&(_, ch)| ch != ' ')
            .map(|(i, _)| i)
            .collect();
        non_space.shuffle(&mut rng);
        let mut missing: Vec<usize> = non_space.into_iter().take(HIDDEN).collect();
        missing.sort_unstable();
        Self::with_phrase(phrase, &missing)
    }

    /// A scripted round with the given phrase and hidden positions.
    pub fn with_phrase(phrase: &str, missing: &[usize]) -> Self {
        BlanksState {
            phrase: phrase.to_string(),
            missing: missing.to_vec(),
            entries: vec![None; missing.len()],
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn missing(&self) -> &[usize] {
        &self.missing
    }

    /// The player's entry for a hidden position, if typed yet.
    pub fn entry(&self, index: usize) -> Option<char> {
        let slot = self.missing.iter().position(|&m| m == index)?;
        self.entries[slot]
    }
}

impl Default for BlanksState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for BlanksState {
    type Move = BlanksMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        self.missing.contains(&mv.index) && mv.ch.is_ascii_alphabetic()
    }

    fn apply(&mut self, mv: &Self::Move) {
        if let Some(slot) = self.missing.iter().position(|&m| m == mv.index) {
            self.entries[slot] = Some(mv.ch.to_ascii_lowercase());
        }
    }

    fn status(&self) -> Status {
        let chars: Vec<char> = self.phrase.chars().collect();
        let all_correct = self
            .missing
            .iter()
            .zip(&self.entries)
            .all(|(&index, entry)| *entry == Some(chars[index]));
        if all_correct {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for BlanksState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.phrase.chars().enumerate() {
            if self.missing.contains(&i) {
                match self.entry(i) {
                    Some(typed) => write!(f, "[{}]", typed)?,
                    None => write!(f, "[_]")?,
                }
            } else {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for BlanksMove {
    type Err = String;

    /// `index=char`, e.g. `4=t`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, ch) = s
            .trim()
            .split_once('=')
            .ok_or_else(|| "expected format: index=char".to_string())?;
        let index = index.trim().parse::<usize>().map_err(|e| e.to_string())?;
        let mut chars = ch.trim().chars();
        let ch = chars.next().ok_or_else(|| "missing character".to_string())?;
        if chars.next().is_some() {
            return Err("type a single character".to_string());
        }
        Ok(BlanksMove { index, ch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> BlanksState {
        // "banana cakes" with 'a'(1), 'n'(4), 'c'(7) hidden
        BlanksState::with_phrase("banana cakes", &[1, 4, 7])
    }

    #[test]
    fn test_only_hidden_positions_are_legal() {
        let game = round();
        assert!(game.is_legal(&BlanksMove { index: 1, ch: 'a' }));
        assert!(!game.is_legal(&BlanksMove { index: 0, ch: 'b' }));
        assert!(!game.is_legal(&BlanksMove { index: 99, ch: 'x' }));
        assert!(!game.is_legal(&BlanksMove { index: 1, ch: '3' }));
    }

    #[test]
    fn test_all_correct_wins() {
        let mut game = round();
        game.apply(&BlanksMove { index: 1, ch: 'a' });
        game.apply(&BlanksMove { index: 4, ch: 'n' });
        assert_eq!(game.status(), Status::InProgress);
        game.apply(&BlanksMove { index: 7, ch: 'c' });
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_wrong_entries_stay_editable() {
        let mut game = round();
        game.apply(&BlanksMove { index: 1, ch: 'x' });
        game.apply(&BlanksMove { index: 4, ch: 'n' });
        game.apply(&BlanksMove { index: 7, ch: 'c' });
        assert_eq!(game.status(), Status::InProgress);

        // Overwrite the wrong letter.
        game.apply(&BlanksMove { index: 1, ch: 'A' });
        assert_eq!(game.status(), Status::Win(1));
    }

    #[test]
    fn test_generated_round_hides_three_non_spaces() {
        let game = BlanksState::new();
        assert_eq!(game.missing().len(), HIDDEN);
        let chars: Vec<char> = game.phrase().chars().collect();
        for &i in game.missing() {
            assert_ne!(chars[i], ' ');
        }
        let mut sorted = game.missing().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, game.missing());
    }

    #[test]
    fn test_parse_move() {
        let mv: BlanksMove = "4=t".parse().unwrap();
        assert_eq!(mv, BlanksMove { index: 4, ch: 't' });
        assert!("4".parse::<BlanksMove>().is_err());
        assert!("4=too".parse::<BlanksMove>().is_err());
    }
}
