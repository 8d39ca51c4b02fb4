//! # Memory Match
//!
//! 4x4 grid of face-down cards holding eight symbol pairs. Flipping two
//! equal cards locks them as matched; flipping two unequal cards leaves
//! them showing as a pending pair that the UI collaborator's scheduled
//! callback flips back down after its grace interval (see
//! [`crate::scheduler::schedule_flip_back`]). Further flips are illegal
//! while a pair is pending.

use crate::{GameEngine, Status};
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

pub const ROWS: usize = 4;
pub const COLS: usize = 4;
pub const PAIRS: usize = ROWS * COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// Symbol id in `0..PAIRS`; each id appears on exactly two cards.
    pub symbol: u8,
    pub face_up: bool,
    pub matched: bool,
}

/// Flat card index in `0..16`, row-major.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemoryMove(pub usize);

#[derive(Debug, Clone)]
pub struct MemoryState {
    cards: Vec<Card>,
    /// First card of the pair currently being flipped.
    first_pick: Option<usize>,
    /// A mismatched pair showing until the collaborator flips it back.
    pending: Option<(usize, usize)>,
    pairs_found: usize,
    /// Completed two-card flips.
    pair_moves: usize,
}

impl MemoryState {
    pub fn new() -> Self {
        let mut deck: Vec<u8> = (0..PAIRS as u8).chain(0..PAIRS as u8).collect();
        deck.shuffle(&mut rand::thread_rng());
        Self::with_deck(&deck)
    }

    /// A deck in the given order. For scripted rounds; `symbols` must hold
    /// each id in `0..PAIRS` exactly twice.
    pub fn with_deck(symbols: &[u8]) -> Self {
        MemoryState {
            cards: symbols
                .iter()
                .map(|&symbol| Card {
                    symbol,
                    face_up: false,
                    matched: false,
                })
                .collect(),
            first_pick: None,
            pending: None,
            pairs_found: 0,
            pair_moves: 0,
        }
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn pairs_found(&self) -> usize {
        self.pairs_found
    }

    pub fn pair_moves(&self) -> usize {
        self.pair_moves
    }

    /// The mismatched pair waiting on the flip-back callback, if any.
    pub fn pending_pair(&self) -> Option<(usize, usize)> {
        self.pending
    }

    /// Turns the pending mismatched pair face-down again. Invoked by the
    /// collaborator's timer, not by a move; a no-op when nothing pends.
    pub fn flip_back_pending(&mut self) {
        if let Some((a, b)) = self.pending.take() {
            self.cards[a].face_up = false;
            self.cards[b].face_up = false;
        }
    }
}

impl Default for MemoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for MemoryState {
    type Move = MemoryMove;

    fn is_legal(&self, mv: &Self::Move) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match self.cards.get(mv.0) {
            Some(card) => !card.face_up && !card.matched,
            None => false,
        }
    }

    fn apply(&mut self, mv: &Self::Move) {
        let index = mv.0;
        self.cards[index].face_up = true;

        match self.first_pick.take() {
            None => self.first_pick = Some(index),
            Some(first) => {
                self.pair_moves += 1;
                if self.cards[first].symbol == self.cards[index].symbol {
                    self.cards[first].matched = true;
                    self.cards[index].matched = true;
                    self.pairs_found += 1;
                } else {
                    self.pending = Some((first, index));
                }
            }
        }
    }

    fn status(&self) -> Status {
        if self.pairs_found == PAIRS {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..ROWS {
            for c in 0..COLS {
                let card = &self.cards[r * COLS + c];
                if card.face_up || card.matched {
                    write!(f, "{} ", (b'A' + card.symbol) as char)?;
                } else {
                    write!(f, "? ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for MemoryMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(MemoryMove(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_deck() -> MemoryState {
        // 0 0 1 1 / 2 2 3 3 / 4 4 5 5 / 6 6 7 7
        let symbols: Vec<u8> = (0..PAIRS as u8).flat_map(|s| [s, s]).collect();
        MemoryState::with_deck(&symbols)
    }

    #[test]
    fn test_matching_pair_locks() {
        let mut game = ordered_deck();
        game.apply(&MemoryMove(0));
        game.apply(&MemoryMove(1));

        assert!(game.card(0).unwrap().matched);
        assert!(game.card(1).unwrap().matched);
        assert_eq!(game.pairs_found(), 1);
        assert_eq!(game.pair_moves(), 1);
        assert!(game.pending_pair().is_none());
    }

    #[test]
    fn test_mismatch_pends_until_flip_back() {
        let mut game = ordered_deck();
        game.apply(&MemoryMove(0));
        game.apply(&MemoryMove(2));

        assert_eq!(game.pending_pair(), Some((0, 2)));
        assert!(game.card(0).unwrap().face_up);
        assert!(game.card(2).unwrap().face_up);
        // Every further flip is blocked while the pair shows.
        assert!(!game.is_legal(&MemoryMove(5)));

        game.flip_back_pending();
        assert!(!game.card(0).unwrap().face_up);
        assert!(!game.card(2).unwrap().face_up);
        assert!(game.is_legal(&MemoryMove(5)));
    }

    #[test]
    fn test_face_up_and_matched_cards_illegal() {
        let mut game = ordered_deck();
        game.apply(&MemoryMove(0));
        assert!(!game.is_legal(&MemoryMove(0)));
        game.apply(&MemoryMove(1));
        assert!(!game.is_legal(&MemoryMove(1)));
        assert!(!game.is_legal(&MemoryMove(16)));
    }

    #[test]
    fn test_win_after_all_pairs() {
        let mut game = ordered_deck();
        for pair in 0..PAIRS {
            game.apply(&MemoryMove(2 * pair));
            game.apply(&MemoryMove(2 * pair + 1));
        }
        assert_eq!(game.status(), Status::Win(1));
        assert_eq!(game.pair_moves(), PAIRS);
    }

    #[test]
    fn test_shuffled_deck_holds_eight_pairs() {
        let game = MemoryState::new();
        let mut counts = [0usize; PAIRS];
        for i in 0..ROWS * COLS {
            counts[game.card(i).unwrap().symbol as usize] += 1;
        }
        assert!(counts.iter().all(|&n| n == 2));
    }
}
