//! Memory matching rules.
//!
//! Flips are two-phase. The first flip turns a card face up; the second
//! counts a move and compares pair identity. A match is settled at once.
//! A mismatch leaves both cards face up until the owner of the round calls
//! [`MemoryRound::revert`], which the session schedules [`REVERT_DELAY`]
//! later. Until then every flip is rejected.

use super::{Outcome, Rejection};
use crate::content::Card;
use derive_getters::Getters;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How long a mismatched pair stays face up.
pub const REVERT_DELAY: Duration = Duration::from_secs(1);

/// One memory round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MemoryRound {
    /// The dealt deck, indexed by instance id.
    cards: Vec<Card>,
    /// Instance ids currently face up and unmatched (at most two).
    flipped: Vec<usize>,
    /// Pair identities matched so far, in order.
    matched_pairs: Vec<u8>,
    /// Completed flip pairs.
    moves: u32,
    /// Round status.
    outcome: Outcome,
}

impl MemoryRound {
    /// Starts a round on a dealt deck.
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            flipped: Vec::with_capacity(2),
            matched_pairs: Vec::new(),
            moves: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Flips the card with instance id `id`.
    ///
    /// # Errors
    ///
    /// Rejects unknown cards, matched cards, cards already face up, any flip
    /// while a mismatched pair is showing, and flips after the round ended.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn flip(&mut self, id: usize) -> Result<(), Rejection> {
        if self.outcome.is_terminal() {
            return Err(Rejection::RoundOver);
        }
        if self.flipped.len() == 2 {
            return Err(Rejection::PairPending);
        }
        if self.flipped.contains(&id) {
            return Err(Rejection::AlreadyFlipped(id));
        }
        let card = *self.cards.get(id).ok_or(Rejection::UnknownCard(id))?;
        if self.matched_pairs.contains(card.pair_id()) {
            return Err(Rejection::AlreadyMatched(id));
        }

        self.flipped.push(id);
        if self.flipped.len() < 2 {
            return Ok(());
        }

        self.moves += 1;
        let first = self.cards[self.flipped[0]];
        if first.pair_id() == card.pair_id() {
            self.matched_pairs.push(*card.pair_id());
            self.flipped.clear();
            debug!(pair = card.pair_id(), matched = self.matched_pairs.len(), "Pair matched");

            if self.matched_pairs.len() == self.pair_count() {
                info!(moves = self.moves, "All pairs matched");
                self.outcome = Outcome::Won;
            }
        } else {
            debug!(first = first.pair_id(), second = card.pair_id(), "Mismatch");
        }
        Ok(())
    }

    /// Returns true while a mismatched pair is face up.
    pub fn awaiting_revert(&self) -> bool {
        self.flipped.len() == 2
    }

    /// Turns a mismatched pair face down. Returns false if there was none.
    #[instrument(skip(self))]
    pub fn revert(&mut self) -> bool {
        if !self.awaiting_revert() {
            return false;
        }
        debug!(cards = ?self.flipped, "Turning pair face down");
        self.flipped.clear();
        true
    }

    /// Number of distinct pairs in the deck.
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Whether a card should be shown face up.
    pub fn is_face_up(&self, id: usize) -> bool {
        self.flipped.contains(&id)
            || self
                .cards
                .get(id)
                .is_some_and(|card| self.matched_pairs.contains(card.pair_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;
    use crate::content::deal_deck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn round() -> MemoryRound {
        MemoryRound::new(deal_deck(&mut StdRng::seed_from_u64(21), Difficulty::Easy))
    }

    /// Instance ids of both copies of each pair.
    fn pairs(round: &MemoryRound) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for a in round.cards() {
            for b in round.cards() {
                if a.instance_id() < b.instance_id() && a.pair_id() == b.pair_id() {
                    out.push((*a.instance_id(), *b.instance_id()));
                }
            }
        }
        out
    }

    fn mismatched(round: &MemoryRound) -> (usize, usize) {
        let cards = round.cards();
        let other = cards
            .iter()
            .find(|c| c.pair_id() != cards[0].pair_id())
            .unwrap();
        (0, *other.instance_id())
    }

    #[test]
    fn test_match_settles_immediately() {
        let mut round = round();
        let (a, b) = pairs(&round)[0];
        round.flip(a).unwrap();
        round.flip(b).unwrap();
        assert!(round.flipped().is_empty());
        assert_eq!(round.matched_pairs().len(), 1);
        assert_eq!(*round.moves(), 1);
        assert!(!round.awaiting_revert());
    }

    #[test]
    fn test_mismatch_waits_for_revert() {
        let mut round = round();
        let (a, b) = mismatched(&round);
        round.flip(a).unwrap();
        round.flip(b).unwrap();
        assert!(round.awaiting_revert());
        assert!(round.matched_pairs().is_empty());

        let third = pairs(&round)
            .into_iter()
            .flat_map(|(x, y)| [x, y])
            .find(|id| *id != a && *id != b)
            .unwrap();
        assert_eq!(round.flip(third), Err(Rejection::PairPending));

        assert!(round.revert());
        assert!(round.flipped().is_empty());
        assert!(!round.revert());
    }

    #[test]
    fn test_same_card_twice_rejected() {
        let mut round = round();
        round.flip(0).unwrap();
        assert_eq!(round.flip(0), Err(Rejection::AlreadyFlipped(0)));
        assert_eq!(*round.moves(), 0);
    }

    #[test]
    fn test_matched_card_rejected() {
        let mut round = round();
        let (a, b) = pairs(&round)[0];
        round.flip(a).unwrap();
        round.flip(b).unwrap();
        let before = round.clone();
        assert_eq!(round.flip(a), Err(Rejection::AlreadyMatched(a)));
        assert_eq!(round, before);
    }

    #[test]
    fn test_unknown_card_rejected() {
        let mut round = round();
        assert_eq!(round.flip(99), Err(Rejection::UnknownCard(99)));
    }

    #[test]
    fn test_all_pairs_win() {
        let mut round = round();
        for (a, b) in pairs(&round) {
            round.flip(a).unwrap();
            round.flip(b).unwrap();
        }
        assert_eq!(*round.outcome(), Outcome::Won);
        assert_eq!(*round.moves(), 4);
        assert!((0..8).all(|id| round.is_face_up(id)));
        assert_eq!(round.flip(0), Err(Rejection::RoundOver));
    }
}
