//! Rock paper scissors.

use super::Outcome;
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A hand. Rock beats scissors, scissors beat paper, paper beats rock.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Hand {
    /// Rock.
    Rock,
    /// Paper.
    Paper,
    /// Scissors.
    Scissors,
}

impl Hand {
    /// All hands, in display order.
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// The hand this one defeats.
    pub fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Scissors => Hand::Paper,
            Hand::Paper => Hand::Rock,
        }
    }
}

/// Outcome of `player` against `opponent`, from the player's side.
pub fn judge(player: Hand, opponent: Hand) -> Outcome {
    if player == opponent {
        Outcome::Draw
    } else if player.beats() == opponent {
        Outcome::Won
    } else {
        Outcome::Lost
    }
}

/// A single throw and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct Throw {
    /// The player's hand.
    player: Hand,
    /// The opponent's random hand.
    opponent: Hand,
    /// Result from the player's side.
    outcome: Outcome,
}

/// Hand-game state: only the last throw is kept.
///
/// The round never ends: each throw is judged on its own and kept in
/// [`HandRound::last`], and the next throw is always accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Getters)]
pub struct HandRound {
    /// The most recent throw.
    last: Option<Throw>,
}

impl HandRound {
    /// Creates a round with no throw yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Throws `player` against a uniformly random opponent hand.
    #[instrument(skip(self, rng))]
    pub fn throw<R: Rng + ?Sized>(&mut self, player: Hand, rng: &mut R) -> Throw {
        let opponent = Hand::ALL[rng.random_range(0..Hand::ALL.len())];
        let throw = Throw {
            player,
            opponent,
            outcome: judge(player, opponent),
        };
        info!(%player, %opponent, outcome = %throw.outcome, "Hands thrown");
        self.last = Some(throw);
        throw
    }

    /// Always `InProgress`. The result of a throw lives in [`Throw::outcome`].
    pub fn outcome(&self) -> Outcome {
        Outcome::InProgress
    }
}
