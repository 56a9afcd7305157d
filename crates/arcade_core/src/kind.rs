//! Game variants and difficulty tiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// The five games the arcade knows how to run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GameKind {
    /// Guess the secret word one letter at a time.
    Hangman,
    /// Two marks on a 3x3 board, three in a row wins.
    TicTacToe,
    /// Flip cards two at a time and match the pairs.
    Memory,
    /// One throw against a random opponent.
    RockPaperScissors,
    /// Fixed multiple-choice question bank.
    Quiz,
}

impl GameKind {
    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Hangman => "Hangman",
            Self::TicTacToe => "Tic Tac Toe",
            Self::Memory => "Memory Cards",
            Self::RockPaperScissors => "Rock Paper Scissors",
            Self::Quiz => "Quiz Game",
        }
    }

    /// Storage key holding this game's best records, if it keeps any.
    ///
    /// The memory game owns the historical `bestScore` key; word guessing
    /// keeps its own slot next to it.
    #[instrument]
    pub fn best_score_key(self) -> Option<&'static str> {
        match self {
            Self::Memory => Some("bestScore"),
            Self::Hangman => Some("bestScore.hangman"),
            Self::TicTacToe | Self::RockPaperScissors | Self::Quiz => None,
        }
    }

    /// Whether rounds of this game run the elapsed-seconds timer.
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Memory)
    }
}

/// Difficulty tier: selects the content pool and the best-record slot.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Short words, small grid.
    Easy,
    /// The starting tier.
    #[default]
    Medium,
    /// Long words, large grid.
    Hard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GameKind::iter() {
            assert_eq!(GameKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert_eq!(GameKind::from_str("Tic-Tac-Toe").unwrap(), GameKind::TicTacToe);
    }

    #[test]
    fn test_only_memory_is_timed() {
        let timed: Vec<_> = GameKind::iter().filter(|k| k.is_timed()).collect();
        assert_eq!(timed, vec![GameKind::Memory]);
    }

    #[test]
    fn test_difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::from_str("HARD").unwrap(), Difficulty::Hard);
    }
}
