//! Word lists for the word-guessing game.

use crate::Difficulty;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

const EASY: &[&str] = &["cat", "dog", "run", "jump", "play"];
const MEDIUM: &[&str] = &["python", "javascript", "react", "coding", "developer"];
const HARD: &[&str] = &[
    "extraordinary",
    "programming",
    "development",
    "optimization",
    "algorithm",
];

/// Returns the word list for a difficulty tier.
pub fn word_list(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => EASY,
        Difficulty::Medium => MEDIUM,
        Difficulty::Hard => HARD,
    }
}

/// Picks one word uniformly at random from the tier's list, lowercased.
#[instrument(skip(rng))]
pub fn select_word<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> String {
    let word = word_list(difficulty)
        .choose(rng)
        .map(|w| w.to_lowercase())
        .unwrap_or_default();
    debug!(len = word.len(), "Selected secret word");
    word
}
