//! Word-guessing rules.

use super::{Outcome, Rejection};
use derive_getters::Getters;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Wrong guesses allowed before the round is lost.
pub const MAX_MISTAKES: u8 = 6;

/// One word-guessing round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct HangmanRound {
    /// The secret word, lowercase.
    word: String,
    /// Every letter guessed so far.
    guessed: BTreeSet<char>,
    /// Guesses not in the word.
    mistakes: u8,
    /// Round status.
    outcome: Outcome,
}

impl HangmanRound {
    /// Starts a round around `word`.
    pub fn new(word: String) -> Self {
        Self {
            word,
            guessed: BTreeSet::new(),
            mistakes: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Guesses a letter. Uppercase input is folded to lowercase.
    ///
    /// # Errors
    ///
    /// Rejects non-letters, repeated letters, and any guess after the round ended.
    #[instrument(skip(self), fields(mistakes = self.mistakes))]
    pub fn guess(&mut self, letter: char) -> Result<(), Rejection> {
        if self.outcome.is_terminal() {
            return Err(Rejection::RoundOver);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(Rejection::NotALetter(letter));
        }
        let letter = letter.to_ascii_lowercase();
        if self.guessed.contains(&letter) {
            return Err(Rejection::AlreadyGuessed(letter));
        }

        self.guessed.insert(letter);

        if !self.word.contains(letter) {
            self.mistakes += 1;
            debug!(mistakes = self.mistakes, "Wrong guess");
            if self.mistakes >= MAX_MISTAKES {
                info!(word = %self.word, "Out of guesses");
                self.outcome = Outcome::Lost;
            }
        } else if self.is_solved() {
            info!(word = %self.word, mistakes = self.mistakes, "Word solved");
            self.outcome = Outcome::Won;
        }
        Ok(())
    }

    /// Returns true once every letter of the word has been guessed.
    pub fn is_solved(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }

    /// The word with unguessed letters hidden.
    pub fn masked(&self) -> Vec<Option<char>> {
        self.word
            .chars()
            .map(|c| self.guessed.contains(&c).then_some(c))
            .collect()
    }

    /// Wrong guesses left before the round is lost.
    pub fn remaining(&self) -> u8 {
        MAX_MISTAKES.saturating_sub(self.mistakes)
    }
}
