//! Round content selection.
//!
//! Each round draws its content once, when it starts: a secret word, a
//! shuffled deck or the question bank. Tic-tac-toe and the hand game need
//! nothing. Randomness is always injected so seeded runs are reproducible.

mod cards;
mod quiz;
mod words;

pub use cards::{Card, CardFace, IMAGE_POOL, deal_deck, grid_size};
pub use quiz::{QUESTION_BANK, Question};
pub use words::{select_word, word_list};

use crate::{Difficulty, GameKind};
use rand::Rng;
use tracing::instrument;

/// Content for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Secret word for word guessing.
    Word(String),
    /// Shuffled deck for the memory game.
    Deck(Vec<Card>),
    /// Question list for the quiz.
    Questions(&'static [Question]),
    /// No precomputed content.
    Empty,
}

/// Selects the content for a fresh round of `kind`.
#[instrument(skip(rng))]
pub fn select_content<R: Rng + ?Sized>(
    kind: GameKind,
    difficulty: Difficulty,
    rng: &mut R,
) -> Content {
    match kind {
        GameKind::Hangman => Content::Word(select_word(rng, difficulty)),
        GameKind::Memory => Content::Deck(deal_deck(rng, difficulty)),
        GameKind::Quiz => Content::Questions(QUESTION_BANK),
        GameKind::TicTacToe | GameKind::RockPaperScissors => Content::Empty,
    }
}
