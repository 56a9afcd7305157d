//! Per-game rule sets behind one round type.
//!
//! Every game exposes the same shape: a round is started from selected
//! content, moves are validated then applied, and the round settles into a
//! terminal [`Outcome`] at most once. Rule tables (win lines, mistake limit,
//! the hand cycle) live next to each rule set as data.

mod board;
mod hand;
mod hangman;
mod memory;
mod quiz;

pub use board::{BoardRound, Mark, WIN_LINES, winning_line};
pub use hand::{Hand, HandRound, Throw, judge};
pub use hangman::{HangmanRound, MAX_MISTAKES};
pub use memory::{MemoryRound, REVERT_DELAY};
pub use quiz::QuizRound;

use crate::content::{Content, select_content};
use crate::{Difficulty, GameKind};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

/// Round status. Everything except `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Outcome {
    /// Moves are still accepted.
    InProgress,
    /// The player won.
    Won,
    /// The player lost.
    Lost,
    /// Neither side won.
    Draw,
    /// The quiz ran out of questions.
    Completed,
}

impl Outcome {
    /// Returns true once no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// A player input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    /// Word guessing: guess a letter.
    Guess(char),
    /// Tic-tac-toe: place the next mark on a cell (0-8, row-major).
    Place(usize),
    /// Memory: flip a card by instance id.
    Flip(usize),
    /// Hand game: throw a hand.
    Throw(Hand),
    /// Quiz: select an option of the current question.
    Select(usize),
    /// Quiz: lock in the selection and move on.
    Advance,
}

impl Move {
    /// The game this move belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Move::Guess(_) => GameKind::Hangman,
            Move::Place(_) => GameKind::TicTacToe,
            Move::Flip(_) => GameKind::Memory,
            Move::Throw(_) => GameKind::RockPaperScissors,
            Move::Select(_) | Move::Advance => GameKind::Quiz,
        }
    }
}

/// Why a move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Rejection {
    /// The round already reached a terminal outcome.
    #[display("Round is already over")]
    RoundOver,

    /// The move is meant for another game than the one being played.
    #[display("Move does not belong to {}", _0)]
    WrongGame(GameKind),

    /// Guess was not an ASCII letter.
    #[display("{:?} is not a letter", _0)]
    NotALetter(char),

    /// Letter was guessed earlier this round.
    #[display("Letter '{}' was already guessed", _0)]
    AlreadyGuessed(char),

    /// Cell index outside the board.
    #[display("Cell {} is off the board", _0)]
    OffBoard(usize),

    /// Cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// No card with this instance id.
    #[display("No card {}", _0)]
    UnknownCard(usize),

    /// Card's pair has been matched.
    #[display("Card {} is already matched", _0)]
    AlreadyMatched(usize),

    /// Card is one of the currently flipped cards.
    #[display("Card {} is already face up", _0)]
    AlreadyFlipped(usize),

    /// Two cards are face up and waiting to turn back.
    #[display("Two cards are already face up")]
    PairPending,

    /// Option index outside the current question.
    #[display("No option {}", _0)]
    UnknownOption(usize),

    /// Advance requested with nothing selected.
    #[display("No option selected")]
    NothingSelected,
}

/// Result of submitting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The move changed the round.
    Applied,
    /// The move was ignored; nothing changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Returns true if the move was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }
}

/// Authoritative state of the current round, one variant per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RoundState {
    /// Word guessing.
    Hangman(HangmanRound),
    /// Tic-tac-toe.
    TicTacToe(BoardRound),
    /// Memory matching.
    Memory(MemoryRound),
    /// Rock paper scissors.
    RockPaperScissors(HandRound),
    /// Quiz.
    Quiz(QuizRound),
}

impl RoundState {
    /// Starts a fresh round, selecting its content.
    #[instrument(skip(rng))]
    pub fn start<R: Rng + ?Sized>(kind: GameKind, difficulty: Difficulty, rng: &mut R) -> Self {
        match (kind, select_content(kind, difficulty, rng)) {
            (GameKind::Hangman, Content::Word(word)) => Self::Hangman(HangmanRound::new(word)),
            (GameKind::Memory, Content::Deck(deck)) => Self::Memory(MemoryRound::new(deck)),
            (GameKind::Quiz, Content::Questions(questions)) => {
                Self::Quiz(QuizRound::new(questions))
            }
            (GameKind::TicTacToe, _) => Self::TicTacToe(BoardRound::new()),
            (GameKind::RockPaperScissors, _) => Self::RockPaperScissors(HandRound::new()),
            (kind, content) => {
                // select_content always pairs kinds with their content
                debug!(%kind, ?content, "Unexpected content, starting empty round");
                Self::empty(kind)
            }
        }
    }

    fn empty(kind: GameKind) -> Self {
        match kind {
            GameKind::Hangman => Self::Hangman(HangmanRound::new(String::new())),
            GameKind::TicTacToe => Self::TicTacToe(BoardRound::new()),
            GameKind::Memory => Self::Memory(MemoryRound::new(Vec::new())),
            GameKind::RockPaperScissors => Self::RockPaperScissors(HandRound::new()),
            GameKind::Quiz => Self::Quiz(QuizRound::new(&[])),
        }
    }

    /// The game this round belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Hangman(_) => GameKind::Hangman,
            Self::TicTacToe(_) => GameKind::TicTacToe,
            Self::Memory(_) => GameKind::Memory,
            Self::RockPaperScissors(_) => GameKind::RockPaperScissors,
            Self::Quiz(_) => GameKind::Quiz,
        }
    }

    /// Current outcome of the round.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Hangman(r) => *r.outcome(),
            Self::TicTacToe(r) => *r.outcome(),
            Self::Memory(r) => *r.outcome(),
            Self::RockPaperScissors(r) => r.outcome(),
            Self::Quiz(r) => *r.outcome(),
        }
    }

    /// Validates and applies a move.
    ///
    /// Returns `Some(outcome)` when this move ended the round. A hand-game
    /// throw returns its own result every time while the round itself stays
    /// `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when the move is invalid; the round is untouched.
    #[instrument(skip(self, rng), fields(kind = %self.kind()))]
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        mv: Move,
        rng: &mut R,
    ) -> Result<Option<Outcome>, Rejection> {
        if mv.kind() != self.kind() {
            return Err(Rejection::WrongGame(self.kind()));
        }

        let before = self.outcome();
        match (&mut *self, mv) {
            (Self::Hangman(r), Move::Guess(letter)) => r.guess(letter)?,
            (Self::TicTacToe(r), Move::Place(cell)) => r.place(cell)?,
            (Self::Memory(r), Move::Flip(id)) => r.flip(id)?,
            (Self::RockPaperScissors(r), Move::Throw(hand)) => {
                let throw = r.throw(hand, rng);
                return Ok(Some(*throw.outcome()));
            }
            (Self::Quiz(r), Move::Select(option)) => r.select(option)?,
            (Self::Quiz(r), Move::Advance) => r.advance()?,
            (round, _) => return Err(Rejection::WrongGame(round.kind())),
        }

        let after = self.outcome();
        Ok((!before.is_terminal() && after.is_terminal()).then_some(after))
    }

    /// Word-guessing round, if this is one.
    pub fn as_hangman(&self) -> Option<&HangmanRound> {
        match self {
            Self::Hangman(r) => Some(r),
            _ => None,
        }
    }

    /// Tic-tac-toe round, if this is one.
    pub fn as_board(&self) -> Option<&BoardRound> {
        match self {
            Self::TicTacToe(r) => Some(r),
            _ => None,
        }
    }

    /// Memory round, if this is one.
    pub fn as_memory(&self) -> Option<&MemoryRound> {
        match self {
            Self::Memory(r) => Some(r),
            _ => None,
        }
    }

    pub(crate) fn as_memory_mut(&mut self) -> Option<&mut MemoryRound> {
        match self {
            Self::Memory(r) => Some(r),
            _ => None,
        }
    }

    /// Hand-game round, if this is one.
    pub fn as_hand(&self) -> Option<&HandRound> {
        match self {
            Self::RockPaperScissors(r) => Some(r),
            _ => None,
        }
    }

    /// Quiz round, if this is one.
    pub fn as_quiz(&self) -> Option<&QuizRound> {
        match self {
            Self::Quiz(r) => Some(r),
            _ => None,
        }
    }
}
