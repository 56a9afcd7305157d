//! Pocket Arcade core - five small games behind one session type
//!
//! Each game is a deterministic state machine: content is drawn from an
//! injected random source, moves are validated before they touch the round,
//! and deferred work (the memory timer and mismatch reverts) runs on a
//! logical clock the caller drives.
//!
//! # Architecture
//!
//! - **Content**: word lists, the card pool and the question bank
//! - **Games**: per-variant rules behind [`RoundState`]
//! - **Scheduler**: cancellable deferred actions and the [`RoundTimer`]
//! - **Ledger**: session counters and best records
//! - **Persistence**: [`KeyValueStore`] port with memory and file stores
//! - **Session**: the [`GameSession`] facade callers talk to
//!
//! # Example
//!
//! ```
//! use arcade_core::{Difficulty, GameKind, GameSession, MemoryStore, Move};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let rng = StdRng::seed_from_u64(7);
//! let mut session = GameSession::new(GameKind::TicTacToe, Difficulty::Easy, rng, MemoryStore::new());
//! for cell in [0, 3, 1, 4, 2] {
//!     assert!(session.submit(Move::Place(cell)).is_applied());
//! }
//! assert_eq!(session.snapshot().outcome().to_string(), "Won");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod content;
mod error;
mod games;
mod gateway;
mod kind;
mod ledger;
mod preferences;
mod scheduler;
mod session;
mod store;
mod timer;

// Crate-level exports - Variants and tiers
pub use kind::{Difficulty, GameKind};

// Crate-level exports - Errors
pub use error::StoreError;

// Crate-level exports - Content
pub use content::{
    Card, CardFace, Content, IMAGE_POOL, QUESTION_BANK, Question, deal_deck, grid_size,
    select_content, select_word, word_list,
};

// Crate-level exports - Rules
pub use games::{
    BoardRound, Hand, HandRound, HangmanRound, MAX_MISTAKES, Mark, MemoryRound, Move,
    MoveOutcome, Outcome, QuizRound, REVERT_DELAY, Rejection, RoundState, Throw, WIN_LINES,
    judge, winning_line,
};

// Crate-level exports - Deferred actions
pub use scheduler::{Scheduler, TaskHandle};
pub use timer::{RoundTimer, TICK};

// Crate-level exports - Persistence
pub use gateway::{DARK_MODE_KEY, PersistenceGateway};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

// Crate-level exports - Scores and preferences
pub use ledger::{Counter, RecordOutcome, ScoreLedger, ScoreRecord};
pub use preferences::{Preferences, Theme};

// Crate-level exports - Session
pub use session::{Deferred, GameSession, Snapshot};
