//! Session counters and best-record bookkeeping.

use crate::{Difficulty, GameKind, KeyValueStore, PersistenceGateway};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Result of a finished round, compared against the best on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct ScoreRecord {
    /// Moves (memory) or mistakes (word guessing); lower is better.
    moves: u32,
    /// Seconds the round took, zero for untimed games.
    elapsed_seconds: u64,
}

/// A record as found in the store. Older writes used `time`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    moves: u32,
    elapsed_seconds: Option<u64>,
    time: Option<u64>,
}

impl From<StoredRecord> for ScoreRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            moves: stored.moves,
            elapsed_seconds: stored.elapsed_seconds.or(stored.time).unwrap_or(0),
        }
    }
}

impl ScoreRecord {
    /// Whether this result strictly beats `other`.
    pub fn beats(&self, other: &ScoreRecord) -> bool {
        self.moves < other.moves
    }
}

/// What [`ScoreLedger::record_round`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct RecordOutcome {
    /// Whether the result replaced the stored best.
    is_new_best: bool,
    /// The best on record before this result.
    previous: Option<ScoreRecord>,
}

/// In-session tallies. Not persisted.
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
    strum::Display,
    strum::EnumIter,
)]
pub enum Counter {
    /// Rounds the player won.
    Wins,
    /// Rounds the player lost.
    Losses,
    /// Drawn rounds.
    Draws,
    /// Tic-tac-toe rounds won by X.
    XWins,
    /// Tic-tac-toe rounds won by O.
    OWins,
}

/// Keeps the session's counters and the durable best records of one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ScoreLedger {
    #[getter(skip)]
    best_key: Option<&'static str>,
    /// Best record per difficulty.
    bests: BTreeMap<Difficulty, ScoreRecord>,
    /// Session tallies.
    counters: BTreeMap<Counter, u32>,
}

impl ScoreLedger {
    /// Creates a ledger for `kind`, reading its best records once.
    #[instrument(skip(gateway))]
    pub fn load<S: KeyValueStore>(kind: GameKind, gateway: &PersistenceGateway<S>) -> Self {
        let best_key = kind.best_score_key();
        let bests = best_key
            .map(|key| gateway.load_best_scores(key))
            .unwrap_or_default();
        debug!(tiers = bests.len(), "Best records loaded");
        Self {
            best_key,
            bests,
            counters: BTreeMap::new(),
        }
    }

    /// Store key for the best records; `None` for games without one.
    pub fn best_key(&self) -> Option<&'static str> {
        self.best_key
    }

    /// Best record for a tier.
    pub fn best(&self, difficulty: Difficulty) -> Option<&ScoreRecord> {
        self.bests.get(&difficulty)
    }

    /// Compares a finished round against the best for `difficulty`.
    ///
    /// The best is replaced, and written through the gateway, only if none
    /// exists yet or `result` is strictly better. A failed write is logged and
    /// the new best is still kept for the rest of the session.
    #[instrument(skip(self, gateway))]
    pub fn record_round<S: KeyValueStore>(
        &mut self,
        gateway: &mut PersistenceGateway<S>,
        difficulty: Difficulty,
        result: ScoreRecord,
    ) -> RecordOutcome {
        let previous = self.bests.get(&difficulty).copied();
        let Some(key) = self.best_key else {
            return RecordOutcome {
                is_new_best: false,
                previous,
            };
        };

        let is_new_best = previous.is_none_or(|best| result.beats(&best));
        if is_new_best {
            info!(?previous, ?result, "New best score");
            self.bests.insert(difficulty, result);
            if let Err(e) = gateway.save_best_scores(key, &self.bests) {
                warn!(error = %e, "Failed to persist best score");
            }
        } else {
            debug!(?previous, ?result, "Not a new best");
        }

        RecordOutcome {
            is_new_best,
            previous,
        }
    }

    /// Adds one to a counter.
    pub fn bump(&mut self, counter: Counter) {
        *self.counters.entry(counter).or_default() += 1;
    }

    /// Current value of a counter.
    pub fn count(&self, counter: Counter) -> u32 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    /// Clears every session counter. Best records are untouched.
    #[instrument(skip(self))]
    pub fn reset_counters(&mut self) {
        self.counters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn gateway_with_best(moves: u32) -> PersistenceGateway<MemoryStore> {
        let store = MemoryStore::new().with_entry(
            "bestScore",
            format!(r#"{{"medium":{{"moves":{moves},"elapsedSeconds":50}}}}"#),
        );
        PersistenceGateway::new(store)
    }

    #[test]
    fn test_better_result_replaces_best() {
        let mut gateway = gateway_with_best(10);
        let mut ledger = ScoreLedger::load(GameKind::Memory, &gateway);

        let outcome = ledger.record_round(&mut gateway, Difficulty::Medium, ScoreRecord::new(8, 60));
        assert!(*outcome.is_new_best());
        assert_eq!(*outcome.previous(), Some(ScoreRecord::new(10, 50)));
        assert_eq!(ledger.best(Difficulty::Medium), Some(&ScoreRecord::new(8, 60)));

        let reloaded = ScoreLedger::load(GameKind::Memory, &gateway);
        assert_eq!(reloaded.best(Difficulty::Medium), Some(&ScoreRecord::new(8, 60)));
    }

    #[test]
    fn test_worse_result_keeps_best() {
        let mut gateway = gateway_with_best(10);
        let mut ledger = ScoreLedger::load(GameKind::Memory, &gateway);

        let outcome = ledger.record_round(&mut gateway, Difficulty::Medium, ScoreRecord::new(12, 5));
        assert!(!*outcome.is_new_best());
        assert_eq!(ledger.best(Difficulty::Medium), Some(&ScoreRecord::new(10, 50)));
    }

    #[test]
    fn test_equal_result_is_not_new_best() {
        let mut gateway = gateway_with_best(10);
        let mut ledger = ScoreLedger::load(GameKind::Memory, &gateway);
        let outcome = ledger.record_round(&mut gateway, Difficulty::Medium, ScoreRecord::new(10, 1));
        assert!(!*outcome.is_new_best());
    }

    #[test]
    fn test_first_result_is_new_best() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut ledger = ScoreLedger::load(GameKind::Hangman, &gateway);
        let outcome = ledger.record_round(&mut gateway, Difficulty::Easy, ScoreRecord::new(2, 0));
        assert!(*outcome.is_new_best());
        assert!(gateway.store().load("bestScore.hangman").is_some());
        assert!(gateway.store().load("bestScore").is_none());
    }

    #[test]
    fn test_games_without_bests_never_record() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut ledger = ScoreLedger::load(GameKind::TicTacToe, &gateway);
        let outcome = ledger.record_round(&mut gateway, Difficulty::Easy, ScoreRecord::new(1, 0));
        assert!(!*outcome.is_new_best());
        assert!(ledger.bests().is_empty());
    }

    #[test]
    fn test_counters() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        let mut ledger = ScoreLedger::load(GameKind::TicTacToe, &gateway);
        ledger.bump(Counter::XWins);
        ledger.bump(Counter::XWins);
        ledger.bump(Counter::Draws);
        assert_eq!(ledger.count(Counter::XWins), 2);
        assert_eq!(ledger.count(Counter::OWins), 0);
        ledger.reset_counters();
        assert_eq!(ledger.count(Counter::XWins), 0);
    }
}
