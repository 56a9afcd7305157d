//! The game session: one game variant, its current round and everything
//! that outlives a round.
//!
//! A session owns its deferred actions. The caller feeds it elapsed time
//! through [`GameSession::advance`]; timer ticks and mismatch reverts fire
//! from there. Every action carries the epoch of the round that scheduled it,
//! and reset bumps the epoch and cancels the queue, so nothing scheduled for
//! a superseded round can touch the new one.

use crate::games::{Mark, Move, MoveOutcome, Outcome, REVERT_DELAY, RoundState};
use crate::{
    Counter, Difficulty, GameKind, KeyValueStore, PersistenceGateway, Preferences, RecordOutcome,
    RoundTimer, ScoreLedger, ScoreRecord, Scheduler, TaskHandle,
};
use derive_getters::Getters;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Actions the session schedules for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// One second of the round timer elapsed.
    TimerTick {
        /// Round that scheduled the tick.
        epoch: u64,
    },
    /// Turn a mismatched memory pair face down.
    RevertMismatch {
        /// Round that scheduled the revert.
        epoch: u64,
    },
}

impl Deferred {
    fn epoch(self) -> u64 {
        match self {
            Deferred::TimerTick { epoch } | Deferred::RevertMismatch { epoch } => epoch,
        }
    }
}

/// Everything a caller needs to render the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Snapshot {
    /// Game being played.
    kind: GameKind,
    /// Active tier.
    difficulty: Difficulty,
    /// Full round state.
    round: RoundState,
    /// Round status.
    outcome: Outcome,
    /// Timer value in whole seconds.
    elapsed_seconds: u64,
    /// Whether the timer is counting.
    timer_running: bool,
    /// Best record for the active tier.
    best: Option<ScoreRecord>,
    /// Session tallies.
    counters: BTreeMap<Counter, u32>,
    /// Theme preference.
    dark_mode: bool,
    /// Whether the round just finished set a new best.
    new_best: bool,
    /// Whether a mismatched memory pair is waiting to turn back.
    awaiting_revert: bool,
}

/// A running game.
#[derive(Debug)]
pub struct GameSession<R, S> {
    kind: GameKind,
    difficulty: Difficulty,
    round: RoundState,
    ledger: ScoreLedger,
    preferences: Preferences,
    gateway: PersistenceGateway<S>,
    scheduler: Scheduler<Deferred>,
    timer: RoundTimer,
    revert: Option<TaskHandle>,
    epoch: u64,
    rng: R,
    last_record: Option<RecordOutcome>,
}

impl<R: Rng, S: KeyValueStore> GameSession<R, S> {
    /// Opens a session and starts its first round.
    ///
    /// Persisted best records and the theme are read here, once.
    #[instrument(skip(rng, store))]
    pub fn new(kind: GameKind, difficulty: Difficulty, mut rng: R, store: S) -> Self {
        let gateway = PersistenceGateway::new(store);
        let ledger = ScoreLedger::load(kind, &gateway);
        let preferences = Preferences::load(&gateway);
        let round = RoundState::start(kind, difficulty, &mut rng);

        let mut session = Self {
            kind,
            difficulty,
            round,
            ledger,
            preferences,
            gateway,
            scheduler: Scheduler::new(),
            timer: RoundTimer::new(),
            revert: None,
            epoch: 0,
            rng,
            last_record: None,
        };
        session.start_timer();
        info!(title = kind.title(), %difficulty, "Session opened");
        session
    }

    /// Game being played.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Active tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current round.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Counters and best records.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Theme preference.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Round timer.
    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Session clock: total time fed through [`advance`](Self::advance).
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Deferred actions still waiting.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Result of the last best-record comparison this round, if any.
    pub fn last_record(&self) -> Option<&RecordOutcome> {
        self.last_record.as_ref()
    }

    /// Validates and applies a move.
    ///
    /// A rejected move changes nothing. An applied move that ends the round
    /// updates counters and best records exactly once.
    #[instrument(skip(self), fields(kind = %self.kind, epoch = self.epoch))]
    pub fn submit(&mut self, mv: Move) -> MoveOutcome {
        match self.round.apply(mv, &mut self.rng) {
            Err(rejection) => {
                debug!(%rejection, "Move rejected");
                MoveOutcome::Rejected(rejection)
            }
            Ok(finished) => {
                if let Some(outcome) = finished {
                    self.finish_round(outcome);
                }
                self.schedule_revert();
                MoveOutcome::Applied
            }
        }
    }

    /// Starts a new round of the same game and tier.
    ///
    /// Outstanding deferred actions are cancelled, content is drawn again and
    /// the timer restarts from zero. Counters and best records are kept.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.scheduler.cancel_all();
        self.revert = None;
        self.last_record = None;
        self.round = RoundState::start(self.kind, self.difficulty, &mut self.rng);
        self.timer = RoundTimer::new();
        self.start_timer();
        info!(epoch = self.epoch, "Round reset");
    }

    /// Switches tier and starts a new round with fresh content.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    /// Flips the theme and persists it. Returns true for dark mode.
    pub fn toggle_theme(&mut self) -> bool {
        self.preferences.toggle(&mut self.gateway)
    }

    /// Clears the session counters. Best records are untouched.
    pub fn reset_counters(&mut self) {
        self.ledger.reset_counters();
    }

    /// Moves the session clock forward, firing every action that falls due.
    ///
    /// Returns the number of actions fired, stale ones included.
    #[instrument(skip(self), level = "trace")]
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some(action) = self.scheduler.pop_due(until) {
            fired += 1;
            self.fire(action);
        }
        self.scheduler.advance_to(until);
        fired
    }

    /// Current observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            kind: self.kind,
            difficulty: self.difficulty,
            round: self.round.clone(),
            outcome: self.round.outcome(),
            elapsed_seconds: *self.timer.elapsed_seconds(),
            timer_running: *self.timer.running(),
            best: self.ledger.best(self.difficulty).copied(),
            counters: self.ledger.counters().clone(),
            dark_mode: self.preferences.dark_mode(),
            new_best: self.last_record.is_some_and(|r| *r.is_new_best()),
            awaiting_revert: self
                .round
                .as_memory()
                .is_some_and(|memory| memory.awaiting_revert()),
        }
    }

    /// Ends the session, cancelling every deferred action, and hands back the store.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn close(mut self) -> S {
        let cancelled = self.scheduler.cancel_all();
        info!(cancelled, "Session closed");
        self.gateway.into_inner()
    }

    fn start_timer(&mut self) {
        if self.kind.is_timed() && !self.round.outcome().is_terminal() {
            self.timer.start(
                &mut self.scheduler,
                Deferred::TimerTick { epoch: self.epoch },
            );
        }
    }

    fn schedule_revert(&mut self) {
        let waiting = self
            .round
            .as_memory()
            .is_some_and(|memory| memory.awaiting_revert());
        if waiting && self.revert.is_none() {
            let action = Deferred::RevertMismatch { epoch: self.epoch };
            self.revert = Some(self.scheduler.schedule(REVERT_DELAY, action));
            debug!("Revert scheduled");
        }
    }

    fn fire(&mut self, action: Deferred) {
        if action.epoch() != self.epoch {
            debug!(?action, current = self.epoch, "Ignoring action from a superseded round");
            return;
        }
        match action {
            Deferred::TimerTick { epoch } => {
                self.timer
                    .on_tick(&mut self.scheduler, Deferred::TimerTick { epoch });
            }
            Deferred::RevertMismatch { .. } => {
                self.revert = None;
                if let Some(memory) = self.round.as_memory_mut() {
                    memory.revert();
                }
            }
        }
    }

    #[instrument(skip(self))]
    fn finish_round(&mut self, outcome: Outcome) {
        info!(kind = %self.kind, %outcome, "Round finished");
        match self.kind {
            GameKind::Memory => {
                self.timer.stop(&mut self.scheduler);
                let Some(memory) = self.round.as_memory() else {
                    warn!("Memory game without a memory round");
                    return;
                };
                if outcome == Outcome::Won {
                    let result = ScoreRecord::new(*memory.moves(), *self.timer.elapsed_seconds());
                    self.record(result);
                }
            }
            GameKind::Hangman => match outcome {
                Outcome::Won => {
                    self.ledger.bump(Counter::Wins);
                    let mistakes = self
                        .round
                        .as_hangman()
                        .map_or(0, |round| u32::from(*round.mistakes()));
                    self.record(ScoreRecord::new(mistakes, 0));
                }
                Outcome::Lost => self.ledger.bump(Counter::Losses),
                _ => {}
            },
            GameKind::TicTacToe => {
                let winner = self.round.as_board().and_then(|board| *board.winner());
                match (outcome, winner) {
                    (Outcome::Won, Some(Mark::X)) => self.ledger.bump(Counter::XWins),
                    (Outcome::Won, Some(Mark::O)) => self.ledger.bump(Counter::OWins),
                    (Outcome::Draw, _) => self.ledger.bump(Counter::Draws),
                    _ => {}
                }
            }
            GameKind::RockPaperScissors => match outcome {
                Outcome::Won => self.ledger.bump(Counter::Wins),
                Outcome::Lost => self.ledger.bump(Counter::Losses),
                Outcome::Draw => self.ledger.bump(Counter::Draws),
                _ => {}
            },
            GameKind::Quiz => {}
        }
    }

    fn record(&mut self, result: ScoreRecord) {
        let outcome = self
            .ledger
            .record_round(&mut self.gateway, self.difficulty, result);
        self.last_record = Some(outcome);
    }
}
