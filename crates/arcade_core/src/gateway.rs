//! Typed access to the persisted records.
//!
//! Two logical records live in the store: best scores (one JSON object per
//! game, keyed by difficulty) and the dark-mode flag. Reading never fails:
//! an absent or malformed value means "no record" or the light theme.

use crate::{Difficulty, KeyValueStore, ScoreRecord, StoreError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Bridges the score ledger and theme preference to a key-value store.
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads best records stored under `key`.
    ///
    /// Entries with an unknown difficulty or an unreadable record are skipped.
    /// The older `time` field name is accepted for elapsed seconds.
    #[instrument(skip(self))]
    pub fn load_best_scores(&self, key: &str) -> BTreeMap<Difficulty, ScoreRecord> {
        let Some(raw) = self.store.load(key) else {
            debug!("No best scores stored");
            return BTreeMap::new();
        };

        let object: Map<String, Value> = match serde_json::from_str(&raw) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                warn!(value = %other, "Best scores are not an object, ignoring");
                return BTreeMap::new();
            }
            Err(e) => {
                warn!(error = %e, "Best scores are malformed, ignoring");
                return BTreeMap::new();
            }
        };

        object
            .into_iter()
            .filter_map(|(tier, value)| {
                let Ok(difficulty) = Difficulty::from_str(&tier) else {
                    warn!(%tier, "Unknown difficulty in best scores, skipping");
                    return None;
                };
                match serde_json::from_value::<ScoreRecord>(value) {
                    Ok(record) => Some((difficulty, record)),
                    Err(e) => {
                        warn!(%tier, error = %e, "Unreadable best score, skipping");
                        None
                    }
                }
            })
            .collect()
    }

    /// Writes the full best-record map under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    #[instrument(skip(self, scores), fields(tiers = scores.len()))]
    pub fn save_best_scores(
        &mut self,
        key: &str,
        scores: &BTreeMap<Difficulty, ScoreRecord>,
    ) -> Result<(), StoreError> {
        let mut object = Map::new();
        for (tier, record) in scores {
            object.insert(tier.to_string(), serde_json::to_value(record)?);
        }
        let encoded = serde_json::to_string(&Value::Object(object))?;
        self.store.save(key, encoded)
    }

    /// Loads the dark-mode flag; anything but a stored JSON boolean is light.
    #[instrument(skip(self))]
    pub fn load_dark_mode(&self) -> bool {
        let stored = self.store.load(DARK_MODE_KEY);
        match stored.as_deref().map(|raw| serde_json::from_str::<bool>(raw)) {
            Some(Ok(dark)) => dark,
            Some(Err(e)) => {
                warn!(error = %e, "Dark mode flag is malformed, using light theme");
                false
            }
            None => false,
        }
    }

    /// Persists the dark-mode flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    #[instrument(skip(self))]
    pub fn save_dark_mode(&mut self, dark: bool) -> Result<(), StoreError> {
        self.store.save(DARK_MODE_KEY, dark.to_string())
    }
}
