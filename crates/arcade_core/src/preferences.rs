//! Theme preference.

use crate::{KeyValueStore, PersistenceGateway};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Default theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Process-wide preferences, read once and written on every toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    dark_mode: bool,
}

impl Preferences {
    /// Reads the stored preferences, defaulting to the light theme.
    #[instrument(skip(gateway))]
    pub fn load<S: KeyValueStore>(gateway: &PersistenceGateway<S>) -> Self {
        Self {
            dark_mode: gateway.load_dark_mode(),
        }
    }

    /// Whether dark mode is on.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        if self.dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Flips dark mode and writes it through. Returns the new setting.
    #[instrument(skip(self, gateway))]
    pub fn toggle<S: KeyValueStore>(&mut self, gateway: &mut PersistenceGateway<S>) -> bool {
        self.dark_mode = !self.dark_mode;
        info!(theme = %self.theme(), "Theme toggled");
        if let Err(e) = gateway.save_dark_mode(self.dark_mode) {
            warn!(error = %e, "Failed to persist theme");
        }
        self.dark_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_toggle_persists() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut prefs = Preferences::load(&gateway);
        assert_eq!(prefs.theme(), Theme::Light);

        assert!(prefs.toggle(&mut gateway));
        assert_eq!(Preferences::load(&gateway).theme(), Theme::Dark);

        assert!(!prefs.toggle(&mut gateway));
        assert!(!Preferences::load(&gateway).dark_mode());
    }
}
