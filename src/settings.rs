//! Player preferences
//!
//! Persisted as a JSON document next to the wallet keys.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all sound
    pub muted: bool,
    /// Speed-up applied to the landing chime
    pub landing_playback_rate: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            landing_playback_rate: 2.0,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "plinko_settings";

    /// Effective sound effect volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let settings: Self = load_json(store, Self::STORAGE_KEY);
        log::info!("Settings loaded (volume {:.2})", settings.effective_volume());
        settings
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        save_json(store, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_saved_settings_reload() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            muted: true,
            master_volume: 0.3,
            ..Default::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let store = MemoryStore::with_entries([("plinko_settings", r#"{"muted":true}"#)]);
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert_eq!(settings.landing_playback_rate, 2.0);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_corrupt_document_uses_defaults() {
        let store = MemoryStore::with_entries([("plinko_settings", "][")]);
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
