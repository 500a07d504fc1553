//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the executable. Game progress is
//! never written anywhere; this is player preference only.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Settings file name (working directory)
    const SETTINGS_FILE: &'static str = "falling_alchemist_settings.json";

    /// Effective sound-effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Load settings, writing a default file on first launch so players can
    /// edit it. Any read or parse failure falls back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_create() -> Self {
        match std::fs::read_to_string(Self::SETTINGS_FILE) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::SETTINGS_FILE);
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file, writing defaults");
                let settings = Self::default();
                settings.save();
                settings
            }
        }
    }

    /// Save settings to disk; failures are logged, never fatal
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::SETTINGS_FILE, json) {
                    log::warn!("Failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }

    /// Browser builds keep defaults in memory
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_create() -> Self {
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {}
}
