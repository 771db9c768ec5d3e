//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file natively.
//! Constructed once by the entry point and handed to the driver.

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// How simulation ticks are scheduled against display frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    /// Fixed 60 Hz ticks from an accumulator; feel is independent of refresh rate
    #[default]
    FixedStep,
    /// Exactly one tick per display frame
    FrameLocked,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::FixedStep => "Fixed",
            Cadence::FrameLocked => "Frame-locked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" | "fixed-step" | "fixedstep" => Some(Cadence::FixedStep),
            "frame" | "frame-locked" | "framelocked" => Some(Cadence::FrameLocked),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Canvas width in world units (camera keeps the player a third in)
    pub viewport_width: f32,
    /// Canvas height; falling this far (plus margin) ends the run
    pub viewport_height: f32,

    // === Loop ===
    pub cadence: Cadence,

    // === Input ===
    /// One jump per key press instead of re-jumping while held
    pub debounce_jump: bool,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            cadence: Cadence::FixedStep,
            debounce_jump: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Reject unusable values (including bad tuning)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        self.tuning.validate()
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
