//! Game settings and tuning
//!
//! Loaded from JSON. Anything missing from the file falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning (speeds in radians/sec, durations in seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Speed the cylinder springs back to upright when no force is applied
    pub reset_speed: f32,
    /// Speed the cylinder turns while the pick is in the zone
    pub turn_speed: f32,
    /// Seconds of jamming a pick survives
    pub pick_lifetime: f32,
    /// Lockpicks at the start of a run
    pub starting_lockpicks: u32,
    /// Input pause after a lock opens
    pub unlock_delay: f32,
    /// Broken pick fall animation
    pub fall_duration: f32,
    /// New pick entry animation
    pub enter_duration: f32,
    /// Amplitude of each jam sine wave
    pub jam_amplitude: f32,
    /// Overall damping applied to the summed jam waves
    pub jam_damping: f32,
    /// Phase offset of the pick wiggle relative to the cylinder
    pub jam_phase_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reset_speed: 2.0,
            turn_speed: 0.8,
            pick_lifetime: 2.0,
            starting_lockpicks: 10,
            unlock_delay: 1.0,
            fall_duration: 1.0,
            enter_duration: 1.0,
            jam_amplitude: 0.1,
            jam_damping: 0.1,
            jam_phase_offset: 3.0,
        }
    }
}

/// Audio preferences and feedback shaping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Pointer speed to pick-move volume gain
    pub pick_move_gain: f32,
    /// Pick-move playback rate at rest
    pub pick_move_base_pitch: f32,
    /// Upper bound on pick-move playback rate
    pub pick_move_pitch_cap: f32,
    /// Volume of the tension loop
    pub tension_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pick_move_gain: 25.0,
            pick_move_base_pitch: 0.8,
            pick_move_pitch_cap: 1.1,
            tension_volume: 0.75,
        }
    }
}

/// Keyboard bindings, matched against `KeyboardEvent.key` style names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub apply_force: String,
    pub toggle_debug: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            apply_force: " ".to_string(),
            toggle_debug: "d".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub audio: AudioSettings,
    pub keys: KeyBindings,
}

impl Settings {
    /// Parse settings from JSON (values are sanitized)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e} ({}), using default settings", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        let t = &mut self.tuning;
        t.reset_speed = t.reset_speed.max(0.0);
        t.turn_speed = t.turn_speed.max(0.0);
        t.pick_lifetime = t.pick_lifetime.max(0.0);
        t.unlock_delay = t.unlock_delay.max(0.0);
        t.fall_duration = t.fall_duration.max(0.0);
        t.enter_duration = t.enter_duration.max(0.0);
        t.jam_amplitude = t.jam_amplitude.max(0.0);
        t.jam_damping = t.jam_damping.max(0.0);
        t.starting_lockpicks = t.starting_lockpicks.max(1);

        let a = &mut self.audio;
        a.master_volume = a.master_volume.clamp(0.0, 1.0);
        a.sfx_volume = a.sfx_volume.clamp(0.0, 1.0);
        a.tension_volume = a.tension_volume.clamp(0.0, 1.0);
        a.pick_move_gain = a.pick_move_gain.max(0.0);
        a.pick_move_base_pitch = a.pick_move_base_pitch.max(0.0);
        a.pick_move_pitch_cap = a.pick_move_pitch_cap.max(a.pick_move_base_pitch);

        self
    }
}
