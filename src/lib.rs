//! Lockpick - a lock-picking mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lock state machine, pick lifecycle, lock generation)
//! - `input`: Input session that turns pointer/keyboard events into tick input
//! - `audio`: Feedback orchestration and cue playback
//! - `debug`: Debug overlay wedges
//! - `game`: Frame driver and presentation snapshots
//! - `settings`: Data-driven tuning and preferences
//! - `summary`: End-of-game summary

pub mod audio;
pub mod debug;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod summary;

pub use game::{Game, GameSnapshot};
pub use settings::{Settings, SettingsError};
pub use summary::GameSummary;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::FRAC_PI_2;

    /// Cylinder angle when the lock is upright
    pub const CYLINDER_LOCKED: f32 = 0.0;
    /// Cylinder angle when the lock is fully turned
    pub const CYLINDER_OPEN: f32 = -FRAC_PI_2;

    /// Pick sweep limits (radians)
    pub const PICK_MIN_ANGLE: f32 = -FRAC_PI_2;
    pub const PICK_MAX_ANGLE: f32 = FRAC_PI_2;

    /// Pick rest position while in use
    pub const PICK_POSITION: [f32; 3] = [0.0, 0.0, -0.03];
    /// Pick y when it has fallen out of view
    pub const PICK_FALL_TO: f32 = -1.0;
    /// Pick y when a new pick spawns
    pub const PICK_FALL_FROM: f32 = 1.0;

    /// Camera projection
    pub const CAMERA_FOV_DEG: f32 = 35.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 50.0;
    /// Distance of the camera from the lock
    pub const CAMERA_DISTANCE: f32 = 0.25;
    /// How far the camera sways with the pointer
    pub const CAMERA_SWAY: f32 = 0.05;

    /// Jam wiggle frequencies (multiples of elapsed seconds)
    pub const JAM_FREQUENCIES: [f32; 3] = [30.0, 41.0, 27.0];
    /// Frame rate the jam wiggle amplitude is tuned for
    pub const JAM_REFERENCE_HZ: f32 = 60.0;

    /// Points per lock tier, VeryEasy..VeryHard
    pub const LOCK_POINTS: [u32; 5] = [4, 6, 10, 20, 36];
}

/// Clamp a pick angle to its sweep range
#[inline]
pub fn clamp_pick_angle(angle: f32) -> f32 {
    angle.clamp(consts::PICK_MIN_ANGLE, consts::PICK_MAX_ANGLE)
}

/// Clamp a cylinder angle to `[-π/2, 0]`
#[inline]
pub fn clamp_cylinder_angle(angle: f32) -> f32 {
    angle.clamp(consts::CYLINDER_OPEN, consts::CYLINDER_LOCKED)
}

/// Initialize logging for the current platform
///
/// Native builds log to stderr via `env_logger` (filter from `RUST_LOG`, default `info`).
/// Web builds log to the browser console and install the panic hook.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}
