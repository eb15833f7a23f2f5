//! Game state and core simulation types
//!
//! Exactly one lock and one pick are current at any time. Cylinder and pick angles are
//! outputs of `tick`, never set from outside.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lock::{Lock, LockLevel};
use super::pick::Pick;
use super::pointer::{PointerMapper, Viewport};
use super::tween::Delay;
use crate::settings::Tuning;

/// What the lock is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    /// No force: cylinder springs back, pick follows the pointer
    Reset,
    /// Force outside the zone: everything wiggles, the pick wears
    Jam,
    /// Force inside the zone: cylinder turns
    Turn,
    /// Fully turned
    Unlock,
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LockStateChanged { from: LockState, to: LockState },
    /// Lock opened and points awarded
    Unlocked { level: LockLevel, points: u32 },
    /// A new lock replaced the solved one
    LockGenerated { level: LockLevel },
    PickBroke { remaining: u32 },
    PickEntered,
    InputSuspended,
    InputResumed,
    DebugToggled { visible: bool },
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub lock: Lock,
    pub pick: Pick,
    pub lock_state: LockState,
    /// 0 = upright, -π/2 = open
    pub cylinder_angle: f32,
    /// Force is being applied (button or key held)
    pub apply_force: bool,
    /// Whether the simulation accepts input right now
    pub input_enabled: bool,
    pub pointer: PointerMapper,
    /// Pointer movement consumed this tick (NDC units)
    pub pointer_delta: Vec2,
    pub lockpicks_remaining: u32,
    pub points: u64,
    pub completed_locks: Vec<LockLevel>,
    pub game_over: bool,
    pub debug_visible: bool,
    /// Seconds since the run started
    pub elapsed: f32,
    pub time_ticks: u64,
    /// Post-unlock pause. Clearing it cancels the pending lock swap.
    pub unlock_delay: Option<Delay>,
    pub tuning: Tuning,
    /// Events from the latest tick, drained by the frame driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run: random lock, full set of picks, first pick entering
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let lock = Lock::random(&mut rng);
        let pick = Pick::spawned(&tuning);

        log::info!(
            "New run (seed {seed}), {} lockpicks",
            tuning.starting_lockpicks
        );

        Self {
            seed,
            rng,
            lock,
            pick,
            lock_state: LockState::Reset,
            cylinder_angle: 0.0,
            apply_force: false,
            input_enabled: false,
            pointer: PointerMapper::new(viewport),
            pointer_delta: Vec2::ZERO,
            lockpicks_remaining: tuning.starting_lockpicks,
            points: 0,
            completed_locks: Vec::new(),
            game_over: false,
            debug_visible: false,
            elapsed: 0.0,
            time_ticks: 0,
            unlock_delay: None,
            tuning,
            events: Vec::new(),
        }
    }

    /// Replace the current lock with a freshly generated one
    pub fn next_lock(&mut self) {
        self.lock = Lock::random(&mut self.rng);
        self.events.push(GameEvent::LockGenerated {
            level: self.lock.level,
        });
    }

    pub fn suspend_input(&mut self) {
        self.apply_force = false;
        if self.input_enabled {
            self.input_enabled = false;
            self.events.push(GameEvent::InputSuspended);
        }
    }

    pub fn resume_input(&mut self) {
        if !self.input_enabled && !self.game_over {
            self.input_enabled = true;
            self.events.push(GameEvent::InputResumed);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
