//! Frame driver
//!
//! Owns one session: simulation state, input session, debug overlay and audio feedback.
//! Each `frame` runs input → tick → overlay → feedback in that order. The presentation
//! layer polls `snapshot` afterwards instead of reading state directly.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::audio::{CueBank, FeedbackOrchestrator};
use crate::debug::{DebugOverlay, Wedge};
use crate::input::InputSession;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Lock, LockLevel, LockState, PickState, Viewport, tick};
use crate::summary::GameSummary;

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub lock: Lock,
    /// HUD label, e.g. "Very Hard"
    pub lock_level: &'static str,
    /// Pick-angle bounds of the zone, exclusive
    pub zone: (f32, f32),
    pub lock_state: LockState,
    pub pick_state: PickState,
    pub lockpicks_remaining: u32,
    pub points: u64,
    /// Opened locks, oldest first
    pub completed_locks: Vec<LockLevel>,
    pub game_over: bool,
    pub input_enabled: bool,
    /// Cylinder rotation about the lock axis
    pub cylinder_rotation: f32,
    /// Pick rotation about the lock axis
    pub pick_rotation: f32,
    pub pick_position: Vec3,
    /// Euler XYZ, relative to the cylinder
    pub tension_tool_rotation: Vec3,
    pub camera_position: Vec3,
    /// Empty while the overlay is hidden
    pub debug_wedges: Vec<Wedge>,
}

/// Tension tool sways a little with the pointer
pub fn tension_tool_rotation(ndc: Vec2) -> Vec3 {
    Vec3::new(
        ndc.y * -0.1,
        FRAC_PI_4 + ndc.x * 0.1,
        FRAC_PI_2 + ndc.y * 0.25,
    )
}

pub struct Game {
    settings: Settings,
    state: GameState,
    input: InputSession,
    overlay: DebugOverlay,
    feedback: FeedbackOrchestrator,
    audio: CueBank,
    last_events: Vec<GameEvent>,
}

impl Game {
    /// Start a session. `audio` holds whatever cue handles the host managed to load.
    pub fn new(settings: Settings, seed: u64, viewport: Viewport, audio: CueBank) -> Self {
        let state = GameState::new(seed, settings.tuning.clone(), viewport);
        Self {
            input: InputSession::new(settings.keys.clone()),
            feedback: FeedbackOrchestrator::new(settings.audio.clone()),
            overlay: DebugOverlay::default(),
            audio,
            state,
            settings,
            last_events: Vec::new(),
        }
    }

    /// Where platform callbacks deliver pointer and keyboard events
    pub fn input(&mut self) -> &mut InputSession {
        &mut self.input
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn overlay(&self) -> &DebugOverlay {
        &self.overlay
    }

    pub fn audio_mut(&mut self) -> &mut CueBank {
        &mut self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.pointer.resize(viewport);
    }

    /// Events produced by the latest frame
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Run one display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) -> &[GameEvent] {
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input, dt);
        let events = self.state.drain_events();

        // The session listens exactly while the simulation accepts input
        if self.state.input_enabled {
            self.input.start();
        } else {
            self.input.stop();
        }

        self.overlay.sync(self.state.debug_visible, &self.state.lock);

        let commands = self.feedback.update(&self.state, &events);
        self.audio.apply(&commands);

        for event in &events {
            log::debug!("Event: {event:?}");
        }
        self.last_events = events;
        &self.last_events
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            lock: state.lock,
            lock_level: state.lock.level.as_str(),
            zone: state.lock.zone_bounds(),
            lock_state: state.lock_state,
            pick_state: state.pick.state,
            lockpicks_remaining: state.lockpicks_remaining,
            points: state.points,
            completed_locks: state.completed_locks.clone(),
            game_over: state.game_over,
            input_enabled: state.input_enabled,
            cylinder_rotation: state.cylinder_angle,
            pick_rotation: state.pick.angle,
            pick_position: state.pick.position,
            tension_tool_rotation: tension_tool_rotation(state.pointer.ndc),
            camera_position: state.pointer.camera.position,
            debug_wedges: self.overlay.wedges().to_vec(),
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::new(self.state.points, &self.state.completed_locks)
    }

    /// Throw the current session away and start over
    ///
    /// Pending animations and the unlock delay belong to the old state and go with it.
    pub fn restart(&mut self, seed: u64) {
        let viewport = self.state.pointer.viewport();
        self.state = GameState::new(seed, self.settings.tuning.clone(), viewport);
        self.input.stop();
        self.overlay.hide();
        let commands = self.feedback.reset();
        self.audio.apply(&commands);
        self.last_events.clear();
    }
}
