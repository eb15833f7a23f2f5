//! Audio feedback
//!
//! The orchestrator turns game state and events into cue commands; the cue bank applies
//! them to whatever sound handles the host loaded. Missing handles are silent no-ops.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::settings::AudioSettings;
use crate::sim::{GameEvent, GameState, LockState};

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Looping scrape, modulated by pointer speed
    PickMove,
    /// Pick hits resistance
    Jam,
    /// Lock opens
    Unlock,
    /// Pick snaps
    PickBreak,
    /// Looping cylinder turn
    Picking,
    /// Looping strain while jammed
    Tension,
    /// New pick slides in
    PickEnter,
}

impl Cue {
    pub const ALL: [Cue; 7] = [
        Cue::PickMove,
        Cue::Jam,
        Cue::Unlock,
        Cue::PickBreak,
        Cue::Picking,
        Cue::Tension,
        Cue::PickEnter,
    ];

    /// Asset name of the cue
    pub fn name(&self) -> &'static str {
        match self {
            Cue::PickMove => "pick-move",
            Cue::Jam => "jam",
            Cue::Unlock => "unlock",
            Cue::PickBreak => "pick-break",
            Cue::Picking => "picking",
            Cue::Tension => "tension",
            Cue::PickEnter => "pick-enter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Cue::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Cue::PickMove | Cue::Picking | Cue::Tension)
    }
}

/// What to do with a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueOp {
    /// Stop, rewind, play
    Restart,
    /// Play from where it paused
    Resume,
    Pause,
    Volume(f32),
    Rate(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueCommand {
    pub cue: Cue,
    pub op: CueOp,
}

impl CueCommand {
    pub fn new(cue: Cue, op: CueOp) -> Self {
        Self { cue, op }
    }
}

/// A loaded sound the host can play
pub trait CueHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_playback_rate(&mut self, rate: f32);
}

/// Cue handles by name, plus output volume
pub struct CueBank {
    handles: HashMap<Cue, Box<dyn CueHandle>>,
    /// Last volume requested per cue, before master scaling
    requested: HashMap<Cue, f32>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl CueBank {
    pub fn new(settings: &AudioSettings) -> Self {
        let mut requested = HashMap::new();
        requested.insert(Cue::Tension, settings.tension_volume);
        Self {
            handles: HashMap::new(),
            requested,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Register a handle; replaces any previous one for the cue
    pub fn insert(&mut self, cue: Cue, mut handle: Box<dyn CueHandle>) {
        handle.set_volume(self.scaled(cue));
        handle.set_playback_rate(1.0);
        self.handles.insert(cue, handle);
    }

    /// Register by asset name. Unknown names are ignored.
    pub fn insert_named(&mut self, name: &str, handle: Box<dyn CueHandle>) -> bool {
        match Cue::from_name(name) {
            Some(cue) => {
                self.insert(cue, handle);
                true
            }
            None => {
                log::warn!("Unknown sound cue '{name}' ignored");
                false
            }
        }
    }

    pub fn has(&self, cue: Cue) -> bool {
        self.handles.contains_key(&cue)
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_volumes();
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
        self.refresh_volumes();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_volumes();
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn scaled(&self, cue: Cue) -> f32 {
        self.requested.get(&cue).copied().unwrap_or(1.0) * self.effective_volume()
    }

    fn refresh_volumes(&mut self) {
        let cues: Vec<Cue> = self.handles.keys().copied().collect();
        for cue in cues {
            let vol = self.scaled(cue);
            if let Some(handle) = self.handles.get_mut(&cue) {
                handle.set_volume(vol);
            }
        }
    }

    /// Apply commands in order
    pub fn apply(&mut self, commands: &[CueCommand]) {
        for cmd in commands {
            if let CueOp::Volume(v) = cmd.op {
                self.requested.insert(cmd.cue, v.clamp(0.0, 1.0));
            }
            let vol = self.scaled(cmd.cue);

            let Some(handle) = self.handles.get_mut(&cmd.cue) else {
                log::trace!("No handle for {}, dropping {:?}", cmd.cue.name(), cmd.op);
                continue;
            };

            match cmd.op {
                CueOp::Restart => {
                    handle.stop();
                    handle.play();
                }
                CueOp::Resume => handle.play(),
                CueOp::Pause => handle.pause(),
                CueOp::Volume(_) => handle.set_volume(vol),
                CueOp::Rate(rate) => handle.set_playback_rate(rate),
            }
        }
    }
}

impl Default for CueBank {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}

/// Maps simulation state to cue commands, once per frame
#[derive(Debug, Clone)]
pub struct FeedbackOrchestrator {
    settings: AudioSettings,
    started: bool,
    tension_playing: bool,
    picking_playing: bool,
    pick_move_volume: Option<f32>,
    pick_move_rate: Option<f32>,
}

impl FeedbackOrchestrator {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            started: false,
            tension_playing: false,
            picking_playing: false,
            pick_move_volume: None,
            pick_move_rate: None,
        }
    }

    /// Pick-move volume: faster pointer motion is louder, capped at 1
    pub fn pick_move_volume(&self, delta_len_sq: f32) -> f32 {
        (delta_len_sq * self.settings.pick_move_gain).sqrt().min(1.0)
    }

    /// Pick-move playback rate: faster pointer motion is higher, capped
    pub fn pick_move_rate(&self, delta_len_sq: f32) -> f32 {
        (self.settings.pick_move_base_pitch + delta_len_sq).min(self.settings.pick_move_pitch_cap)
    }

    /// Pause running loops and forget per-run state (the pick-move loop keeps going)
    pub fn reset(&mut self) -> Vec<CueCommand> {
        let mut out = Vec::new();
        set_loop(&mut out, Cue::Tension, &mut self.tension_playing, false);
        set_loop(&mut out, Cue::Picking, &mut self.picking_playing, false);
        self.pick_move_volume = None;
        self.pick_move_rate = None;
        out
    }

    /// Commands for this frame, given the state after the tick and its events
    pub fn update(&mut self, state: &GameState, events: &[GameEvent]) -> Vec<CueCommand> {
        let mut out = Vec::new();

        if !self.started {
            self.started = true;
            out.push(CueCommand::new(Cue::PickMove, CueOp::Resume));
        }

        for event in events {
            match event {
                GameEvent::Unlocked { .. } => out.push(CueCommand::new(Cue::Unlock, CueOp::Restart)),
                GameEvent::PickBroke { .. } => {
                    out.push(CueCommand::new(Cue::PickBreak, CueOp::Restart))
                }
                GameEvent::PickEntered => out.push(CueCommand::new(Cue::PickEnter, CueOp::Restart)),
                GameEvent::LockStateChanged {
                    to: LockState::Jam, ..
                } => out.push(CueCommand::new(Cue::Jam, CueOp::Restart)),
                _ => {}
            }
        }

        let jammed = state.lock_state == LockState::Jam;
        let turning = state.lock_state == LockState::Turn;
        set_loop(&mut out, Cue::Tension, &mut self.tension_playing, jammed);
        set_loop(&mut out, Cue::Picking, &mut self.picking_playing, turning);

        // Only a pick that follows the pointer makes the scraping sound
        let len_sq = state.pointer_delta.length_squared();
        let volume = if state.lock_state == LockState::Reset {
            self.pick_move_volume(len_sq)
        } else {
            0.0
        };
        if self.pick_move_volume != Some(volume) {
            self.pick_move_volume = Some(volume);
            out.push(CueCommand::new(Cue::PickMove, CueOp::Volume(volume)));
        }
        if state.lock_state == LockState::Reset {
            let rate = self.pick_move_rate(len_sq);
            if self.pick_move_rate != Some(rate) {
                self.pick_move_rate = Some(rate);
                out.push(CueCommand::new(Cue::PickMove, CueOp::Rate(rate)));
            }
        }

        out
    }
}

impl Default for FeedbackOrchestrator {
    fn default() -> Self {
        Self::new(AudioSettings::default())
    }
}

fn set_loop(out: &mut Vec<CueCommand>, cue: Cue, playing: &mut bool, want: bool) {
    if *playing == want {
        return;
    }
    *playing = want;
    let op = if want { CueOp::Resume } else { CueOp::Pause };
    out.push(CueCommand::new(cue, op));
}

/// Observable state of a `VirtualVoice`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceState {
    pub playing: bool,
    /// Times playback started from the beginning
    pub starts: u32,
    pub volume: f32,
    pub rate: f32,
    rewound: bool,
}

/// In-memory cue handle for headless runs; clones share state
#[derive(Debug, Clone, Default)]
pub struct VirtualVoice(Rc<RefCell<VoiceState>>);

impl VirtualVoice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VoiceState {
        self.0.borrow().clone()
    }
}

impl CueHandle for VirtualVoice {
    fn play(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.playing {
            return;
        }
        if s.rewound || s.starts == 0 {
            s.starts += 1;
            s.rewound = false;
        }
        s.playing = true;
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn stop(&mut self) {
        let mut s = self.0.borrow_mut();
        s.playing = false;
        s.rewound = true;
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = volume;
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.0.borrow_mut().rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::Viewport;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(3, Tuning::default(), Viewport::default())
    }

    fn ops(commands: &[CueCommand], cue: Cue) -> Vec<CueOp> {
        commands.iter().filter(|c| c.cue == cue).map(|c| c.op).collect()
    }

    #[test]
    fn test_cue_names_round_trip() {
        for cue in Cue::ALL {
            assert_eq!(Cue::from_name(cue.name()), Some(cue));
        }
        assert_eq!(Cue::from_name("kazoo"), None);
    }

    #[test]
    fn test_pick_move_curve() {
        let fb = FeedbackOrchestrator::default();
        assert_eq!(fb.pick_move_volume(0.0), 0.0);
        assert!((fb.pick_move_volume(0.01) - 0.5).abs() < 1e-6);
        assert_eq!(fb.pick_move_volume(10.0), 1.0);
        assert!((fb.pick_move_rate(0.0) - 0.8).abs() < 1e-6);
        assert!((fb.pick_move_rate(0.1) - 0.9).abs() < 1e-6);
        assert!((fb.pick_move_rate(5.0) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_first_frame_starts_pick_move_loop() {
        let mut fb = FeedbackOrchestrator::default();
        let s = state();
        let out = fb.update(&s, &[]);
        assert_eq!(ops(&out, Cue::PickMove)[0], CueOp::Resume);
        let out = fb.update(&s, &[]);
        assert!(ops(&out, Cue::PickMove).is_empty());
    }

    #[test]
    fn test_one_shots_from_events() {
        let mut fb = FeedbackOrchestrator::default();
        let s = state();
        let events = [
            GameEvent::PickBroke { remaining: 3 },
            GameEvent::PickEntered,
            GameEvent::Unlocked {
                level: crate::sim::LockLevel::Hard,
                points: 20,
            },
        ];
        let out = fb.update(&s, &events);
        assert_eq!(ops(&out, Cue::PickBreak), vec![CueOp::Restart]);
        assert_eq!(ops(&out, Cue::PickEnter), vec![CueOp::Restart]);
        assert_eq!(ops(&out, Cue::Unlock), vec![CueOp::Restart]);
    }

    #[test]
    fn test_loops_follow_lock_state() {
        let mut fb = FeedbackOrchestrator::default();
        let mut s = state();

        s.lock_state = LockState::Jam;
        let events = [GameEvent::LockStateChanged {
            from: LockState::Reset,
            to: LockState::Jam,
        }];
        let out = fb.update(&s, &events);
        assert_eq!(ops(&out, Cue::Jam), vec![CueOp::Restart]);
        assert_eq!(ops(&out, Cue::Tension), vec![CueOp::Resume]);
        assert!(ops(&out, Cue::Picking).is_empty());

        // Still jammed: nothing new
        let out = fb.update(&s, &[]);
        assert!(ops(&out, Cue::Tension).is_empty());

        s.lock_state = LockState::Turn;
        let out = fb.update(&s, &[]);
        assert_eq!(ops(&out, Cue::Tension), vec![CueOp::Pause]);
        assert_eq!(ops(&out, Cue::Picking), vec![CueOp::Resume]);

        s.lock_state = LockState::Reset;
        let out = fb.update(&s, &[]);
        assert_eq!(ops(&out, Cue::Picking), vec![CueOp::Pause]);
    }

    #[test]
    fn test_pick_move_modulated_only_in_reset() {
        let mut fb = FeedbackOrchestrator::default();
        let mut s = state();
        s.pointer_delta = Vec2::new(0.1, 0.0);
        let out = fb.update(&s, &[]);
        let volume = ops(&out, Cue::PickMove).into_iter().find_map(|op| match op {
            CueOp::Volume(v) => Some(v),
            _ => None,
        });
        assert!((volume.unwrap() - 0.5).abs() < 1e-5);

        s.lock_state = LockState::Turn;
        let out = fb.update(&s, &[]);
        assert_eq!(ops(&out, Cue::PickMove), vec![CueOp::Volume(0.0)]);
    }

    #[test]
    fn test_reset_pauses_running_loops() {
        let mut fb = FeedbackOrchestrator::default();
        let mut s = state();
        s.lock_state = LockState::Turn;
        fb.update(&s, &[]);
        let out = fb.reset();
        assert_eq!(out, vec![CueCommand::new(Cue::Picking, CueOp::Pause)]);
        assert!(fb.reset().is_empty());
    }

    #[test]
    fn test_bank_missing_handles_are_noops() {
        let mut bank = CueBank::default();
        bank.apply(&[
            CueCommand::new(Cue::Unlock, CueOp::Restart),
            CueCommand::new(Cue::Tension, CueOp::Volume(0.3)),
        ]);
        assert!(!bank.has(Cue::Unlock));
    }

    #[test]
    fn test_bank_restart_rewinds_playing_one_shot() {
        let mut bank = CueBank::default();
        let voice = VirtualVoice::new();
        bank.insert(Cue::Unlock, Box::new(voice.clone()));
        let restart = [CueCommand::new(Cue::Unlock, CueOp::Restart)];
        bank.apply(&restart);
        bank.apply(&restart);
        let st = voice.state();
        assert!(st.playing);
        assert_eq!(st.starts, 2);
    }

    #[test]
    fn test_bank_pause_resume_does_not_restart() {
        let mut bank = CueBank::default();
        let voice = VirtualVoice::new();
        bank.insert(Cue::Picking, Box::new(voice.clone()));
        bank.apply(&[
            CueCommand::new(Cue::Picking, CueOp::Resume),
            CueCommand::new(Cue::Picking, CueOp::Pause),
            CueCommand::new(Cue::Picking, CueOp::Resume),
        ]);
        assert_eq!(voice.state().starts, 1);
        assert!(voice.state().playing);
    }

    #[test]
    fn test_bank_volume_scaling() {
        let mut bank = CueBank::default();
        let tension = VirtualVoice::new();
        let pick_move = VirtualVoice::new();
        bank.insert(Cue::Tension, Box::new(tension.clone()));
        bank.insert_named("pick-move", Box::new(pick_move.clone()));
        // 0.75 tension volume * 0.8 master
        assert!((tension.state().volume - 0.6).abs() < 1e-6);

        bank.apply(&[CueCommand::new(Cue::PickMove, CueOp::Volume(0.5))]);
        assert!((pick_move.state().volume - 0.4).abs() < 1e-6);

        bank.set_muted(true);
        assert_eq!(tension.state().volume, 0.0);
        assert_eq!(pick_move.state().volume, 0.0);
        bank.set_muted(false);
        assert!((pick_move.state().volume - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_insert_unknown_name() {
        let mut bank = CueBank::default();
        assert!(!bank.insert_named("kazoo", Box::new(VirtualVoice::new())));
    }
}
