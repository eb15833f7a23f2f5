//! Input session
//!
//! Platform callbacks feed events in here; the frame driver takes one `TickInput` per
//! tick. The session only records, it never touches simulation state. While stopped,
//! every event is dropped.

use glam::Vec2;

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// Pointer buttons we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Other,
}

impl PointerButton {
    /// From a DOM `MouseEvent.button` index
    pub fn from_index(button: i16) -> Self {
        if button == 0 {
            PointerButton::Primary
        } else {
            PointerButton::Other
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputSession {
    bindings: KeyBindings,
    active: bool,
    button_held: bool,
    key_held: bool,
    debug_key_held: bool,
    samples: Vec<Vec2>,
    left: bool,
    toggle_debug: bool,
}

impl InputSession {
    /// New session, stopped until the first pick is ready
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            active: false,
            button_held: false,
            key_held: false,
            debug_key_held: false,
            samples: Vec::new(),
            left: false,
            toggle_debug: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin listening
    pub fn start(&mut self) {
        if !self.active {
            log::debug!("Input session started");
        }
        self.active = true;
    }

    /// Stop listening and forget anything held or pending
    pub fn stop(&mut self) {
        if self.active {
            log::debug!("Input session stopped");
        }
        self.active = false;
        self.button_held = false;
        self.key_held = false;
        self.debug_key_held = false;
        self.samples.clear();
        self.left = false;
        self.toggle_debug = false;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.active && x.is_finite() && y.is_finite() {
            self.samples.push(Vec2::new(x, y));
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.active {
            self.left = true;
        }
    }

    pub fn pointer_down(&mut self, button: PointerButton) {
        if self.active && button == PointerButton::Primary {
            self.button_held = true;
        }
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        if self.active && button == PointerButton::Primary {
            self.button_held = false;
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if !self.active {
            return;
        }
        if key == self.bindings.apply_force {
            self.key_held = true;
        } else if key.eq_ignore_ascii_case(&self.bindings.toggle_debug) {
            // Auto-repeat doesn't toggle again
            if !self.debug_key_held {
                self.toggle_debug = !self.toggle_debug;
            }
            self.debug_key_held = true;
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if !self.active {
            return;
        }
        if key == self.bindings.apply_force {
            self.key_held = false;
        } else if key.eq_ignore_ascii_case(&self.bindings.toggle_debug) {
            self.debug_key_held = false;
        }
    }

    /// Force is applied while either the button or the key is held
    pub fn force_held(&self) -> bool {
        self.button_held || self.key_held
    }

    /// Everything since the last call, as input for one tick
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            apply_force: self.force_held(),
            pointer_samples: std::mem::take(&mut self.samples),
            pointer_left: std::mem::take(&mut self.left),
            toggle_debug: std::mem::take(&mut self.toggle_debug),
        }
    }
}

impl Default for InputSession {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> InputSession {
        let mut session = InputSession::default();
        session.start();
        session
    }

    #[test]
    fn test_stopped_session_drops_events() {
        let mut session = InputSession::default();
        session.pointer_move(10.0, 10.0);
        session.pointer_down(PointerButton::Primary);
        session.key_down("d");
        let input = session.take_tick_input();
        assert!(!input.apply_force);
        assert!(input.pointer_samples.is_empty());
        assert!(!input.toggle_debug);
    }

    #[test]
    fn test_button_or_key_applies_force() {
        let mut session = active();
        session.pointer_down(PointerButton::Primary);
        assert!(session.take_tick_input().apply_force);
        session.key_down(" ");
        session.pointer_up(PointerButton::Primary);
        assert!(session.take_tick_input().apply_force);
        session.key_up(" ");
        assert!(!session.take_tick_input().apply_force);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut session = active();
        session.pointer_down(PointerButton::from_index(2));
        assert!(!session.force_held());
    }

    #[test]
    fn test_held_force_persists_across_ticks() {
        let mut session = active();
        session.pointer_down(PointerButton::Primary);
        assert!(session.take_tick_input().apply_force);
        assert!(session.take_tick_input().apply_force);
    }

    #[test]
    fn test_samples_consumed_once() {
        let mut session = active();
        session.pointer_move(1.0, 2.0);
        session.pointer_move(3.0, 4.0);
        session.pointer_leave();
        let input = session.take_tick_input();
        assert_eq!(input.pointer_samples, vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        assert!(input.pointer_left);
        let input = session.take_tick_input();
        assert!(input.pointer_samples.is_empty());
        assert!(!input.pointer_left);
    }

    #[test]
    fn test_debug_toggle_ignores_repeat() {
        let mut session = active();
        session.key_down("d");
        session.key_down("d");
        session.key_down("D");
        assert!(session.take_tick_input().toggle_debug);
        session.key_up("d");
        session.key_down("d");
        assert!(session.take_tick_input().toggle_debug);
        assert!(!session.take_tick_input().toggle_debug);
    }

    #[test]
    fn test_stop_releases_held_force() {
        let mut session = active();
        session.pointer_down(PointerButton::Primary);
        session.key_down(" ");
        session.stop();
        session.start();
        assert!(!session.take_tick_input().apply_force);
    }

    #[test]
    fn test_custom_bindings() {
        let mut session = InputSession::new(KeyBindings {
            apply_force: "f".to_string(),
            toggle_debug: "x".to_string(),
        });
        session.start();
        session.key_down(" ");
        assert!(!session.force_held());
        session.key_down("f");
        assert!(session.force_held());
    }
}
