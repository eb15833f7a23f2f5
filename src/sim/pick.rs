//! Pick lifecycle: enter → in use → fall
//!
//! Durability only drains while the lock is jammed. When it runs out the pick falls
//! out of view; once the fall finishes a fresh pick slides in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::tween::{Easing, Step, Tween};
use crate::consts::*;
use crate::settings::Tuning;

/// Pick lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickState {
    /// Sliding into place, not interactive
    Enter,
    /// Interactive
    InUse,
    /// Broken and falling away, not interactive
    Fall,
}

/// Outcome of wearing the pick down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    Intact,
    /// Durability just ran out; reported once per pick
    Broke,
}

/// Completed lifecycle animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTransition {
    /// Fall animation done; a replacement can be spawned
    Fallen,
    /// Entry animation done; the pick is now in use
    Entered,
}

/// The current pick
#[derive(Debug, Clone)]
pub struct Pick {
    pub state: PickState,
    /// Seconds of jamming left
    pub life: f32,
    /// Rotation about the lock axis
    pub angle: f32,
    pub position: Vec3,
    /// Running enter/fall animation. Replacing it cancels the old one.
    motion: Option<Tween>,
}

impl Pick {
    /// A fresh pick at the spawn point, already sliding in
    pub fn spawned(tuning: &Tuning) -> Self {
        let mut pick = Self {
            state: PickState::Fall,
            life: 0.0,
            angle: 0.0,
            position: rest_position(),
            motion: None,
        };
        pick.enter(tuning);
        pick
    }

    pub fn is_in_use(&self) -> bool {
        self.state == PickState::InUse
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Reset to the spawn point with full durability and start the entry animation
    pub fn enter(&mut self, tuning: &Tuning) {
        self.life = tuning.pick_lifetime;
        self.angle = 0.0;
        self.position = Vec3::new(PICK_POSITION[0], PICK_FALL_FROM, PICK_POSITION[2]);
        self.state = PickState::Enter;
        self.motion = Some(Tween::new(
            self.position,
            rest_position(),
            tuning.enter_duration,
            Easing::QuadOut,
        ));
        log::debug!("Pick entering");
    }

    /// Drain durability while jammed
    pub fn wear(&mut self, dt: f32) -> Wear {
        self.life -= dt.max(0.0);

        if self.life > 0.0 {
            return Wear::Intact;
        }

        // Already broken and on its way out
        if self.state == PickState::Fall {
            return Wear::Intact;
        }

        Wear::Broke
    }

    /// Start falling off-screen
    pub fn fall(&mut self, tuning: &Tuning) {
        self.state = PickState::Fall;
        let to = Vec3::new(self.position.x, PICK_FALL_TO, self.position.z);
        self.motion = Some(Tween::new(self.position, to, tuning.fall_duration, Easing::QuadIn));
        log::debug!("Pick falling");
    }

    /// Advance the running animation, reporting when it completes
    pub fn animate(&mut self, dt: f32) -> Option<PickTransition> {
        let tween = self.motion.as_mut()?;
        match tween.advance(dt)? {
            Step::Running(pos) => {
                self.position = pos;
                None
            }
            Step::Finished(pos) => {
                self.position = pos;
                self.motion = None;
                match self.state {
                    PickState::Fall => Some(PickTransition::Fallen),
                    PickState::Enter => {
                        self.state = PickState::InUse;
                        log::debug!("Pick in use");
                        Some(PickTransition::Entered)
                    }
                    PickState::InUse => None,
                }
            }
        }
    }
}

fn rest_position() -> Vec3 {
    Vec3::from_array(PICK_POSITION)
}
