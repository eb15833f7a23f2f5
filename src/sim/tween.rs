//! One-shot timed tasks: positional tweens and plain delays
//!
//! A task is owned through an `Option` handle. Replacing or clearing the handle cancels
//! it; a finished task reports completion exactly once.

use glam::Vec3;

/// Easing curve applied to normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Accelerating (quadratic in)
    QuadIn,
    /// Decelerating (quadratic out)
    QuadOut,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
        }
    }
}

/// Result of advancing a task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<T> {
    Running(T),
    /// Final value; only reported once
    Finished(T),
}

/// Interpolates a position from `from` to `to` over `duration` seconds
#[derive(Debug, Clone)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    done: bool,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
            done: false,
        }
    }

    /// Normalized progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> Vec3 {
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Advance by `dt`. Returns `None` once completion has already been reported.
    pub fn advance(&mut self, dt: f32) -> Option<Step<Vec3>> {
        if self.done {
            return None;
        }
        self.elapsed += dt.max(0.0);
        if self.progress() >= 1.0 {
            self.done = true;
            Some(Step::Finished(self.to))
        } else {
            Some(Step::Running(self.value()))
        }
    }
}

/// Fires once after `duration` seconds
#[derive(Debug, Clone)]
pub struct Delay {
    remaining: f32,
    done: bool,
}

impl Delay {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
            done: false,
        }
    }

    /// Returns `true` exactly once, on the tick the delay runs out
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.done {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.done = true;
            return true;
        }
        false
    }
}
