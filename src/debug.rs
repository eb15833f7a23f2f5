//! Debug overlay
//!
//! Two flat wedges behind the lock: the whole sweep in red and the pick zone in green.
//! Rebuilt from the current lock every time the overlay is shown. Purely visual.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::sim::Lock;

/// A cylinder-sector wedge, angles in the lock's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub theta_start: f32,
    /// Signed sweep; negative runs clockwise
    pub theta_length: f32,
    pub radius: f32,
    /// Offset behind the lock face
    pub depth: f32,
    pub color: [f32; 3],
}

const WEDGE_RADIUS: f32 = 0.05;
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// Wedges for the full sweep and the lock's zone
pub fn build_wedges(lock: &Lock) -> [Wedge; 2] {
    let sweep = Wedge {
        theta_start: -FRAC_PI_2,
        theta_length: -PI,
        radius: WEDGE_RADIUS,
        depth: -0.055,
        color: RED,
    };
    let zone = Wedge {
        theta_start: -FRAC_PI_2 - lock.start,
        theta_length: -lock.length,
        radius: WEDGE_RADIUS,
        // Just in front of the sweep so it isn't z-fighting
        depth: -0.054,
        color: GREEN,
    };
    [sweep, zone]
}

#[derive(Debug, Clone, Default)]
pub struct DebugOverlay {
    wedges: Vec<Wedge>,
}

impl DebugOverlay {
    pub fn is_visible(&self) -> bool {
        !self.wedges.is_empty()
    }

    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    pub fn show(&mut self, lock: &Lock) {
        self.wedges = build_wedges(lock).to_vec();
    }

    pub fn hide(&mut self) {
        self.wedges.clear();
    }

    /// Match the simulation's visibility flag
    pub fn sync(&mut self, visible: bool, lock: &Lock) {
        match (visible, self.is_visible()) {
            (true, false) => self.show(lock),
            (false, true) => self.hide(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LockLevel;

    #[test]
    fn test_wedges_from_lock() {
        let lock = Lock::new(LockLevel::Average, 1.0);
        let [sweep, zone] = build_wedges(&lock);
        assert_eq!(sweep.theta_length, -PI);
        assert!((zone.theta_start - (-FRAC_PI_2 - 1.0)).abs() < 1e-6);
        assert!((zone.theta_length + PI / 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_show_hide_sync() {
        let lock = Lock::new(LockLevel::Easy, 0.2);
        let mut overlay = DebugOverlay::default();
        assert!(!overlay.is_visible());
        overlay.sync(true, &lock);
        assert_eq!(overlay.wedges().len(), 2);
        overlay.sync(false, &lock);
        assert!(overlay.wedges().is_empty());
    }

    #[test]
    fn test_rebuilt_for_new_lock() {
        let mut overlay = DebugOverlay::default();
        overlay.show(&Lock::new(LockLevel::Easy, 0.2));
        overlay.hide();
        let lock = Lock::new(LockLevel::VeryHard, 2.0);
        overlay.show(&lock);
        assert!((overlay.wedges()[1].theta_length + lock.length).abs() < 1e-6);
    }
}
