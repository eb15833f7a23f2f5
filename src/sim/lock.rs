//! Lock generation and pick zones
//!
//! Zone parameters are authored on a half-turn scale `[0, π]`: `start` is the offset
//! from one side and `length` the width. The pick sweeps the other way, so the zone in
//! pick-angle space is `(π/2 - start - length, π/2 - start)`.

use std::f32::consts::{FRAC_PI_2, PI};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::LOCK_POINTS;

/// Lock difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockLevel {
    VeryEasy,
    Easy,
    Average,
    Hard,
    VeryHard,
}

impl LockLevel {
    /// All tiers, easiest first
    pub const ALL: [LockLevel; 5] = [
        LockLevel::VeryEasy,
        LockLevel::Easy,
        LockLevel::Average,
        LockLevel::Hard,
        LockLevel::VeryHard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LockLevel::VeryEasy => "Very Easy",
            LockLevel::Easy => "Easy",
            LockLevel::Average => "Average",
            LockLevel::Hard => "Hard",
            LockLevel::VeryHard => "Very Hard",
        }
    }

    /// Points awarded for opening a lock of this tier
    pub fn points(&self) -> u32 {
        LOCK_POINTS[self.index()]
    }

    /// Angular width of the pick zone (higher reward, narrower zone)
    pub fn zone_width(&self) -> f32 {
        PI / self.points() as f32
    }

    pub fn index(&self) -> usize {
        match self {
            LockLevel::VeryEasy => 0,
            LockLevel::Easy => 1,
            LockLevel::Average => 2,
            LockLevel::Hard => 3,
            LockLevel::VeryHard => 4,
        }
    }
}

/// A lock: difficulty plus where its pick zone sits
///
/// Immutable once created. A solved lock is replaced, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lock {
    pub level: LockLevel,
    /// Zone lower bound on the half-turn scale (radians)
    pub start: f32,
    /// Zone width (radians)
    pub length: f32,
    /// Reward for opening it
    pub points: u32,
}

impl Lock {
    /// Build a lock of the given tier, clamping `start` so the zone fits in `[0, π]`
    pub fn new(level: LockLevel, start: f32) -> Self {
        let length = level.zone_width();
        Self {
            level,
            start: start.clamp(0.0, PI - length),
            length,
            points: level.points(),
        }
    }

    /// Pick a tier uniformly, then place its zone uniformly inside `[0, π]`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let level = LockLevel::ALL[rng.random_range(0..LockLevel::ALL.len())];
        let length = level.zone_width();
        let start = rng.random::<f32>() * (PI - length);
        let lock = Self::new(level, start);
        log::info!(
            "New lock: {} ({} pts), zone {:.3}..{:.3}",
            level.as_str(),
            lock.points,
            lock.start,
            lock.start + lock.length
        );
        lock
    }

    /// Zone bounds in pick-angle space as `(low, high)`, both exclusive
    pub fn zone_bounds(&self) -> (f32, f32) {
        let high = FRAC_PI_2 - self.start;
        (high - self.length, high)
    }

    /// Is the pick inside the zone? Open interval: the edges don't count.
    pub fn contains(&self, pick_angle: f32) -> bool {
        let (low, high) = self.zone_bounds();
        pick_angle < high && pick_angle > low
    }
}
