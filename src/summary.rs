//! End-of-run summary
//!
//! Points plus how many locks of each tier were opened.

use serde::{Deserialize, Serialize};

use crate::sim::LockLevel;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub points: u64,
    /// Opened locks per tier, VeryEasy..VeryHard
    pub per_level: [u32; 5],
}

impl GameSummary {
    pub fn new(points: u64, completed: &[LockLevel]) -> Self {
        let mut per_level = [0; 5];
        for level in completed {
            per_level[level.index()] += 1;
        }
        Self { points, per_level }
    }

    pub fn count(&self, level: LockLevel) -> u32 {
        self.per_level[level.index()]
    }

    pub fn total_locks(&self) -> u32 {
        self.per_level.iter().sum()
    }

    /// `(label, count)` rows in tier order
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        LockLevel::ALL
            .iter()
            .map(move |level| (level.as_str(), self.count(*level)))
    }
}
