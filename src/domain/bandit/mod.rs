//! Process-wide epsilon-greedy bandit over the four trait axes.
//!
//! One instance is built at startup and shared by every assessment session.
//! Each update holds the lock for the increment and the blend together, so
//! concurrent captures on the same axis never lose an update.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::domain::personality::TraitAxis;

/// Running estimate for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ArmStats {
    pub value: f64,
    pub visits: u64,
}

/// Shared bandit state.
#[derive(Debug, Default)]
pub struct BanditState {
    arms: Mutex<[ArmStats; 4]>,
}

impl BanditState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, [ArmStats; 4]> {
        self.arms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Picks an axis among `available`.
    ///
    /// With probability `exploration_rate` the pick is uniform; otherwise the
    /// highest running value wins, ties going to the earlier axis. Returns
    /// `None` only when `available` is empty.
    pub fn choose_axis<R: Rng + ?Sized>(
        &self,
        exploration_rate: f64,
        available: &[TraitAxis],
        rng: &mut R,
    ) -> Option<TraitAxis> {
        if available.is_empty() {
            return None;
        }
        if rng.gen::<f64>() < exploration_rate {
            return available.choose(rng).copied();
        }
        let arms = self.lock();
        let mut best: Option<(TraitAxis, f64)> = None;
        for axis in TraitAxis::ALL {
            if !available.contains(&axis) {
                continue;
            }
            let value = arms[axis.index()].value;
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((axis, value)),
            }
        }
        best.map(|(axis, _)| axis)
    }

    /// Incremental-mean update: bump the visit count, then blend in the reward.
    pub fn update(&self, axis: TraitAxis, reward: f64) {
        let mut arms = self.lock();
        let arm = &mut arms[axis.index()];
        arm.visits += 1;
        arm.value += (reward - arm.value) / arm.visits as f64;
        tracing::debug!(
            axis = %axis,
            reward,
            value = arm.value,
            visits = arm.visits,
            "bandit arm updated"
        );
    }

    /// Snapshot of all arms in axis order.
    pub fn snapshot(&self) -> [ArmStats; 4] {
        *self.lock()
    }
}

/// Reward for a capture: the drop in uncertainty, never negative.
///
/// `None` when there is no previous uncertainty to compare against.
pub fn information_gain(previous: Option<f64>, current: f64) -> Option<f64> {
    previous.map(|prev| (prev - current).max(0.0))
}
