//! Hazard spawning
//!
//! One hazard per interval; the interval shrinks as difficulty climbs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Hazard, HazardKind};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Ticks since the last spawn
    pub timer: u32,
}

impl SpawnDirector {
    /// Ticks between spawns at a difficulty tier
    pub fn interval(difficulty: u32, tuning: &Tuning) -> u32 {
        tuning
            .spawn_interval
            .saturating_sub(difficulty.saturating_mul(tuning.spawn_interval_step))
            .max(tuning.spawn_interval_min)
    }

    /// Advance the timer; once it passes the interval, pick a kind
    pub fn update(&mut self, difficulty: u32, rng: &mut impl Rng, tuning: &Tuning) -> Option<HazardKind> {
        self.timer += 1;
        if self.timer <= Self::interval(difficulty, tuning) {
            return None;
        }
        self.timer = 0;
        if rng.random::<f32>() < tuning.enemy_probability {
            Some(HazardKind::Enemy)
        } else {
            Some(HazardKind::Asteroid)
        }
    }

    /// Build a hazard of `kind` at the far bound
    pub fn spawn(kind: HazardKind, id: u32, difficulty: u32, rng: &mut impl Rng, tuning: &Tuning) -> Hazard {
        let hazard = match kind {
            HazardKind::Enemy => Hazard::enemy(id, difficulty, rng, tuning),
            HazardKind::Asteroid => Hazard::asteroid(id, difficulty, rng, tuning),
        };
        log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, hazard.pos.x, hazard.pos.y);
        hazard
    }
}
