//! Rotating missions
//!
//! One mission is active at a time. Lifecycle:
//! active → completed → (delay) → active(new). New missions are drawn
//! uniformly from the four kinds; repeats are allowed.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Objective kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    DestroyAsteroids,
    DestroyEnemies,
    SurviveDistance,
    ReachCombo,
}

impl MissionKind {
    pub const ALL: [MissionKind; 4] = [
        MissionKind::DestroyAsteroids,
        MissionKind::DestroyEnemies,
        MissionKind::SurviveDistance,
        MissionKind::ReachCombo,
    ];

    /// Inclusive target range
    pub fn target_range(self) -> (u32, u32) {
        match self {
            MissionKind::DestroyAsteroids => (15, 30),
            MissionKind::DestroyEnemies => (10, 20),
            MissionKind::SurviveDistance => (2000, 5000),
            MissionKind::ReachCombo => (5, 15),
        }
    }

    /// Description template; `{n}` is replaced by the target
    pub fn template(self) -> &'static str {
        match self {
            MissionKind::DestroyAsteroids => "Destroy {n} asteroids",
            MissionKind::DestroyEnemies => "Destroy {n} enemies",
            MissionKind::SurviveDistance => "Travel {n}m",
            MissionKind::ReachCombo => "Reach {n}x combo",
        }
    }
}

/// The active objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub target: u32,
    pub current: u32,
    pub completed: bool,
    pub description: String,
}

impl Mission {
    pub fn new(kind: MissionKind, target: u32) -> Self {
        Self {
            kind,
            target,
            current: 0,
            completed: false,
            description: kind.template().replace("{n}", &target.to_string()),
        }
    }

    /// Mission of a given kind with a random target in its range
    pub fn generate(kind: MissionKind, rng: &mut impl Rng) -> Self {
        let (min, max) = kind.target_range();
        Self::new(kind, rng.random_range(min..=max))
    }

    /// Mission of a random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        let kind = MissionKind::ALL[rng.random_range(0..MissionKind::ALL.len())];
        Self::generate(kind, rng)
    }

    /// Progress shown to the player, clamped to the target
    pub fn displayed_current(&self) -> u32 {
        self.current.min(self.target)
    }

    /// Completion percentage in [0, 100]
    pub fn percent(&self) -> f32 {
        if self.target == 0 {
            return 100.0;
        }
        (self.current as f32 / self.target as f32 * 100.0).min(100.0)
    }

    /// Count one kill of `kind`. Returns true if progress changed.
    pub fn record_kill(&mut self, kind: MissionKind) -> bool {
        if self.completed || self.kind != kind {
            return false;
        }
        self.current += 1;
        true
    }

    /// Combo objective only advances once the combo reaches the target
    pub fn record_combo(&mut self, combo: u32) -> bool {
        if self.completed || self.kind != MissionKind::ReachCombo || combo < self.target {
            return false;
        }
        self.current = combo;
        true
    }

    /// Distance objective tracks total distance travelled
    pub fn record_distance(&mut self, distance: u64) -> bool {
        if self.completed || self.kind != MissionKind::SurviveDistance {
            return false;
        }
        let distance = u32::try_from(distance).unwrap_or(u32::MAX);
        if distance == self.current {
            return false;
        }
        self.current = distance;
        true
    }

    /// Mark completed if the target is reached. Returns true exactly once.
    pub fn check_completion(&mut self) -> bool {
        if !self.completed && self.current >= self.target {
            self.completed = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_description_uses_target() {
        let mission = Mission::new(MissionKind::DestroyAsteroids, 22);
        assert_eq!(mission.description, "Destroy 22 asteroids");
        assert_eq!(Mission::new(MissionKind::SurviveDistance, 3000).description, "Travel 3000m");
        assert_eq!(Mission::new(MissionKind::ReachCombo, 7).description, "Reach 7x combo");
    }

    #[test]
    fn test_kill_progress_only_for_matching_kind() {
        let mut mission = Mission::new(MissionKind::DestroyEnemies, 2);
        assert!(!mission.record_kill(MissionKind::DestroyAsteroids));
        assert!(mission.record_kill(MissionKind::DestroyEnemies));
        assert!(!mission.check_completion());
        assert!(mission.record_kill(MissionKind::DestroyEnemies));
        assert!(mission.check_completion());
        // Exactly once
        assert!(!mission.check_completion());
        // No more progress after completion
        assert!(!mission.record_kill(MissionKind::DestroyEnemies));
        assert_eq!(mission.current, 2);
    }

    #[test]
    fn test_combo_progress_jumps_at_target() {
        let mut mission = Mission::new(MissionKind::ReachCombo, 5);
        for combo in 1..5 {
            assert!(!mission.record_combo(combo));
        }
        assert_eq!(mission.current, 0);
        assert!(mission.record_combo(6));
        assert_eq!(mission.current, 6);
        assert_eq!(mission.displayed_current(), 5);
        assert_eq!(mission.percent(), 100.0);
        assert!(mission.check_completion());
    }

    #[test]
    fn test_distance_progress() {
        let mut mission = Mission::new(MissionKind::SurviveDistance, 2000);
        assert!(mission.record_distance(1000));
        assert!(!mission.record_distance(1000));
        assert_eq!(mission.percent(), 50.0);
        assert!(mission.record_distance(2000));
        assert!(mission.check_completion());
    }

    #[test]
    fn test_random_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(Mission::random(&mut rng).kind);
        }
        assert_eq!(seen.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_generated_targets_in_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for kind in MissionKind::ALL {
                let mission = Mission::generate(kind, &mut rng);
                let (min, max) = kind.target_range();
                prop_assert!(mission.target >= min && mission.target <= max);
                prop_assert_eq!(
                    mission.description.clone(),
                    kind.template().replace("{n}", &mission.target.to_string())
                );
                prop_assert!(!mission.completed);
                prop_assert_eq!(mission.current, 0);
            }
        }
    }
}
