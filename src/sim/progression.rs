//! Score, combo, experience and distance bookkeeping

use serde::{Deserialize, Serialize};

use crate::tuning::{KillReward, Tuning};

/// Points granted for one kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillAward {
    pub score: u64,
    pub xp: u64,
    /// Combo count after this kill
    pub combo: u32,
}

/// Run progression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    /// Current kill streak
    pub combo: u32,
    /// Ticks left before the streak resets
    pub combo_timer: u32,
    pub best_combo: u32,
    pub kills: u32,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    /// Total distance travelled
    pub distance: f32,
    /// 1 + one tier per `difficulty_distance_step`
    pub difficulty: u32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            combo: 0,
            combo_timer: 0,
            best_combo: 0,
            kills: 0,
            level: 1,
            xp: 0,
            xp_to_next: tuning.initial_xp_threshold,
            distance: 0.0,
            difficulty: 1,
        }
    }

    /// Extend the combo and bank the score for a kill.
    ///
    /// The bonus `combo * multiplier` only applies from the second kill in a
    /// streak. Experience is returned for the caller to feed into
    /// [`Progression::add_experience`] so level-up side effects stay with it.
    pub fn register_kill(&mut self, reward: &KillReward, combo_window: u32) -> KillAward {
        self.combo += 1;
        self.combo_timer = combo_window;
        self.best_combo = self.best_combo.max(self.combo);
        self.kills += 1;

        let bonus = if self.combo > 1 {
            u64::from(self.combo) * reward.combo_multiplier
        } else {
            0
        };
        let score = reward.score + bonus;
        self.score += score;

        KillAward {
            score,
            xp: reward.xp + bonus,
            combo: self.combo,
        }
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score += amount;
    }

    /// Add experience and apply every level-up it pays for.
    /// Returns the levels reached, in order.
    pub fn add_experience(&mut self, amount: u64, growth: f32) -> Vec<u32> {
        self.xp += amount;
        let mut reached = Vec::new();
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            self.xp_to_next = ((self.xp_to_next as f64 * f64::from(growth)).floor() as u64).max(1);
            reached.push(self.level);
        }
        reached
    }

    /// Break the streak (player took damage)
    pub fn reset_combo(&mut self) {
        self.combo = 0;
        self.combo_timer = 0;
    }

    /// Count down the streak window. Returns true on the tick it expires.
    pub fn tick_combo(&mut self) -> bool {
        if self.combo_timer == 0 {
            return false;
        }
        self.combo_timer -= 1;
        if self.combo_timer == 0 {
            self.combo = 0;
            return true;
        }
        false
    }

    /// Add distance and recompute the difficulty tier
    pub fn advance_distance(&mut self, amount: f32, tier_step: f32) {
        self.distance += amount;
        self.difficulty = 1 + (self.distance / tier_step).floor() as u32;
    }

    /// Whole distance units travelled
    pub fn distance_units(&self) -> u64 {
        self.distance.floor() as u64
    }
}
