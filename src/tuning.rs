//! Game balance table
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Loaded from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::secs_to_ticks;
use crate::sim::HazardKind;

/// Errors from loading or validating a tuning table
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Per-hazard-kind reward and contact numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillReward {
    /// Base score for a kill
    pub score: u64,
    /// Base experience for a kill
    pub xp: u64,
    /// Combo bonus per combo step (applied when combo > 1)
    pub combo_multiplier: u64,
    /// Nitro charge granted
    pub nitro_charge: f32,
    /// Damage dealt to the player on contact
    pub contact_damage: u32,
    /// Explosion particle budget (render hint)
    pub explosion_magnitude: f32,
    /// Camera shake on explosion
    pub explosion_shake: f32,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Projectile depth speed per tick
    pub projectile_speed: f32,
    /// Extra projectile speed per unit of speed multiplier
    pub projectile_boost_factor: f32,
    /// Enemy depth speed per tick at difficulty 0
    pub enemy_base_speed: f32,
    /// Enemy speed added per difficulty tier
    pub enemy_speed_per_difficulty: f32,
    /// Asteroid depth speed per tick at difficulty 0
    pub asteroid_base_speed: f32,
    /// Asteroid speed added per difficulty tier
    pub asteroid_speed_per_difficulty: f32,
    /// Extra hazard speed per unit of speed multiplier
    pub hazard_boost_factor: f32,
    /// Star field speed
    pub star_speed: f32,
    pub star_boost_factor: f32,
    /// Grid scroll speed
    pub grid_speed: f32,
    pub grid_boost_factor: f32,
    /// Distance gained per tick
    pub distance_per_tick: f32,
    /// Extra distance per tick per unit of speed multiplier
    pub distance_boost_factor: f32,

    // === Player ===
    /// Fraction of the gap to the target closed each tick
    pub player_easing: f32,
    /// Horizontal target step per tick while a move intent is held
    pub move_step: f32,
    /// Vertical step as a fraction of the horizontal one
    pub vertical_move_scale: f32,
    /// Minimum milliseconds between accepted fire intents
    pub fire_interval_ms: f64,

    // === Spawning / difficulty ===
    /// Distance per difficulty tier
    pub difficulty_distance_step: f32,
    /// Spawn interval at difficulty 0 (ticks)
    pub spawn_interval: u32,
    /// Interval reduction per difficulty tier
    pub spawn_interval_step: u32,
    /// Floor on the spawn interval
    pub spawn_interval_min: u32,
    /// Chance a spawn is an enemy (otherwise asteroid)
    pub enemy_probability: f32,

    // === Collision ===
    /// Radius used for sizeless targets
    pub default_collision_radius: f32,
    /// Floor on sized target radius
    pub min_collision_radius: f32,
    /// Added to hazard size to get the collision radius
    pub collision_padding: f32,
    /// Extra radius around an asteroid that counts as a graze
    pub graze_margin: f32,
    /// Enemy vs player contact distance
    pub enemy_contact_distance: f32,
    /// Added to asteroid size for the player contact distance
    pub asteroid_contact_padding: f32,

    // === Rewards ===
    pub enemy: KillReward,
    pub asteroid: KillReward,

    // === Progression ===
    /// Ticks a combo survives without a kill
    pub combo_window_ticks: u32,
    /// Combo count at which the HUD shows max styling
    pub combo_max_style: u32,
    /// Experience needed for level 2
    pub initial_xp_threshold: u64,
    /// Threshold growth per level
    pub xp_growth: f32,
    /// Health restored per level-up
    pub level_up_heal: u32,

    // === Missions ===
    pub mission_reward_xp: u64,
    pub mission_reward_score: u64,
    /// Frames between completion and the next mission
    pub mission_replace_delay: u32,
    /// Frames before the mission card first shows
    pub mission_card_delay: u32,
    /// Frames the mission card stays visible
    pub mission_card_visible: u32,
    /// Frames a notification stays up
    pub notification_ticks: u32,

    // === Nitro ===
    pub boost_multiplier: f32,
    pub boost_duration_ticks: u32,

    // === Camera shake ===
    pub shake_decay: f32,
    pub shake_floor: f32,
    pub shake_on_damage: f32,
    pub shake_on_player_explode: f32,
    pub shake_on_level_up: f32,
    pub shake_on_boost: f32,
    pub shake_while_boosting: f32,
    /// Explosion magnitude when the player ship blows up
    pub player_explosion_magnitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Movement
            projectile_speed: 25.0,
            projectile_boost_factor: 20.0,
            enemy_base_speed: 8.0,
            enemy_speed_per_difficulty: 0.5,
            asteroid_base_speed: 6.0,
            asteroid_speed_per_difficulty: 0.3,
            hazard_boost_factor: 15.0,
            star_speed: 20.0,
            star_boost_factor: 30.0,
            grid_speed: 10.0,
            grid_boost_factor: 20.0,
            distance_per_tick: 1.0,
            distance_boost_factor: 2.0,

            // Player
            player_easing: 0.12,
            move_step: 8.0,
            vertical_move_scale: 0.6,
            fire_interval_ms: 150.0,

            // Spawning
            difficulty_distance_step: 500.0,
            spawn_interval: 60,
            spawn_interval_step: 2,
            spawn_interval_min: 30,
            enemy_probability: 0.6,

            // Collision
            default_collision_radius: 30.0,
            min_collision_radius: 20.0,
            collision_padding: 10.0,
            graze_margin: 15.0,
            enemy_contact_distance: 40.0,
            asteroid_contact_padding: 20.0,

            // Rewards
            enemy: KillReward {
                score: 100,
                xp: 20,
                combo_multiplier: 20,
                nitro_charge: 0.12,
                contact_damage: 20,
                explosion_magnitude: 35.0,
                explosion_shake: 8.0,
            },
            asteroid: KillReward {
                score: 50,
                xp: 10,
                combo_multiplier: 10,
                nitro_charge: 0.08,
                contact_damage: 15,
                explosion_magnitude: 40.0,
                explosion_shake: 6.0,
            },

            // Progression
            combo_window_ticks: 180,
            combo_max_style: 5,
            initial_xp_threshold: 100,
            xp_growth: 1.5,
            level_up_heal: 25,

            // Missions
            mission_reward_xp: 500,
            mission_reward_score: 1000,
            mission_replace_delay: secs_to_ticks(3.0),
            mission_card_delay: secs_to_ticks(2.0),
            mission_card_visible: secs_to_ticks(5.0),
            notification_ticks: secs_to_ticks(2.0),

            // Nitro
            boost_multiplier: 1.8,
            boost_duration_ticks: secs_to_ticks(2.5),

            // Camera shake
            shake_decay: 0.9,
            shake_floor: 0.1,
            shake_on_damage: 10.0,
            shake_on_player_explode: 15.0,
            shake_on_level_up: 10.0,
            shake_on_boost: 12.0,
            shake_while_boosting: 2.0,
            player_explosion_magnitude: 50.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning table from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let speeds = [
            ("projectile_speed", self.projectile_speed),
            ("enemy_base_speed", self.enemy_base_speed),
            ("asteroid_base_speed", self.asteroid_base_speed),
            ("star_speed", self.star_speed),
            ("grid_speed", self.grid_speed),
            ("distance_per_tick", self.distance_per_tick),
            ("move_step", self.move_step),
            ("projectile_boost_factor", self.projectile_boost_factor),
            ("hazard_boost_factor", self.hazard_boost_factor),
            ("star_boost_factor", self.star_boost_factor),
            ("grid_boost_factor", self.grid_boost_factor),
            ("distance_boost_factor", self.distance_boost_factor),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be finite and non-negative"));
            }
        }

        if !(0.0..=1.0).contains(&self.enemy_probability) {
            return Err(invalid("enemy_probability", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.player_easing) {
            return Err(invalid("player_easing", "must be within [0, 1]"));
        }
        if !(0.0..1.0).contains(&self.shake_decay) {
            return Err(invalid("shake_decay", "must be within [0, 1)"));
        }
        if !(self.xp_growth.is_finite() && self.xp_growth > 1.0) {
            return Err(invalid("xp_growth", "must be greater than 1"));
        }
        if self.initial_xp_threshold == 0 {
            return Err(invalid("initial_xp_threshold", "must be positive"));
        }
        if self.spawn_interval_min == 0 {
            return Err(invalid("spawn_interval_min", "must be positive"));
        }
        if self.combo_window_ticks == 0 {
            return Err(invalid("combo_window_ticks", "must be positive"));
        }
        if !(self.difficulty_distance_step.is_finite() && self.difficulty_distance_step > 0.0) {
            return Err(invalid("difficulty_distance_step", "must be positive"));
        }
        if !(self.boost_multiplier.is_finite() && self.boost_multiplier >= 1.0) {
            return Err(invalid("boost_multiplier", "must be at least 1"));
        }
        Ok(())
    }

    /// Reward table for a hazard kind
    pub fn reward(&self, kind: HazardKind) -> &KillReward {
        match kind {
            HazardKind::Enemy => &self.enemy,
            HazardKind::Asteroid => &self.asteroid,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    log::warn!("Rejected tuning: {field} {reason}");
    TuningError::Invalid { field, reason }
}
