//! Nitro Run - an endless into-the-screen space shooter
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, collisions, spawning, progression)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input polling live outside this crate. They read
//! [`sim::RenderSnapshot`] / [`sim::HudSnapshot`] and feed [`sim::TickInput`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Far depth bound: hazards spawn here, projectiles expire past it
    pub const FAR_DEPTH: f32 = 2000.0;
    /// Near depth bound: hazards that cross it despawn silently.
    /// Sits behind the ship so contact with the player is reachable.
    pub const NEAR_DEPTH: f32 = -250.0;
    /// Fixed depth of the player ship
    pub const SHIP_Z: f32 = -200.0;

    /// Lateral offset of each wing launcher from the ship center
    pub const LAUNCHER_OFFSET: f32 = 20.0;

    /// Player health cap
    pub const MAX_HEALTH: u32 = 100;

    /// Enemy collision size
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Asteroid size range [min, max)
    pub const ASTEROID_SIZE_MIN: f32 = 30.0;
    pub const ASTEROID_SIZE_MAX: f32 = 50.0;
    /// Points in a generated asteroid silhouette
    pub const ASTEROID_VERTICES: usize = 8;

    /// Hazard spawn window half-extents
    pub const SPAWN_HALF_WIDTH: f32 = 300.0;
    pub const SPAWN_HALF_HEIGHT: f32 = 200.0;

    /// Background star field
    pub const STAR_COUNT: usize = 150;
    pub const STAR_HALF_WIDTH: f32 = 500.0;
    pub const STAR_HALF_HEIGHT: f32 = 400.0;
}

/// Convert a duration in seconds to whole ticks at the nominal rate
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs * consts::TICK_RATE as f32).round().max(0.0) as u32
}
