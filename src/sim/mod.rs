//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, one synchronous pass per tick
//! - All mutable state in one `GameState`
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod events;
pub mod mission;
pub mod nitro;
pub mod progression;
pub mod shake;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{RunState, WorldClock};
pub use collision::{SweepResult, closest_point_on_segment, swept_sphere, within_distance};
pub use entity::{AsteroidBody, Hazard, HazardBody, HazardKind, Player, Projectile, Star};
pub use events::{GameEvent, GameOverSummary, Notification, NotificationKind};
pub use mission::{Mission, MissionKind};
pub use nitro::NitroMeter;
pub use progression::Progression;
pub use shake::CameraShake;
pub use snapshot::{HudSnapshot, RenderSnapshot};
pub use spawn::SpawnDirector;
pub use state::GameState;
pub use tick::{TickInput, tick};
