//! Events emitted by the simulation for rendering, audio and HUD feedback,
//! plus the frame-counted queue that replaces wall-clock UI callbacks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::HazardKind;
use super::mission::MissionKind;

/// Final stats shown on the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub distance: u64,
    pub kills: u32,
    pub best_combo: u32,
    pub level: u32,
}

/// Notification styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Reward,
}

/// A transient HUD message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

/// Something the outside world should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Spawn an explosion effect
    Explosion {
        pos: Vec3,
        magnitude: f32,
        large: bool,
    },
    /// A hazard was destroyed by a projectile
    HazardDestroyed { kind: HazardKind, id: u32 },
    /// A projectile clipped an asteroid without destroying it
    AsteroidGrazed { id: u32 },
    ScoreChanged { score: u64 },
    DistanceChanged { distance: u64 },
    ComboChanged { count: u32, max_style: bool },
    LevelUp { level: u32 },
    PlayerDamaged { health: u32, by: HazardKind },
    MissionUpdated {
        kind: MissionKind,
        description: String,
        current: u32,
        target: u32,
        percent: f32,
    },
    MissionCompleted { description: String },
    MissionCardShown,
    MissionCardHidden,
    Notification(Notification),
    NotificationCleared,
    BoostActivated,
    BoostEnded,
    Paused,
    Resumed,
    GameOver(GameOverSummary),
}

/// Work scheduled for a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Draw and announce a fresh mission
    NewMission,
    ShowMissionCard,
    HideMissionCard,
    ClearNotification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Scheduled {
    due_frame: u64,
    action: DeferredAction,
}

/// Frame-counted deferred actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    pending: Vec<Scheduled>,
}

impl DeferredQueue {
    /// Run `action` once `delay` more frames have passed
    pub fn schedule(&mut self, now_frame: u64, delay: u32, action: DeferredAction) {
        self.pending.push(Scheduled {
            due_frame: now_frame + u64::from(delay),
            action,
        });
    }

    /// Remove and return everything due at or before `now_frame`, in
    /// scheduling order
    pub fn take_due(&mut self, now_frame: u64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.pending.retain(|s| {
            if s.due_frame <= now_frame {
                due.push(s.action);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop any pending occurrences of `action`
    pub fn cancel(&mut self, action: DeferredAction) {
        self.pending.retain(|s| s.action != action);
    }

    pub fn is_pending(&self, action: DeferredAction) -> bool {
        self.pending.iter().any(|s| s.action == action)
    }
}
