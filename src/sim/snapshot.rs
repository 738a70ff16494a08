//! Read-only views of the state for the render and HUD layers.
//!
//! Built after a tick completes; consumers never touch `GameState` itself.

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::clock::RunState;
use super::entity::{HazardBody, HazardKind};
use super::events::Notification;
use super::mission::MissionKind;
use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub tilt: f32,
    pub health: u32,
    pub boosting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec3,
    pub prev_pos: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec3,
    pub size: f32,
    pub rotation: f32,
    pub hit_flash: f32,
    /// Silhouette, asteroids only
    pub vertices: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarView {
    pub pos: Vec3,
    pub brightness: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NitroView {
    pub energy: f32,
    pub active: bool,
    pub ready: bool,
    /// Boost ticks left while active
    pub remaining_ticks: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub projectiles: Vec<ProjectileView>,
    pub hazards: Vec<HazardView>,
    pub stars: Vec<StarView>,
    pub grid_offset: f32,
    pub shake_offset: Vec2,
    /// Speed multiplier in effect (drives speed lines, background tint)
    pub speed_multiplier: f32,
    pub nitro: NitroView,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionView {
    pub kind: MissionKind,
    pub description: String,
    /// Clamped to the target
    pub current: u32,
    pub target: u32,
    pub percent: f32,
    pub completed: bool,
}

/// Everything the HUD shows
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub distance: u64,
    pub combo: u32,
    pub combo_max_style: bool,
    pub best_combo: u32,
    pub kills: u32,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub health: u32,
    pub difficulty: u32,
    pub mission: MissionView,
    pub mission_card_visible: bool,
    pub notification: Option<Notification>,
    pub nitro: NitroView,
    pub run_state: RunState,
}

impl GameState {
    fn nitro_view(&self) -> NitroView {
        NitroView {
            energy: self.nitro.energy(),
            active: self.nitro.is_active(),
            ready: self.nitro.is_ready(),
            remaining_ticks: self.nitro.remaining_ticks(),
        }
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            tick: self.clock.ticks,
            player: PlayerView {
                pos: self.player.pos,
                tilt: self.player.tilt,
                health: self.player.health,
                boosting: self.nitro.is_active(),
            },
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    prev_pos: p.prev_pos,
                })
                .collect(),
            hazards: self
                .hazards
                .iter()
                .map(|h| HazardView {
                    id: h.id,
                    kind: h.kind(),
                    pos: h.pos,
                    size: h.size,
                    rotation: h.rotation,
                    hit_flash: h.hit_flash(),
                    vertices: match &h.body {
                        HazardBody::Asteroid(rock) => rock.vertices.clone(),
                        HazardBody::Enemy => Vec::new(),
                    },
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|s| StarView {
                    pos: s.pos,
                    brightness: s.brightness,
                })
                .collect(),
            grid_offset: self.grid_offset,
            shake_offset: self.shake.offset,
            speed_multiplier: self.nitro.speed_multiplier(),
            nitro: self.nitro_view(),
        }
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        let p = &self.progression;
        HudSnapshot {
            score: p.score,
            distance: p.distance_units(),
            combo: p.combo,
            combo_max_style: p.combo >= self.tuning.combo_max_style,
            best_combo: p.best_combo,
            kills: p.kills,
            level: p.level,
            xp: p.xp,
            xp_to_next: p.xp_to_next,
            health: self.player.health,
            difficulty: p.difficulty,
            mission: MissionView {
                kind: self.mission.kind,
                description: self.mission.description.clone(),
                current: self.mission.displayed_current(),
                target: self.mission.target,
                percent: self.mission.percent(),
                completed: self.mission.completed,
            },
            mission_card_visible: self.hud.mission_card_visible,
            notification: self.hud.notification.clone(),
            nitro: self.nitro_view(),
            run_state: self.clock.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mission::Mission;

    #[test]
    fn test_render_snapshot_mirrors_entities() {
        let mut state = GameState::new(21);
        state.spawn_hazard(HazardKind::Asteroid);
        state.spawn_hazard(HazardKind::Enemy);
        state.fire();

        let snap = state.render_snapshot();
        assert_eq!(snap.projectiles.len(), 2);
        assert_eq!(snap.hazards.len(), 2);
        assert_eq!(snap.hazards[0].vertices.len(), crate::consts::ASTEROID_VERTICES);
        assert!(snap.hazards[1].vertices.is_empty());
        assert_eq!(snap.stars.len(), crate::consts::STAR_COUNT);
        assert!(!snap.player.boosting);
        assert_eq!(snap.nitro.remaining_ticks, 0);
    }

    #[test]
    fn test_nitro_view_counts_down() {
        let mut state = GameState::new(24);
        state.nitro.add_charge(1.0);
        assert!(state.activate_boost());
        let view = state.render_snapshot().nitro;
        assert!(view.active && !view.ready);
        assert_eq!(view.remaining_ticks, state.tuning.boost_duration_ticks);
    }

    #[test]
    fn test_hud_mission_progress_is_clamped() {
        let mut state = GameState::new(22);
        state.mission = Mission::new(MissionKind::ReachCombo, 5);
        state.mission.current = 8;
        let hud = state.hud_snapshot();
        assert_eq!(hud.mission.current, 5);
        assert_eq!(hud.mission.percent, 100.0);
        assert_eq!(hud.run_state, RunState::Running);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(23);
        let json = serde_json::to_string(&state.hud_snapshot()).unwrap();
        assert!(json.contains("\"level\":1"));
    }
}
