//! Game state: the single simulation context
//!
//! Owns every entity collection, the progression counters, the nitro meter
//! and the RNG. Side effects that span systems (a kill touching score, combo,
//! experience, nitro, mission and shake) are funnelled through methods here
//! so each one has exactly one code path.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{RunState, WorldClock};
use super::entity::{Hazard, HazardKind, Player, Projectile, Star};
use super::events::{
    DeferredAction, DeferredQueue, GameEvent, GameOverSummary, Notification, NotificationKind,
};
use super::mission::{Mission, MissionKind};
use super::nitro::NitroMeter;
use super::progression::Progression;
use super::shake::CameraShake;
use super::spawn::SpawnDirector;
use crate::consts::STAR_COUNT;
use crate::tuning::{Tuning, TuningError};

/// HUD-only state driven by deferred actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudState {
    pub mission_card_visible: bool,
    pub notification: Option<Notification>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub clock: WorldClock,
    pub player: Player,
    /// Live projectiles, in spawn order
    pub projectiles: Vec<Projectile>,
    /// Live hazards, in spawn order
    pub hazards: Vec<Hazard>,
    pub stars: Vec<Star>,
    /// Scroll offset of the floor grid
    pub grid_offset: f32,
    pub progression: Progression,
    pub mission: Mission,
    pub nitro: NitroMeter,
    pub shake: CameraShake,
    pub spawner: SpawnDirector,
    pub hud: HudState,
    pub(crate) deferred: DeferredQueue,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// New run with a custom balance table. Invalid tables are refused here
    /// rather than surfacing mid-run.
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT).map(|_| Star::scattered(&mut rng)).collect();
        let mission = Mission::random(&mut rng);
        let mut state = Self {
            seed,
            rng,
            progression: Progression::new(&tuning),
            nitro: NitroMeter::new(tuning.boost_multiplier, tuning.boost_duration_ticks),
            clock: WorldClock::default(),
            player: Player::default(),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            stars,
            grid_offset: 0.0,
            mission,
            shake: CameraShake::default(),
            spawner: SpawnDirector::default(),
            hud: HudState::default(),
            deferred: DeferredQueue::default(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        log::info!("Run started (seed {}), mission: {}", seed, state.mission.description);
        state.emit_mission_update();
        let delay = state.tuning.mission_card_delay;
        state.schedule(delay, DeferredAction::ShowMissionCard);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn schedule(&mut self, delay: u32, action: DeferredAction) {
        self.deferred.schedule(self.clock.frames, delay, action);
    }

    /// Whether `action` is waiting in the deferred queue
    pub fn is_scheduled(&self, action: DeferredAction) -> bool {
        self.deferred.is_pending(action)
    }

    /// Run deferred actions due this frame. Called every frame, paused or not.
    /// Actions scheduled with no delay by an earlier action run in the same
    /// frame.
    pub(crate) fn run_deferred(&mut self) {
        loop {
            let due = self.deferred.take_due(self.clock.frames);
            if due.is_empty() {
                break;
            }
            for action in due {
                self.run_action(action);
            }
        }
    }

    fn run_action(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::NewMission => self.start_new_mission(),
            DeferredAction::ShowMissionCard => {
                self.hud.mission_card_visible = true;
                self.emit(GameEvent::MissionCardShown);
                let visible = self.tuning.mission_card_visible;
                self.schedule(visible, DeferredAction::HideMissionCard);
            }
            DeferredAction::HideMissionCard => {
                self.hud.mission_card_visible = false;
                self.emit(GameEvent::MissionCardHidden);
            }
            DeferredAction::ClearNotification => {
                self.hud.notification = None;
                self.emit(GameEvent::NotificationCleared);
            }
        }
    }

    /// Pause/resume intent. Ignored once the run is over.
    pub fn toggle_pause(&mut self) {
        match self.clock.toggle_pause() {
            Some(RunState::Paused) => self.emit(GameEvent::Paused),
            Some(RunState::Running) => self.emit(GameEvent::Resumed),
            _ => {}
        }
    }

    fn pause(&mut self) {
        if self.clock.is_running() {
            self.clock.pause();
            self.emit(GameEvent::Paused);
        }
    }

    /// Fire a projectile pair from the wing launchers, rate-limited by wall
    /// time. Returns whether the shot was accepted.
    pub fn fire(&mut self) -> bool {
        if !self.clock.is_running() || !self.clock.try_fire(self.tuning.fire_interval_ms) {
            return false;
        }
        for pos in self.player.launchers() {
            let id = self.next_entity_id();
            self.projectiles.push(Projectile::new(id, pos));
        }
        true
    }

    /// Boost intent. No-op unless the meter is full.
    pub fn activate_boost(&mut self) -> bool {
        if !self.nitro.activate() {
            return false;
        }
        self.shake.add(self.tuning.shake_on_boost);
        self.emit(GameEvent::BoostActivated);
        true
    }

    /// Spawn a hazard of `kind` at the far bound
    pub fn spawn_hazard(&mut self, kind: HazardKind) -> u32 {
        let id = self.next_entity_id();
        let hazard = SpawnDirector::spawn(kind, id, self.progression.difficulty, &mut self.rng, &self.tuning);
        self.hazards.push(hazard);
        id
    }

    /// Reward a destroyed hazard.
    ///
    /// Callers must have won [`Hazard::try_destroy`] for this hazard; that
    /// check-and-clear is what keeps the primary and fallback sweeps from
    /// paying out twice for one kill.
    pub fn award_kill(&mut self, kind: HazardKind, id: u32, pos: Vec3) {
        let reward = *self.tuning.reward(kind);

        self.emit(GameEvent::Explosion {
            pos,
            magnitude: reward.explosion_magnitude,
            large: true,
        });
        self.shake.add(reward.explosion_shake);
        self.emit(GameEvent::HazardDestroyed { kind, id });

        let award = self.progression.register_kill(&reward, self.tuning.combo_window_ticks);
        self.emit_combo();
        self.emit(GameEvent::ScoreChanged {
            score: self.progression.score,
        });
        self.add_experience(award.xp);
        self.nitro.add_charge(reward.nitro_charge);

        let mission_kind = match kind {
            HazardKind::Enemy => MissionKind::DestroyEnemies,
            HazardKind::Asteroid => MissionKind::DestroyAsteroids,
        };
        let mut progressed = self.mission.record_kill(mission_kind);
        progressed |= self.mission.record_combo(award.combo);
        if progressed {
            self.mission_progressed();
        }
    }

    /// A hazard rammed the ship
    pub fn damage_player(&mut self, by: HazardKind, pos: Vec3, explode_hazard: bool) {
        let reward = *self.tuning.reward(by);
        if explode_hazard {
            self.emit(GameEvent::Explosion {
                pos,
                magnitude: reward.explosion_magnitude,
                large: true,
            });
            self.shake.add(reward.explosion_shake);
        }

        let killed = self.player.take_damage(reward.contact_damage);
        self.shake.add(self.tuning.shake_on_damage);
        self.emit(GameEvent::PlayerDamaged {
            health: self.player.health,
            by,
        });

        self.progression.reset_combo();
        self.emit_combo();

        if killed {
            self.emit(GameEvent::Explosion {
                pos: self.player.pos,
                magnitude: self.tuning.player_explosion_magnitude,
                large: true,
            });
            self.shake.add(self.tuning.shake_on_player_explode);
            self.game_over();
        }
    }

    /// Add experience, applying level-up rewards for every level gained
    pub fn add_experience(&mut self, amount: u64) {
        let reached = self.progression.add_experience(amount, self.tuning.xp_growth);
        for level in reached {
            log::info!("Level up: {}", level);
            self.player.heal(self.tuning.level_up_heal);
            self.shake.add(self.tuning.shake_on_level_up);
            self.emit(GameEvent::LevelUp { level });
            self.notify(format!("LEVEL {level}!"), NotificationKind::Reward);
        }
    }

    /// Show a HUD notification, replacing any current one
    pub fn notify(&mut self, text: String, kind: NotificationKind) {
        let notification = Notification { text, kind };
        self.hud.notification = Some(notification.clone());
        self.emit(GameEvent::Notification(notification));
        self.deferred.cancel(DeferredAction::ClearNotification);
        let ttl = self.tuning.notification_ticks;
        self.schedule(ttl, DeferredAction::ClearNotification);
    }

    /// Distance objective bookkeeping
    pub(crate) fn record_distance(&mut self) {
        if self.mission.record_distance(self.progression.distance_units()) {
            self.mission_progressed();
        }
    }

    fn mission_progressed(&mut self) {
        self.emit_mission_update();
        if self.mission.check_completion() {
            self.complete_mission();
        }
    }

    fn complete_mission(&mut self) {
        log::info!("Mission complete: {}", self.mission.description);
        self.pause();
        self.emit(GameEvent::MissionCompleted {
            description: self.mission.description.clone(),
        });
        self.notify("MISSION COMPLETE!".to_string(), NotificationKind::Success);
        self.add_experience(self.tuning.mission_reward_xp);
        self.progression.add_score(self.tuning.mission_reward_score);
        self.emit(GameEvent::ScoreChanged {
            score: self.progression.score,
        });
        let delay = self.tuning.mission_replace_delay;
        self.schedule(delay, DeferredAction::NewMission);
    }

    fn start_new_mission(&mut self) {
        self.mission = Mission::random(&mut self.rng);
        log::info!("New mission: {}", self.mission.description);
        self.emit_mission_update();
        self.deferred.cancel(DeferredAction::HideMissionCard);
        self.schedule(0, DeferredAction::ShowMissionCard);
    }

    fn emit_mission_update(&mut self) {
        self.emit(GameEvent::MissionUpdated {
            kind: self.mission.kind,
            description: self.mission.description.clone(),
            current: self.mission.displayed_current(),
            target: self.mission.target,
            percent: self.mission.percent(),
        });
    }

    pub(crate) fn emit_combo(&mut self) {
        self.emit(GameEvent::ComboChanged {
            count: self.progression.combo,
            max_style: self.progression.combo >= self.tuning.combo_max_style,
        });
    }

    fn game_over(&mut self) {
        if self.clock.is_over() {
            return;
        }
        self.clock.end();
        let summary = self.summary();
        log::info!(
            "Game over: score {}, distance {}, kills {}, best combo {}",
            summary.score,
            summary.distance,
            summary.kills,
            summary.best_combo
        );
        self.emit(GameEvent::GameOver(summary));
    }

    /// End-of-run stats
    pub fn summary(&self) -> GameOverSummary {
        GameOverSummary {
            score: self.progression.score,
            distance: self.progression.distance_units(),
            kills: self.progression.kills,
            best_combo: self.progression.best_combo,
            level: self.progression.level,
        }
    }
}
