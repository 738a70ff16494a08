//! Fixed timestep simulation tick
//!
//! Per-tick order: input → player → projectiles (primary sweep) → hazards
//! (fallback sweep, player contact) → cleanup → background → spawning →
//! timers/decay → distance/difficulty. Kill effects land before the later
//! steps in the same tick.

use glam::Vec3;

use super::collision;
use super::entity::{HazardBody, HazardKind, Steer};
use super::events::GameEvent;
use super::nitro::NitroTick;
use super::state::GameState;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire held (rate-limited by wall time)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Spend the nitro meter (one-shot)
    pub boost: bool,
}

impl TickInput {
    fn steer(&self) -> Steer {
        Steer {
            left: self.move_left,
            right: self.move_right,
            up: self.move_up,
            down: self.move_down,
        }
    }
}

/// Something that happened during an entity pass, applied once the entity
/// borrows are released
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Kill { kind: HazardKind, id: u32, pos: Vec3 },
    Rammed { kind: HazardKind, pos: Vec3, explode: bool },
    Grazed { id: u32 },
}

/// Advance the game state by one fixed timestep.
///
/// `dt` is the wall time this call stands for; it only drives the fire rate
/// limiter. Gameplay always moves by one tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.clock.advance_frame(dt);
    state.run_deferred();

    if input.pause {
        state.toggle_pause();
    }
    if !state.clock.is_running() {
        return;
    }
    state.clock.ticks += 1;

    // Input
    state.player.steer(input.steer(), &state.tuning);
    if input.fire {
        state.fire();
    }
    if input.boost {
        state.activate_boost();
    }

    // Read once, after the boost intent, and shared by every mover
    let speed = state.nitro.speed_multiplier();

    state.player.update(&state.tuning);

    let outcomes = update_projectiles(state, speed);
    apply(state, outcomes);
    if !state.clock.is_over() {
        let outcomes = update_hazards(state, speed);
        apply(state, outcomes);
    }

    state.projectiles.retain(|p| p.alive);
    state.hazards.retain(|h| h.alive);

    // The game-over summary is final; nothing below may touch progression
    if state.clock.is_over() {
        return;
    }

    update_background(state, speed);

    if let Some(kind) = state
        .spawner
        .update(state.progression.difficulty, &mut state.rng, &state.tuning)
    {
        state.spawn_hazard(kind);
    }

    update_timers(state);

    let before = state.progression.distance_units();
    let step = state.tuning.distance_per_tick + speed * state.tuning.distance_boost_factor;
    state
        .progression
        .advance_distance(step, state.tuning.difficulty_distance_step);
    let after = state.progression.distance_units();
    if after != before {
        state.emit(GameEvent::DistanceChanged { distance: after });
    }
    state.record_distance();
}

/// Move projectiles and run the primary swept test against hazards
fn update_projectiles(state: &mut GameState, speed: f32) -> Vec<Outcome> {
    let GameState {
        tuning,
        projectiles,
        hazards,
        player,
        rng,
        ..
    } = state;
    let mut outcomes = Vec::new();

    for shot in projectiles.iter_mut().filter(|p| p.alive) {
        shot.advance(speed, tuning);

        // Nearest hit along the segment
        let target = hazards
            .iter()
            .enumerate()
            .filter(|(_, h)| h.alive)
            .filter_map(|(i, h)| {
                let sweep = shot.sweep(h.pos, h.collision_radius(tuning));
                sweep.hit.then_some((i, sweep.t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);
        if let Some(index) = target {
            let hazard = &mut hazards[index];
            if hazard.try_destroy() {
                shot.alive = false;
                hazard.apply_impulse(shot.pos, rng);
                let kind = hazard.kind();
                // The knock-back can shove a rock straight into the ship
                if kind == HazardKind::Asteroid && hazard.touches_player(player, tuning) {
                    outcomes.push(Outcome::Rammed {
                        kind,
                        pos: hazard.pos,
                        explode: false,
                    });
                }
                outcomes.push(Outcome::Kill {
                    kind,
                    id: hazard.id,
                    pos: hazard.pos,
                });
            }
        }

        if shot.out_of_range() {
            shot.alive = false;
        }
    }
    outcomes
}

/// Move hazards, run the asteroid fallback sweep and the player contact test
fn update_hazards(state: &mut GameState, speed: f32) -> Vec<Outcome> {
    let GameState {
        tuning,
        projectiles,
        hazards,
        player,
        rng,
        ..
    } = state;
    let mut outcomes = Vec::new();

    for hazard in hazards.iter_mut().filter(|h| h.alive) {
        hazard.advance(speed, tuning);

        if hazard.passed_camera() {
            // Slipped past unexploded: no score, no effect
            hazard.alive = false;
            continue;
        }

        // Fallback sweep. A hazard already claimed by the primary sweep is
        // dead and never gets here; try_destroy guards the rest.
        if matches!(hazard.body, HazardBody::Asteroid(_)) {
            let radius = hazard.collision_radius(tuning);
            for shot in projectiles.iter_mut().filter(|p| p.alive) {
                let sweep = collision::swept_sphere(shot.prev_pos, shot.pos, hazard.pos, radius);
                if sweep.hit {
                    if hazard.try_destroy() {
                        shot.alive = false;
                        outcomes.push(Outcome::Kill {
                            kind: HazardKind::Asteroid,
                            id: hazard.id,
                            pos: hazard.pos,
                        });
                    }
                    break;
                } else if sweep.distance < radius + tuning.graze_margin {
                    hazard.apply_impulse(sweep.closest, rng);
                    outcomes.push(Outcome::Grazed { id: hazard.id });
                }
            }
            if !hazard.alive {
                continue;
            }
        }

        if hazard.touches_player(player, tuning) && hazard.try_destroy() {
            outcomes.push(Outcome::Rammed {
                kind: hazard.kind(),
                pos: hazard.pos,
                explode: true,
            });
        }
    }
    outcomes
}

/// Apply outcomes in order. Anything after a game over is dropped.
fn apply(state: &mut GameState, outcomes: Vec<Outcome>) {
    for outcome in outcomes {
        if state.clock.is_over() {
            break;
        }
        match outcome {
            Outcome::Kill { kind, id, pos } => state.award_kill(kind, id, pos),
            Outcome::Rammed { kind, pos, explode } => state.damage_player(kind, pos, explode),
            Outcome::Grazed { id } => state.emit(GameEvent::AsteroidGrazed { id }),
        }
    }
}

fn update_background(state: &mut GameState, speed: f32) {
    let GameState {
        tuning, stars, rng, ..
    } = state;
    for star in stars.iter_mut() {
        star.advance(speed, rng, tuning);
    }
    state.grid_offset += state.tuning.grid_speed + speed * state.tuning.grid_boost_factor;
}

fn update_timers(state: &mut GameState) {
    if state.progression.tick_combo() {
        state.emit_combo();
    }

    match state.nitro.update() {
        NitroTick::Boosting => state.shake.add(state.tuning.shake_while_boosting),
        NitroTick::Ended => state.emit(GameEvent::BoostEnded),
        NitroTick::Idle => {}
    }

    state
        .shake
        .update(&mut state.rng, state.tuning.shake_decay, state.tuning.shake_floor);
}
