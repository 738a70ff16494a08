//! Autopilot - drives the ship for demo runs and soak tests
//!
//! Lines up with the closest hazard still in front of the ship, holds fire,
//! and spends the nitro meter as soon as it fills.

use super::state::GameState;
use super::tick::TickInput;

/// Build this tick's input from the current state
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        boost: state.nitro.is_ready(),
        ..Default::default()
    };

    let ship = state.player.pos;
    let target = state
        .hazards
        .iter()
        .filter(|h| h.alive && h.pos.z > ship.z)
        .min_by(|a, b| {
            a.pos
                .z
                .partial_cmp(&b.pos.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(hazard) = target {
        // Steer the target point; the ship eases after it. Shots leave the
        // wings, so aim a wing rather than the hull at the hazard.
        let aim_x = hazard.pos.x + crate::consts::LAUNCHER_OFFSET;
        let dead_zone = state.tuning.move_step;
        let dx = aim_x - state.player.target.x;
        let dy = hazard.pos.y - state.player.target.y;
        input.move_left = dx < -dead_zone;
        input.move_right = dx > dead_zone;
        input.move_up = dy < -dead_zone;
        input.move_down = dy > dead_zone;
    }

    input
}
