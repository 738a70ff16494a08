//! Nitro Run headless runner
//!
//! Plays one run under the autopilot and prints the game-over summary as JSON.
//!
//! Usage: `nitro-run [tuning.json]`

use nitro_run::consts::{SIM_DT, TICK_RATE};
use nitro_run::sim::{GameEvent, GameState, RunState, autopilot, tick};
use nitro_run::Tuning;

/// Ten minutes of play
const MAX_TICKS: u64 = 10 * 60 * TICK_RATE as u64;

fn main() {
    env_logger::init();
    log::info!("Nitro Run (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load_from_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed: u64 = rand::random();
    let mut state = match GameState::with_tuning(tuning, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", state.seed);

    while !state.clock.is_over() && state.clock.ticks < MAX_TICKS {
        let mut input = autopilot::drive(&state);
        // Mission completion pauses the run; dismiss it like a player would
        // once the replacement mission is in place.
        if state.clock.state == RunState::Paused && !state.mission.completed {
            input.pause = true;
        }
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("Level up: {}", level),
                GameEvent::MissionCompleted { description } => {
                    log::info!("Mission complete: {}", description)
                }
                GameEvent::GameOver(summary) => log::info!("Game over: {:?}", summary),
                other => log::trace!("{:?}", other),
            }
        }
    }

    if !state.clock.is_over() {
        log::info!("Run capped at {} ticks", MAX_TICKS);
    }

    match serde_json::to_string_pretty(&state.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
