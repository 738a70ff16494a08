//! World clock: tick counters, run flags and the fire limiter

use serde::{Deserialize, Serialize};

/// Whether gameplay updates run this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Active gameplay
    Running,
    /// Gameplay frozen (rendering continues)
    Paused,
    /// Run ended; no further gameplay ticks
    Over,
}

/// Simulation time bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldClock {
    /// Gameplay ticks executed (frozen while paused or over)
    pub ticks: u64,
    /// Calls to `tick`, paused or not. Deferred events count these.
    pub frames: u64,
    /// Wall milliseconds accumulated from the host's dt
    pub elapsed_ms: f64,
    pub state: RunState,
    /// Wall time of the last accepted fire intent
    last_fire_ms: Option<f64>,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            ticks: 0,
            frames: 0,
            elapsed_ms: 0.0,
            state: RunState::Running,
            last_fire_ms: None,
        }
    }
}

impl WorldClock {
    /// Advance the frame counter and wall clock. Runs on every call.
    pub fn advance_frame(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed_ms += f64::from(dt) * 1000.0;
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_over(&self) -> bool {
        self.state == RunState::Over
    }

    /// Flip between running and paused. Returns the new state, or `None`
    /// when the run is over and the toggle was ignored.
    pub fn toggle_pause(&mut self) -> Option<RunState> {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Over => return None,
        };
        Some(self.state)
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    pub fn end(&mut self) {
        self.state = RunState::Over;
    }

    /// Rate-limit fire intents by wall time. Returns true if accepted.
    pub fn try_fire(&mut self, min_interval_ms: f64) -> bool {
        if let Some(last) = self.last_fire_ms {
            if self.elapsed_ms - last < min_interval_ms {
                return false;
            }
        }
        self.last_fire_ms = Some(self.elapsed_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_rate_limit_uses_wall_time() {
        let mut clock = WorldClock::default();
        assert!(clock.try_fire(150.0));

        // 100 ms later: rejected
        clock.advance_frame(0.1);
        assert!(!clock.try_fire(150.0));

        // 200 ms after the accepted shot: accepted
        clock.advance_frame(0.1);
        assert!(clock.try_fire(150.0));
    }

    #[test]
    fn test_rejected_fire_does_not_reset_window() {
        let mut clock = WorldClock::default();
        assert!(clock.try_fire(150.0));
        clock.advance_frame(0.1);
        assert!(!clock.try_fire(150.0));
        clock.advance_frame(0.06);
        assert!(clock.try_fire(150.0));
    }

    #[test]
    fn test_pause_toggle() {
        let mut clock = WorldClock::default();
        assert_eq!(clock.toggle_pause(), Some(RunState::Paused));
        assert_eq!(clock.toggle_pause(), Some(RunState::Running));
        clock.end();
        assert_eq!(clock.toggle_pause(), None);
        assert!(clock.is_over());
    }
}
