//! Nitro meter
//!
//! Kills charge the meter; a full meter can be spent on a timed boost that
//! speeds up everything moving along the depth axis.
//!
//! idle (energy < 1) → ready (energy = 1) → active (timer > 0) → idle

use serde::{Deserialize, Serialize};

/// Charge-gated temporary speed boost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NitroMeter {
    /// Charge in [0, 1]
    energy: f32,
    active: bool,
    /// Ticks of boost remaining while active
    remaining_ticks: u32,
    boost_multiplier: f32,
    duration_ticks: u32,
}

/// What a meter update did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NitroTick {
    Idle,
    Boosting,
    /// The boost ran out this tick
    Ended,
}

impl NitroMeter {
    pub fn new(boost_multiplier: f32, duration_ticks: u32) -> Self {
        Self {
            energy: 0.0,
            active: false,
            remaining_ticks: 0,
            boost_multiplier,
            duration_ticks,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Full and not already boosting
    pub fn is_ready(&self) -> bool {
        self.energy >= 1.0 && !self.active
    }

    /// Add (or drain, if negative) charge, clamped to [0, 1]
    pub fn add_charge(&mut self, amount: f32) {
        if amount.is_finite() {
            self.energy = (self.energy + amount).clamp(0.0, 1.0);
        }
    }

    /// Spend a full meter. No-op unless ready; returns whether it fired.
    pub fn activate(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.active = true;
        self.energy = 0.0;
        self.remaining_ticks = self.duration_ticks;
        log::debug!("Nitro engaged for {} ticks", self.duration_ticks);
        true
    }

    /// Count down an active boost
    pub fn update(&mut self) -> NitroTick {
        if !self.active {
            return NitroTick::Idle;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.active = false;
            log::debug!("Nitro spent");
            NitroTick::Ended
        } else {
            NitroTick::Boosting
        }
    }

    /// Extra speed every mover adds this tick: `boost_multiplier - 1` while
    /// active, otherwise 0.
    pub fn speed_multiplier(&self) -> f32 {
        if self.active {
            self.boost_multiplier - 1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meter() -> NitroMeter {
        NitroMeter::new(1.8, 150)
    }

    #[test]
    fn test_activate_below_full_is_noop() {
        let mut nitro = meter();
        nitro.add_charge(0.7);
        assert!(!nitro.activate());
        assert!(!nitro.is_active());
        assert!((nitro.energy() - 0.7).abs() < 1e-6);
        assert_eq!(nitro.speed_multiplier(), 0.0);
    }

    #[test]
    fn test_boost_lifecycle() {
        let mut nitro = meter();
        nitro.add_charge(1.0);
        assert!(nitro.is_ready());
        assert!(nitro.activate());
        assert_eq!(nitro.energy(), 0.0);
        assert!((nitro.speed_multiplier() - 0.8).abs() < 1e-6);

        // Can't re-trigger while active, even if refilled
        nitro.add_charge(1.0);
        assert!(!nitro.is_ready());
        assert!(!nitro.activate());

        for _ in 0..149 {
            assert_eq!(nitro.update(), NitroTick::Boosting);
            assert!((nitro.speed_multiplier() - 0.8).abs() < 1e-6);
        }
        assert_eq!(nitro.update(), NitroTick::Ended);
        assert!(!nitro.is_active());
        assert_eq!(nitro.speed_multiplier(), 0.0);
        assert_eq!(nitro.update(), NitroTick::Idle);
    }

    #[test]
    fn test_kill_charges_accumulate_to_ready() {
        let mut nitro = meter();
        for _ in 0..8 {
            nitro.add_charge(0.12);
        }
        assert!(!nitro.is_ready());
        nitro.add_charge(0.12);
        assert!(nitro.is_ready());
        assert_eq!(nitro.energy(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_unit_range(charges in proptest::collection::vec(-2.0f32..2.0, 0..50)) {
            let mut nitro = meter();
            for c in charges {
                nitro.add_charge(c);
                prop_assert!((0.0..=1.0).contains(&nitro.energy()));
            }
        }
    }
}
