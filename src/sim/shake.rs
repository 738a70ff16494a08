//! Camera shake

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Decaying shake intensity. Triggers take the max, they don't stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraShake {
    pub intensity: f32,
    /// Offset for this tick's frame, resampled every tick
    pub offset: Vec2,
}

impl CameraShake {
    pub fn add(&mut self, amount: f32) {
        self.intensity = self.intensity.max(amount);
    }

    /// Sample this tick's offset, then decay
    pub fn update(&mut self, rng: &mut impl Rng, decay: f32, floor: f32) {
        if self.intensity <= 0.0 {
            return;
        }
        self.offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity,
        );
        self.intensity *= decay;
        if self.intensity < floor {
            self.intensity = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_take_max_not_sum() {
        let mut shake = CameraShake::default();
        shake.add(5.0);
        shake.add(12.0);
        assert_eq!(shake.intensity, 12.0);
        shake.add(3.0);
        assert_eq!(shake.intensity, 12.0);
    }

    #[test]
    fn test_decay_to_zero() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shake = CameraShake::default();
        shake.add(10.0);
        shake.update(&mut rng, 0.9, 0.1);
        assert!((shake.intensity - 9.0).abs() < 1e-5);
        assert!(shake.offset.x.abs() <= 5.0 && shake.offset.y.abs() <= 5.0);

        // 10 * 0.9^n < 0.1 needs n = 44
        for _ in 0..50 {
            shake.update(&mut rng, 0.9, 0.1);
        }
        assert_eq!(shake.intensity, 0.0);
        assert_eq!(shake.offset, Vec2::ZERO);
    }
}
