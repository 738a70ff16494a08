//! Moving entities: player ship, projectiles, hazards and background stars
//!
//! Everything moves along the depth axis (z). Hazards and stars move toward
//! the camera, projectiles away from it. All of them read the same speed
//! multiplier, handed in by the tick.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{self, SweepResult};
use crate::consts::*;
use crate::tuning::Tuning;

/// Movement intents held this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Current position (z is fixed at the ship depth)
    pub pos: Vec3,
    /// Where input wants the ship to be; `pos` eases toward it
    pub target: Vec2,
    /// Bank angle derived from the lateral gap to the target
    pub tilt: f32,
    /// Health in [0, MAX_HEALTH]
    pub health: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.0, SHIP_Z),
            target: Vec2::ZERO,
            tilt: 0.0,
            health: MAX_HEALTH,
        }
    }
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move the target point. Screen space: up is -y.
    pub fn steer(&mut self, steer: Steer, tuning: &Tuning) {
        let step = tuning.move_step;
        let vstep = step * tuning.vertical_move_scale;
        if steer.left {
            self.target.x -= step;
        }
        if steer.right {
            self.target.x += step;
        }
        if steer.up {
            self.target.y -= vstep;
        }
        if steer.down {
            self.target.y += vstep;
        }
    }

    /// Ease toward the target
    pub fn update(&mut self, tuning: &Tuning) {
        let k = tuning.player_easing;
        self.pos.x += (self.target.x - self.pos.x) * k;
        self.pos.y += (self.target.y - self.pos.y) * k;
        self.tilt = (self.target.x - self.pos.x) * 0.02;
    }

    /// Apply damage. Returns true if this hit killed the ship.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    /// Launcher positions for a fire event (one per wing)
    pub fn launchers(&self) -> [Vec3; 2] {
        [
            self.pos - Vec3::X * LAUNCHER_OFFSET,
            self.pos + Vec3::X * LAUNCHER_OFFSET,
        ]
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Position at the start of this tick, for the swept test
    pub prev_pos: Vec3,
    pub alive: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec3) -> Self {
        Self {
            id,
            pos,
            prev_pos: pos,
            alive: true,
        }
    }

    /// Move one tick deeper into the screen
    pub fn advance(&mut self, speed_multiplier: f32, tuning: &Tuning) {
        self.prev_pos = self.pos;
        self.pos.z += tuning.projectile_speed + speed_multiplier * tuning.projectile_boost_factor;
    }

    /// Past the far bound
    pub fn out_of_range(&self) -> bool {
        self.pos.z > FAR_DEPTH
    }

    /// Swept test of this tick's segment against a sphere
    pub fn sweep(&self, center: Vec3, radius: f32) -> SweepResult {
        collision::swept_sphere(self.prev_pos, self.pos, center, radius)
    }
}

/// Hazard kind tag (for rewards, missions and rendering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Enemy,
    Asteroid,
}

/// Asteroid-only state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidBody {
    /// Silhouette points on a unit-ish circle, scaled by size when drawn
    pub vertices: Vec<Vec2>,
    /// Rotation per tick
    pub spin: f32,
    /// Flash intensity after being hit (1 → 0)
    pub hit_flash: f32,
    /// Knock-back velocity from projectile impacts, decays each tick
    pub impulse: Vec3,
}

/// Kind-specific payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HazardBody {
    Enemy,
    Asteroid(AsteroidBody),
}

/// An enemy ship or an asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec3,
    /// Depth speed per tick, fixed at spawn from the difficulty tier
    pub speed: f32,
    pub size: f32,
    pub rotation: f32,
    pub alive: bool,
    pub body: HazardBody,
}

impl Hazard {
    /// New enemy at the far bound
    pub fn enemy(id: u32, difficulty: u32, rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: spawn_point(rng),
            speed: tuning.enemy_base_speed + difficulty as f32 * tuning.enemy_speed_per_difficulty,
            size: ENEMY_SIZE,
            rotation: 0.0,
            alive: true,
            body: HazardBody::Enemy,
        }
    }

    /// New asteroid at the far bound with a random silhouette
    pub fn asteroid(id: u32, difficulty: u32, rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let vertices = (0..ASTEROID_VERTICES)
            .map(|i| {
                let angle = i as f32 / ASTEROID_VERTICES as f32 * std::f32::consts::TAU;
                let r = rng.random_range(0.8..1.2);
                Vec2::new(angle.cos() * r, angle.sin() * r)
            })
            .collect();
        Self {
            id,
            pos: spawn_point(rng),
            speed: tuning.asteroid_base_speed
                + difficulty as f32 * tuning.asteroid_speed_per_difficulty,
            size: rng.random_range(ASTEROID_SIZE_MIN..ASTEROID_SIZE_MAX),
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            alive: true,
            body: HazardBody::Asteroid(AsteroidBody {
                vertices,
                spin: rng.random_range(-0.05..0.05),
                hit_flash: 0.0,
                impulse: Vec3::ZERO,
            }),
        }
    }

    pub fn kind(&self) -> HazardKind {
        match self.body {
            HazardBody::Enemy => HazardKind::Enemy,
            HazardBody::Asteroid(_) => HazardKind::Asteroid,
        }
    }

    /// Move one tick toward the camera and run per-kind animation
    pub fn advance(&mut self, speed_multiplier: f32, tuning: &Tuning) {
        let depth_step = self.speed + speed_multiplier * tuning.hazard_boost_factor;
        match &mut self.body {
            HazardBody::Enemy => {
                self.rotation += 0.05;
            }
            HazardBody::Asteroid(rock) => {
                self.pos += rock.impulse;
                rock.impulse *= 0.9;
                self.rotation += rock.spin;
                rock.hit_flash = (rock.hit_flash - 0.05).max(0.0);
            }
        }
        self.pos.z -= depth_step;
    }

    /// Crossed the near bound
    pub fn passed_camera(&self) -> bool {
        self.pos.z < NEAR_DEPTH
    }

    /// Radius for projectile sweeps
    pub fn collision_radius(&self, tuning: &Tuning) -> f32 {
        collision::collision_radius(Some(self.size), tuning)
    }

    /// Distance at which the hazard rams the player
    pub fn contact_distance(&self, tuning: &Tuning) -> f32 {
        match self.body {
            HazardBody::Enemy => tuning.enemy_contact_distance,
            HazardBody::Asteroid(_) => self.size + tuning.asteroid_contact_padding,
        }
    }

    /// Discrete contact test against the player's current position
    pub fn touches_player(&self, player: &Player, tuning: &Tuning) -> bool {
        collision::within_distance(self.pos, player.pos, self.contact_distance(tuning))
    }

    /// Clear liveness. Returns true only for the call that actually
    /// destroyed the hazard, so rewards are granted once.
    pub fn try_destroy(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Knock an asteroid away from an impact point. Enemies ignore it.
    pub fn apply_impulse(&mut self, from: Vec3, rng: &mut impl Rng) {
        if let HazardBody::Asteroid(rock) = &mut self.body {
            let dir = collision::direction_away(from, self.pos);
            rock.impulse = Vec3::new(dir.x * 8.0, dir.y * 8.0, dir.z * 5.0);
            rock.hit_flash = 1.0;
            rock.spin += rng.random_range(-0.15..0.15);
        }
    }

    pub fn hit_flash(&self) -> f32 {
        match &self.body {
            HazardBody::Enemy => 0.0,
            HazardBody::Asteroid(rock) => rock.hit_flash,
        }
    }
}

fn spawn_point(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.random_range(-SPAWN_HALF_WIDTH..SPAWN_HALF_WIDTH),
        rng.random_range(-SPAWN_HALF_HEIGHT..SPAWN_HALF_HEIGHT),
        FAR_DEPTH,
    )
}

/// Background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec3,
    pub brightness: f32,
}

impl Star {
    /// Star anywhere in the depth range
    pub fn scattered(rng: &mut impl Rng) -> Self {
        let mut star = Self {
            pos: Vec3::ZERO,
            brightness: rng.random_range(0.5..1.0),
        };
        let z = rng.random_range(NEAR_DEPTH..FAR_DEPTH);
        star.respawn(rng, z);
        star
    }

    fn respawn(&mut self, rng: &mut impl Rng, z: f32) {
        self.pos = Vec3::new(
            rng.random_range(-STAR_HALF_WIDTH..STAR_HALF_WIDTH),
            rng.random_range(-STAR_HALF_HEIGHT..STAR_HALF_HEIGHT),
            z,
        );
    }

    /// Stream toward the camera; recycle at the far bound once past it
    pub fn advance(&mut self, speed_multiplier: f32, rng: &mut impl Rng, tuning: &Tuning) {
        self.pos.z -= tuning.star_speed + speed_multiplier * tuning.star_boost_factor;
        if self.pos.z < NEAR_DEPTH {
            self.respawn(rng, FAR_DEPTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_player_eases_toward_target() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.steer(
            Steer {
                right: true,
                up: true,
                ..Default::default()
            },
            &tuning,
        );
        assert_eq!(player.target, Vec2::new(8.0, -4.8));

        player.update(&tuning);
        assert!((player.pos.x - 0.96).abs() < 1e-5);
        assert!((player.pos.y + 0.576).abs() < 1e-5);
        assert_eq!(player.pos.z, SHIP_Z);
        assert!(player.tilt > 0.0);
    }

    #[test]
    fn test_player_damage_and_heal() {
        let mut player = Player::default();
        assert!(!player.take_damage(60));
        assert_eq!(player.health, 40);
        player.heal(25);
        player.heal(50);
        assert_eq!(player.health, MAX_HEALTH);
        assert!(player.take_damage(150));
        assert_eq!(player.health, 0);
        // Already dead: not a second kill
        assert!(!player.take_damage(10));
    }

    #[test]
    fn test_projectile_tracks_previous_position() {
        let tuning = Tuning::default();
        let mut shot = Projectile::new(1, Vec3::new(20.0, 0.0, SHIP_Z));
        shot.advance(0.0, &tuning);
        assert_eq!(shot.prev_pos.z, SHIP_Z);
        assert_eq!(shot.pos.z, SHIP_Z + 25.0);

        // Boosted: 25 + 0.8 * 20
        shot.advance(0.8, &tuning);
        assert!((shot.pos.z - shot.prev_pos.z - 41.0).abs() < 1e-4);
    }

    #[test]
    fn test_hazard_speed_scales_with_difficulty() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let enemy = Hazard::enemy(1, 4, &mut rng, &tuning);
        assert_eq!(enemy.speed, 10.0);
        assert_eq!(enemy.kind(), HazardKind::Enemy);
        assert_eq!(enemy.pos.z, FAR_DEPTH);

        let rock = Hazard::asteroid(2, 10, &mut rng, &tuning);
        assert!((rock.speed - 9.0).abs() < 1e-5);
        assert!((ASTEROID_SIZE_MIN..ASTEROID_SIZE_MAX).contains(&rock.size));
        match &rock.body {
            HazardBody::Asteroid(body) => {
                assert_eq!(body.vertices.len(), ASTEROID_VERTICES);
                for v in &body.vertices {
                    let r = v.length();
                    assert!((0.8 - 1e-4..1.2 + 1e-4).contains(&r));
                }
            }
            HazardBody::Enemy => panic!("expected asteroid"),
        }
    }

    #[test]
    fn test_hazard_advance_and_despawn_bound() {
        let tuning = Tuning::default();
        let mut enemy = Hazard::enemy(1, 0, &mut rng(), &tuning);
        enemy.advance(0.0, &tuning);
        assert_eq!(enemy.pos.z, FAR_DEPTH - 8.0);
        enemy.advance(0.8, &tuning);
        assert!((enemy.pos.z - (FAR_DEPTH - 8.0 - 20.0)).abs() < 1e-3);

        enemy.pos.z = NEAR_DEPTH + 1.0;
        assert!(!enemy.passed_camera());
        enemy.advance(0.0, &tuning);
        assert!(enemy.passed_camera());
    }

    #[test]
    fn test_try_destroy_is_idempotent() {
        let mut enemy = Hazard::enemy(1, 0, &mut rng(), &Tuning::default());
        assert!(enemy.try_destroy());
        assert!(!enemy.try_destroy());
        assert!(!enemy.alive);
    }

    #[test]
    fn test_asteroid_impulse_pushes_away_and_decays() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut rock = Hazard::asteroid(1, 0, &mut rng, &tuning);
        rock.pos = Vec3::new(0.0, 0.0, 500.0);
        rock.apply_impulse(Vec3::new(-10.0, 0.0, 500.0), &mut rng);
        assert_eq!(rock.hit_flash(), 1.0);

        let before = rock.pos;
        rock.advance(0.0, &tuning);
        assert!((rock.pos.x - before.x - 8.0).abs() < 1e-4);
        assert!((rock.hit_flash() - 0.95).abs() < 1e-6);
        match &rock.body {
            HazardBody::Asteroid(body) => assert!((body.impulse.x - 7.2).abs() < 1e-4),
            HazardBody::Enemy => unreachable!(),
        }
    }

    #[test]
    fn test_impulse_from_coincident_point_is_zero() {
        let mut rng = rng();
        let mut rock = Hazard::asteroid(1, 0, &mut rng, &Tuning::default());
        let at = rock.pos;
        rock.apply_impulse(at, &mut rng);
        match &rock.body {
            HazardBody::Asteroid(body) => {
                assert_eq!(body.impulse, Vec3::ZERO);
                assert!(body.impulse.is_finite());
            }
            HazardBody::Enemy => unreachable!(),
        }
    }

    #[test]
    fn test_contact_distance_per_kind() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let enemy = Hazard::enemy(1, 0, &mut rng, &tuning);
        assert_eq!(enemy.contact_distance(&tuning), 40.0);
        let rock = Hazard::asteroid(2, 0, &mut rng, &tuning);
        assert_eq!(rock.contact_distance(&tuning), rock.size + 20.0);
    }

    #[test]
    fn test_star_recycles_at_far_bound() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut star = Star::scattered(&mut rng);
        star.pos.z = NEAR_DEPTH + 5.0;
        star.advance(0.0, &mut rng, &tuning);
        assert_eq!(star.pos.z, FAR_DEPTH);
    }
}
