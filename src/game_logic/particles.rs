use crate::game_logic::SMOKE_DRAG;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

/// A puff of tire smoke.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Starts at 1.0, the particle dies at or below zero.
    pub life: f32,
    pub decay: f32,
    pub size: f32,
}

impl Particle {
    /// Smoke kicked out behind a car pointing along `heading`.
    pub fn drift_smoke<R: Rng + ?Sized>(origin: Vec2, heading: f32, rng: &mut R) -> Self {
        let exhaust_speed = 2.0 + rng.random::<f32>() * 3.0;
        Self {
            position: origin,
            velocity: Vec2::from_angle(heading + PI) * exhaust_speed,
            life: 1.0,
            decay: 0.02 + rng.random::<f32>() * 0.02,
            size: 2.0 + rng.random::<f32>() * 3.0,
        }
    }

    /// Advance one frame. Returns false once the particle has burned out.
    pub fn tick(&mut self) -> bool {
        self.position += self.velocity;
        self.velocity *= SMOKE_DRAG;
        self.life -= self.decay;
        self.life > 0.0
    }

    pub fn radius(&self) -> f32 {
        self.size * self.life
    }

    pub fn opacity(&self) -> f32 {
        self.life * 0.8
    }
}

/// Live smoke. Each particle fades on its own, so the set drains once drifting stops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn emit(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Move and fade every particle, dropping the dead ones.
    pub fn age(&mut self) {
        self.particles.retain_mut(Particle::tick);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn puff(decay: f32) -> Particle {
        Particle {
            position: Vec2::ZERO,
            velocity: Vec2::new(1.0, 0.0),
            life: 1.0,
            decay,
            size: 4.0,
        }
    }

    #[test]
    fn smoke_is_born_full_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::drift_smoke(Vec2::new(5.0, 5.0), 0.0, &mut rng);
            assert_eq!(p.life, 1.0);
            assert!((0.02..0.04).contains(&p.decay));
            assert!((2.0..5.0).contains(&p.size));
            // heading 0 means the smoke flies toward -x
            assert!(p.velocity.x < 0.0);
            let speed = p.velocity.length();
            assert!((2.0..=5.0).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn tick_moves_drags_and_fades() {
        let mut p = puff(0.03);
        assert!(p.tick());
        assert_eq!(p.position, Vec2::new(1.0, 0.0));
        assert_eq!(p.velocity, Vec2::new(0.98, 0.0));
        assert!((p.life - 0.97).abs() < 1e-6);
    }

    #[test]
    fn age_drops_dead_particles() {
        let mut system = ParticleSystem::default();
        system.emit(puff(0.5));
        system.emit(puff(0.02));
        system.age();
        assert_eq!(system.len(), 2);
        system.age();
        assert_eq!(system.len(), 1);
        assert!(system.iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn survivors_lose_life_every_frame() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut system = ParticleSystem::default();
        for _ in 0..20 {
            system.emit(Particle::drift_smoke(Vec2::ZERO, 1.0, &mut rng));
        }

        let mut frames = 0;
        while !system.is_empty() {
            let expected: Vec<f32> = system
                .iter()
                .map(|p| p.life - p.decay)
                .filter(|life| *life > 0.0)
                .collect();
            system.age();

            let after: Vec<f32> = system.iter().map(|p| p.life).collect();
            assert_eq!(after, expected);
            assert!(after.iter().all(|life| *life > 0.0));

            frames += 1;
            assert!(frames <= 51, "smoke should burn out within 1/0.02 frames");
        }
    }
}
