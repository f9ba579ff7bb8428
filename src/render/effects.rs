use crate::game_logic::{ParticleSystem, Rgb, VehicleState};
use crate::render::paint::{WHITE, fill_circle, solid, stroke_line};
use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::PI;
use tiny_skia::{Pixmap, Transform};

const SPARK_COUNT: usize = 3;
const SPARK_ALPHA: f32 = 0.7;
const SPARK_JITTER: f32 = 10.0;
const SPARK_COLORS: [Rgb; 2] = [Rgb::hex(0xffaa00), Rgb::hex(0xffffff)];

const SPEED_LINE_COUNT: usize = 5;
const SPEED_LINE_THRESHOLD: f32 = 6.0;
const SPEED_LINE_HALF: f32 = 5.0;

pub fn draw_smoke(pixmap: &mut Pixmap, particles: &ParticleSystem) {
    for particle in particles.iter() {
        let paint = solid(WHITE, particle.opacity());
        fill_circle(pixmap, particle.position, particle.radius(), &paint, Transform::identity());
    }
}

/// Where the sparks go this frame: trailing behind the car, jittered.
pub fn spark_points<R: Rng + ?Sized>(vehicle: &VehicleState, rng: &mut R) -> [(Vec2, f32); SPARK_COUNT] {
    let behind = Vec2::from_angle(vehicle.heading + PI);
    std::array::from_fn(|i| {
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * SPARK_JITTER;
        let center = vehicle.position + behind * (20.0 + i as f32 * 10.0) + jitter;
        let size = 2.0 + rng.random::<f32>() * 2.0;
        (center, size)
    })
}

pub fn draw_sparks<R: Rng + ?Sized>(pixmap: &mut Pixmap, vehicle: &VehicleState, rng: &mut R) {
    for (i, (center, size)) in spark_points(vehicle, rng).into_iter().enumerate() {
        let paint = solid(SPARK_COLORS[i % SPARK_COLORS.len()], SPARK_ALPHA);
        fill_circle(pixmap, center, size, &paint, Transform::identity());
    }
}

/// Opacity of the speed streaks, zero below the threshold.
pub fn speed_line_alpha(speed: f32) -> f32 {
    if speed > SPEED_LINE_THRESHOLD {
        ((speed - SPEED_LINE_THRESHOLD) / 2.0).min(1.0)
    } else {
        0.0
    }
}

pub fn draw_speed_lines(pixmap: &mut Pixmap, vehicle: &VehicleState) {
    let alpha = speed_line_alpha(vehicle.speed);
    if alpha <= 0.0 {
        return;
    }
    let paint = solid(WHITE, alpha);
    let forward = vehicle.forward_vector();
    for i in 0..SPEED_LINE_COUNT {
        let center = vehicle.position - forward * (30.0 + i as f32 * 20.0);
        stroke_line(
            pixmap,
            center - Vec2::X * SPEED_LINE_HALF,
            center + Vec2::X * SPEED_LINE_HALF,
            1.0,
            None,
            &paint,
            Transform::identity(),
        );
    }
}
