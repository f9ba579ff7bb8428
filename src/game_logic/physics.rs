use crate::game_logic::{
    AIR_RESISTANCE, Archetype, DRIFT_MIN_ANGLE, DRIFT_MIN_SPEED, DRIFT_MIN_VELOCITY, DriftScore,
    Particle, ParticleSystem, SMOKE_SPAWN_CHANCE, SMOKE_SPAWN_OFFSET, Track, VELOCITY_GAIN,
    VehicleState, WHEEL_LIMIT, WHEEL_RETURN, WHEEL_STEP, clamp_to_track,
};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Input state for one physics frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// What happened during one frame, for bookkeeping outside the physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub points: u64,
    pub drifting: bool,
    pub emitted: bool,
}

/// Advance the car, its smoke and the score by exactly one frame.
///
/// There is no delta time: a faster display runs a faster game.
pub fn apply_physics<R: Rng + ?Sized>(
    car: &mut VehicleState,
    particles: &mut ParticleSystem,
    score: &mut DriftScore,
    archetype: &Archetype,
    track: &Track,
    input: &PhysicsInput,
    rng: &mut R,
) -> StepReport {
    apply_throttle(car, archetype, input);
    apply_steering(car, archetype, input);

    car.speed *= archetype.friction;

    let emitted = detect_drift(car, particles, rng);

    let forward = car.forward_vector();
    car.velocity += forward * car.speed * VELOCITY_GAIN;
    car.velocity *= AIR_RESISTANCE;

    car.position += car.velocity;
    clamp_to_track(&mut car.position, track);

    particles.age();

    let points = score.record(car.is_drifting, car.drift_angle, car.speed, archetype.drift_multiplier);

    StepReport {
        points,
        drifting: car.is_drifting,
        emitted,
    }
}

/// Forward then reverse; holding both nets out to roughly nothing.
pub fn apply_throttle(car: &mut VehicleState, archetype: &Archetype, input: &PhysicsInput) {
    if input.forward {
        car.speed = (car.speed + archetype.acceleration).min(archetype.max_speed);
    }
    if input.backward {
        car.speed = (car.speed - archetype.acceleration).max(archetype.reverse_limit());
    }
}

/// Left beats right. Turn rate scales with speed, so a parked car can't spin.
pub fn apply_steering(car: &mut VehicleState, archetype: &Archetype, input: &PhysicsInput) {
    let turn = archetype.handling * (car.speed / 2.0);
    if input.left {
        car.heading -= turn;
        car.wheel_angle = (car.wheel_angle - WHEEL_STEP).max(-WHEEL_LIMIT);
    } else if input.right {
        car.heading += turn;
        car.wheel_angle = (car.wheel_angle + WHEEL_STEP).min(WHEEL_LIMIT);
    } else {
        car.wheel_angle *= WHEEL_RETURN;
    }
}

/// Absolute difference between two angles, folded into [0, PI].
///
/// Headings are never wrapped, so the raw difference is reduced to one turn first.
pub fn normalized_angle_diff(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff).clamp(0.0, PI)
}

pub fn drift_condition(velocity_magnitude: f32, angle_diff: f32, speed: f32) -> bool {
    velocity_magnitude > DRIFT_MIN_VELOCITY && angle_diff > DRIFT_MIN_ANGLE && speed > DRIFT_MIN_SPEED
}

/// Update the drift flag and angle, possibly puffing smoke out the back.
///
/// Returns true when a particle was emitted. A car that has almost stopped
/// stops drifting but keeps its last drift angle.
pub fn detect_drift<R: Rng + ?Sized>(
    car: &mut VehicleState,
    particles: &mut ParticleSystem,
    rng: &mut R,
) -> bool {
    let Some(travel) = car.travel_angle() else {
        car.is_drifting = false;
        return false;
    };

    let angle_diff = normalized_angle_diff(car.heading, travel);
    car.is_drifting = drift_condition(car.velocity.length(), angle_diff, car.speed);
    car.drift_angle = angle_diff;

    if car.is_drifting && rng.random_bool(SMOKE_SPAWN_CHANCE) {
        let origin = car.position - car.forward_vector() * SMOKE_SPAWN_OFFSET;
        particles.emit(Particle::drift_smoke(origin, car.heading, rng));
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{ARCHETYPES, TRACKS};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn held(forward: bool, backward: bool, left: bool, right: bool) -> PhysicsInput {
        PhysicsInput {
            forward,
            backward,
            left,
            right,
        }
    }

    #[test]
    fn accelerating_from_rest_on_alpha() {
        let archetype = &ARCHETYPES[0];
        let track = &TRACKS[0];
        let mut car = VehicleState::spawn(track.start.as_ref());
        let mut particles = ParticleSystem::default();
        let mut score = DriftScore::default();
        let mut rng = StdRng::seed_from_u64(1);
        let input = held(true, false, false, false);

        let mut last = car.speed;
        for _ in 0..10 {
            apply_physics(&mut car, &mut particles, &mut score, archetype, track, &input, &mut rng);
            assert!(car.speed > last, "{} <= {}", car.speed, last);
            assert!(car.speed <= archetype.max_speed);
            last = car.speed;
        }
        assert!(!car.is_drifting);
        assert!(car.position.x > track.start.map(|s| s.position.x).unwrap_or_default());
    }

    #[test]
    fn speed_is_capped_both_ways() {
        let archetype = &ARCHETYPES[2];
        let mut car = VehicleState::at_rest(Vec2::ZERO, 0.0);

        car.speed = archetype.max_speed;
        apply_throttle(&mut car, archetype, &held(true, false, false, false));
        assert_eq!(car.speed, archetype.max_speed);

        car.speed = archetype.reverse_limit();
        apply_throttle(&mut car, archetype, &held(false, true, false, false));
        assert_eq!(car.speed, archetype.reverse_limit());
    }

    #[test]
    fn left_wins_over_right() {
        let archetype = &ARCHETYPES[0];
        let mut car = VehicleState::at_rest(Vec2::ZERO, 0.0);
        car.speed = 4.0;
        apply_steering(&mut car, archetype, &held(false, false, true, true));
        assert!(car.heading < 0.0);
        assert!((car.wheel_angle + WHEEL_STEP).abs() < 1e-6);
    }

    #[test]
    fn wheel_clamps_then_recenters() {
        let archetype = &ARCHETYPES[0];
        let mut car = VehicleState::at_rest(Vec2::ZERO, 0.0);
        for _ in 0..10 {
            apply_steering(&mut car, archetype, &held(false, false, false, true));
        }
        assert_eq!(car.wheel_angle, WHEEL_LIMIT);
        // stationary, so steering doesn't turn the car
        assert_eq!(car.heading, 0.0);

        apply_steering(&mut car, archetype, &PhysicsInput::default());
        assert!((car.wheel_angle - WHEEL_LIMIT * WHEEL_RETURN).abs() < 1e-6);
    }

    #[test]
    fn sideways_slide_is_a_drift_and_smokes() {
        let mut emitted_on_some_seed = false;
        for seed in 0..64 {
            let mut car = VehicleState::at_rest(Vec2::new(400.0, 300.0), 0.0);
            car.speed = 5.0;
            car.velocity = Vec2::from_angle(0.5) * 5.0;
            let mut particles = ParticleSystem::default();
            let mut rng = StdRng::seed_from_u64(seed);

            let emitted = detect_drift(&mut car, &mut particles, &mut rng);
            assert!(car.is_drifting);
            assert!((car.drift_angle - 0.5).abs() < 1e-5);

            if emitted {
                emitted_on_some_seed = true;
                let smoke = particles.iter().next().expect("emitted particle");
                assert_eq!(smoke.life, 1.0);
                assert!((smoke.position - Vec2::new(385.0, 300.0)).length() < 1e-4);
            } else {
                assert!(particles.is_empty());
            }
        }
        assert!(emitted_on_some_seed);
    }

    #[test]
    fn near_stop_keeps_last_drift_angle() {
        let mut car = VehicleState::at_rest(Vec2::ZERO, 0.0);
        car.is_drifting = true;
        car.drift_angle = 0.8;
        car.velocity = Vec2::new(0.05, 0.0);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(!detect_drift(&mut car, &mut ParticleSystem::default(), &mut rng));
        assert!(!car.is_drifting);
        assert_eq!(car.drift_angle, 0.8);
    }

    #[test]
    fn left_wall_stops_a_car_heading_into_it() {
        let archetype = &ARCHETYPES[0];
        let track = &TRACKS[0];
        let mut car = VehicleState::at_rest(Vec2::new(90.0, 300.0), std::f32::consts::PI);
        car.speed = 8.0;
        car.velocity = Vec2::new(-8.0, 0.0);
        let mut rng = StdRng::seed_from_u64(5);

        apply_physics(
            &mut car,
            &mut ParticleSystem::default(),
            &mut DriftScore::default(),
            archetype,
            track,
            &PhysicsInput::default(),
            &mut rng,
        );
        let left = track.left();
        assert_eq!(car.position.x, left.x + left.width + 15.0);
    }

    #[test]
    fn drifting_frame_scores_and_extends_streak() {
        let archetype = &ARCHETYPES[8];
        let track = &TRACKS[0];
        let mut car = VehicleState::at_rest(Vec2::new(400.0, 300.0), 0.0);
        car.speed = 6.0;
        car.velocity = Vec2::from_angle(0.8) * 6.0;
        let mut score = DriftScore::default();
        let mut rng = StdRng::seed_from_u64(9);

        let report = apply_physics(
            &mut car,
            &mut ParticleSystem::default(),
            &mut score,
            archetype,
            track,
            &PhysicsInput::default(),
            &mut rng,
        );
        assert!(report.drifting);
        assert!(report.points > 0);
        assert_eq!(score.score, report.points);
        assert_eq!(score.streak, 1);
        assert_eq!(score.drift_frames, 1);
    }

    #[test]
    fn angle_diff_folds_across_the_seam() {
        assert!((normalized_angle_diff(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-5);
        assert!((normalized_angle_diff(0.2, -0.2) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn slide_still_drifts_after_full_turns() {
        for turns in [1.0, 2.0, -3.0] {
            let mut car = VehicleState::at_rest(Vec2::new(400.0, 300.0), 0.5 + turns * TAU);
            car.speed = 5.0;
            car.velocity = Vec2::new(5.0, 0.0);
            let mut rng = StdRng::seed_from_u64(1);

            detect_drift(&mut car, &mut ParticleSystem::default(), &mut rng);
            assert!(car.is_drifting, "{turns} turns");
            assert!((car.drift_angle - 0.5).abs() < 1e-4, "{turns} turns: {}", car.drift_angle);
        }
    }

    proptest! {
        #[test]
        fn drift_condition_thresholds(
            velocity in 0.0f32..0.2,
            angle in 0.2f32..0.4,
            speed in 2.9f32..3.1,
        ) {
            let expected = velocity > 0.1 && angle > 0.3 && speed > 3.0;
            prop_assert_eq!(drift_condition(velocity, angle, speed), expected);
        }

        #[test]
        fn drift_flag_matches_condition(
            heading in -40.0f32..40.0,
            travel in -3.0f32..3.0,
            magnitude in 0.0f32..8.0,
            speed in -4.0f32..10.0,
            seed in any::<u64>(),
        ) {
            let mut car = VehicleState::at_rest(Vec2::new(400.0, 300.0), heading);
            car.speed = speed;
            car.velocity = Vec2::from_angle(travel) * magnitude;
            let mut rng = StdRng::seed_from_u64(seed);

            let emitted = detect_drift(&mut car, &mut ParticleSystem::default(), &mut rng);
            let velocity = car.velocity.length();
            let diff = normalized_angle_diff(heading, car.velocity.y.atan2(car.velocity.x));
            prop_assert_eq!(car.is_drifting, drift_condition(velocity, diff, speed));
            prop_assert!(car.drift_angle >= 0.0 && car.drift_angle <= PI);
            prop_assert!(!emitted || car.is_drifting);
        }

        #[test]
        fn position_stays_on_track(
            track_index in 0usize..5,
            car_index in 0usize..12,
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..120),
        ) {
            let track = &TRACKS[track_index];
            let archetype = &ARCHETYPES[car_index];
            let mut car = VehicleState::spawn(track.start.as_ref());
            let mut particles = ParticleSystem::default();
            let mut score = DriftScore::default();
            let mut rng = StdRng::seed_from_u64(42);

            for (f, b, l, r) in inputs {
                apply_physics(&mut car, &mut particles, &mut score, archetype, track, &held(f, b, l, r), &mut rng);
                prop_assert!(track.drivable_area().contains(car.position));
                prop_assert!(car.wheel_angle.abs() <= WHEEL_LIMIT);
                prop_assert!(particles.iter().all(|p| p.life > 0.0));
            }
        }
    }
}
