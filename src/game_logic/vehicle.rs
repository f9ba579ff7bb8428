use crate::game_logic::{DEFAULT_START, DRIFT_MIN_VELOCITY, StartPosition};
use bevy::prelude::*;

/// Kinematic state of the car being driven.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    pub position: Vec2,
    /// Radians, never wrapped.
    pub heading: f32,
    /// Accumulated every frame; lags behind the heading, which is what makes the car drift.
    pub velocity: Vec2,
    /// Signed speed along the heading.
    pub speed: f32,
    /// Visual steering only, in [-0.5, 0.5].
    pub wheel_angle: f32,
    pub is_drifting: bool,
    /// Angle between heading and direction of travel, in [0, PI].
    pub drift_angle: f32,
}

impl VehicleState {
    pub fn at_rest(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading,
            velocity: Vec2::ZERO,
            speed: 0.0,
            wheel_angle: 0.0,
            is_drifting: false,
            drift_angle: 0.0,
        }
    }

    /// Place a fresh car on a track's grid slot, or mid-canvas when the track has none.
    pub fn spawn(start: Option<&StartPosition>) -> Self {
        match start {
            Some(start) => Self::at_rest(start.position, start.heading),
            None => Self::at_rest(DEFAULT_START, 0.0),
        }
    }

    pub fn forward_vector(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }

    /// Direction of travel, or `None` while the car is practically still.
    pub fn travel_angle(&self) -> Option<f32> {
        if self.velocity.length() > DRIFT_MIN_VELOCITY {
            Some(self.velocity.y.atan2(self.velocity.x))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spawn_uses_start_position() {
        let start = StartPosition {
            position: Vec2::new(10.0, 20.0),
            heading: FRAC_PI_2,
        };
        let car = VehicleState::spawn(Some(&start));
        assert_eq!(car.position, Vec2::new(10.0, 20.0));
        assert_eq!(car.heading, FRAC_PI_2);
        assert_eq!(car.velocity, Vec2::ZERO);
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn spawn_without_start_lands_mid_canvas() {
        let car = VehicleState::spawn(None);
        assert_eq!(car.position, DEFAULT_START);
        assert_eq!(car.heading, 0.0);
    }

    #[test]
    fn travel_angle_needs_some_motion() {
        let mut car = VehicleState::at_rest(Vec2::ZERO, 0.0);
        car.velocity = Vec2::new(0.05, 0.05);
        assert!(car.travel_angle().is_none());

        car.velocity = Vec2::new(0.0, 2.0);
        let angle = car.travel_angle().unwrap();
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }
}
