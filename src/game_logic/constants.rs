use bevy::prelude::Vec2;

// Drawing surface, track coordinates map 1:1 onto it
pub const CANVAS_W: u32 = 800;
pub const CANVAS_H: u32 = 600;

// Frame loop
pub const FRAMES_PER_SECOND: u64 = 60;

// Physics constants (per frame, no delta-time scaling)
pub const CAR_HALF_WIDTH: f32 = 15.0;
pub const REVERSE_SPEED_RATIO: f32 = 0.5;
pub const WHEEL_STEP: f32 = 0.1;
pub const WHEEL_LIMIT: f32 = 0.5;
pub const WHEEL_RETURN: f32 = 0.9;
pub const VELOCITY_GAIN: f32 = 0.1;
pub const AIR_RESISTANCE: f32 = 0.98;

// Drift detection
pub const DRIFT_MIN_VELOCITY: f32 = 0.1;
pub const DRIFT_MIN_ANGLE: f32 = 0.3;
pub const DRIFT_MIN_SPEED: f32 = 3.0;
pub const SCORING_MIN_SPEED: f32 = 2.0;

// Drift smoke
pub const SMOKE_SPAWN_CHANCE: f64 = 0.3;
pub const SMOKE_SPAWN_OFFSET: f32 = 15.0;
pub const SMOKE_DRAG: f32 = 0.98;

// Where the car spawns on tracks without a start position
pub const DEFAULT_START: Vec2 = Vec2::new(400.0, 300.0);
