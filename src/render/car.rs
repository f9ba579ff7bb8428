use crate::game_logic::{Archetype, CarRect, ColorScheme, Lamp, Rgb, Trim, VehicleState};
use crate::render::paint::{
    BLACK, fill_car_rect, fill_circle, fill_rect, local_frame, solid, stroke_circle,
    stroke_upper_arc, vertical_gradient,
};
use bevy::math::Vec2;
use tiny_skia::{Pixmap, Transform};

const SHADOW_OFFSET: f32 = 3.0;
const SHADOW_ALPHA: f32 = 0.3;
const GLASS_ALPHA: f32 = 0.8;
const ROLL_BAR_WIDTH: f32 = 2.0;

const CABIN: Rgb = Rgb::hex(0x2a2a2a);
const TIRE: Rgb = Rgb::hex(0x1a1a1a);
const TIRE_MARK: Rgb = Rgb::hex(0x444444);

// Body gradient spans the widest body, whatever the model
const GRADIENT_X: f32 = -22.0;
const GRADIENT_TOP: f32 = -12.0;
const GRADIENT_BOTTOM: f32 = 12.0;

const FRONT_AXLE: f32 = 12.0;
const REAR_AXLE: f32 = -14.0;
const TRACK_HALF: f32 = 10.0;

const TIRE_MARKS: [CarRect; 2] = [CarRect::new(-16., -8., 2., 4.), CarRect::new(-16., 4., 2., 4.)];

/// Draw one car from its archetype's silhouette, painted in `colors`.
pub fn draw_car(pixmap: &mut Pixmap, vehicle: &VehicleState, archetype: &Archetype, colors: &ColorScheme) {
    let shape = &archetype.shape;
    let frame = local_frame(vehicle.position, vehicle.heading);

    fill_car_rect(
        pixmap,
        &shape.shadow,
        &solid(BLACK, SHADOW_ALPHA),
        frame.pre_translate(SHADOW_OFFSET, SHADOW_OFFSET),
    );

    let (top, bottom) = if vehicle.is_drifting {
        (colors.primary, colors.secondary)
    } else {
        (colors.secondary, colors.primary)
    };
    fill_car_rect(
        pixmap,
        &shape.body,
        &vertical_gradient(top, bottom, GRADIENT_X, GRADIENT_TOP, GRADIENT_BOTTOM),
        frame,
    );

    let accent = solid(colors.accent, 1.0);
    for trim in shape.trim {
        match *trim {
            Trim::Bar(rect) => fill_car_rect(pixmap, &rect, &accent, frame),
            Trim::RollBar { cx, cy, radius } => {
                stroke_upper_arc(pixmap, Vec2::new(cx, cy), radius, ROLL_BAR_WIDTH, &accent, frame)
            }
        }
    }

    fill_car_rect(pixmap, &shape.cabin, &solid(CABIN, 1.0), frame);
    fill_car_rect(pixmap, &shape.windshield, &solid(colors.glass, GLASS_ALPHA), frame);

    let lights = solid(colors.lights, 1.0);
    for lamp in shape.headlights.lamps() {
        match *lamp {
            Lamp::Rect(rect) => fill_car_rect(pixmap, &rect, &lights, frame),
            Lamp::Dot { x, y, radius } => fill_circle(pixmap, Vec2::new(x, y), radius, &lights, frame),
        }
    }

    for side in [-TRACK_HALF, TRACK_HALF] {
        let hub = frame
            .pre_translate(FRONT_AXLE, side)
            .pre_rotate(vehicle.wheel_angle.to_degrees());
        draw_front_wheel(pixmap, shape.wheel_size, colors.rims, hub);
    }

    let tire = solid(TIRE, 1.0);
    let rim = solid(colors.rims, 1.0);
    let size = shape.wheel_size;
    for side in [-TRACK_HALF, TRACK_HALF] {
        fill_rect(pixmap, REAR_AXLE, side - size / 2.0, 4.0, size, &tire, frame);
        fill_rect(pixmap, REAR_AXLE + 1.0, side - size / 2.0 + 1.0, 2.0, size - 2.0, &rim, frame);
    }

    if vehicle.is_drifting {
        let marks = solid(TIRE_MARK, 1.0);
        for mark in &TIRE_MARKS {
            fill_car_rect(pixmap, mark, &marks, frame);
        }
    }
}

/// Tire, rim and brake-disc ring, centered on the hub.
fn draw_front_wheel(pixmap: &mut Pixmap, size: f32, rims: Rgb, hub: Transform) {
    fill_rect(pixmap, -2.0, -size / 2.0, 4.0, size, &solid(TIRE, 1.0), hub);
    let rim = solid(rims, 1.0);
    fill_rect(pixmap, -1.0, -size / 2.0 + 1.0, 2.0, size - 2.0, &rim, hub);
    stroke_circle(pixmap, Vec2::ZERO, size / 2.0 - 1.0, 1.0, &rim, hub);
}
