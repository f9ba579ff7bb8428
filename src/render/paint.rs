//! Thin drawing helpers over tiny-skia, shaped like the immediate-mode calls the
//! scene is described in (filled rects, circles, dashed strokes).

use crate::game_logic::{CarRect, Rgb};
use bevy::math::Vec2;
use std::f32::consts::PI;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect,
    SpreadMode, Stroke, StrokeDash, Transform,
};

const ARC_SEGMENTS: usize = 16;

pub const WHITE: Rgb = Rgb::hex(0xffffff);
pub const BLACK: Rgb = Rgb::hex(0x000000);

pub fn color(rgb: Rgb, alpha: f32) -> Color {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::from_rgba8(rgb.0, rgb.1, rgb.2, alpha)
}

pub fn solid(rgb: Rgb, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb, alpha));
    paint.anti_alias = true;
    paint
}

/// Two-stop gradient running straight down from `y0` to `y1`.
///
/// Falls back to a flat `top` fill when the span is degenerate.
pub fn vertical_gradient(top: Rgb, bottom: Rgb, x: f32, y0: f32, y1: f32) -> Paint<'static> {
    let shader = LinearGradient::new(
        Point::from_xy(x, y0),
        Point::from_xy(x, y1),
        vec![
            GradientStop::new(0.0, color(top, 1.0)),
            GradientStop::new(1.0, color(bottom, 1.0)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    match shader {
        Some(shader) => Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        },
        None => solid(top, 1.0),
    }
}

/// Zero or negative sized rectangles are silently skipped.
pub fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, paint: &Paint, transform: Transform) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, paint, transform, None);
    }
}

pub fn fill_car_rect(pixmap: &mut Pixmap, rect: &CarRect, paint: &Paint, transform: Transform) {
    fill_rect(pixmap, rect.x, rect.y, rect.w, rect.h, paint, transform);
}

pub fn fill_circle(pixmap: &mut Pixmap, center: Vec2, radius: f32, paint: &Paint, transform: Transform) {
    if radius <= 0.0 {
        return;
    }
    if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
        pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
    }
}

pub fn stroke_circle(
    pixmap: &mut Pixmap,
    center: Vec2,
    radius: f32,
    width: f32,
    paint: &Paint,
    transform: Transform,
) {
    if radius <= 0.0 {
        return;
    }
    if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, paint, &stroke, transform, None);
    }
}

/// Straight line, optionally dashed as `[on, off]`.
pub fn stroke_line(
    pixmap: &mut Pixmap,
    from: Vec2,
    to: Vec2,
    width: f32,
    dash: Option<[f32; 2]>,
    paint: &Paint,
    transform: Transform,
) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width,
        dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, paint, &stroke, transform, None);
}

/// The upper half of a circle (from PI round to 2*PI, y pointing down), as a polyline.
pub fn stroke_upper_arc(
    pixmap: &mut Pixmap,
    center: Vec2,
    radius: f32,
    width: f32,
    paint: &Paint,
    transform: Transform,
) {
    let mut pb = PathBuilder::new();
    for i in 0..=ARC_SEGMENTS {
        let theta = PI + PI * i as f32 / ARC_SEGMENTS as f32;
        let point = center + Vec2::from_angle(theta) * radius;
        if i == 0 {
            pb.move_to(point.x, point.y);
        } else {
            pb.line_to(point.x, point.y);
        }
    }
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, paint, &stroke, transform, None);
}

/// Transform placing car-local coordinates at `position`, nose along `heading` (radians).
pub fn local_frame(position: Vec2, heading: f32) -> Transform {
    Transform::from_translate(position.x, position.y).pre_rotate(heading.to_degrees())
}
