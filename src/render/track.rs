use crate::game_logic::{Rgb, Theme, Track};
use crate::render::paint::{BLACK, WHITE, fill_rect, solid, stroke_circle, stroke_line, vertical_gradient};
use bevy::math::Vec2;
use tiny_skia::{Pixmap, Transform};

const LANE_COLOR: Rgb = Rgb::hex(0x3a3a3a);
const LANE_DASH: [f32; 2] = [5.0, 5.0];
const LANE_SPACING: f32 = 100.0;
const LANE_START: f32 = 50.0;
const LANE_INSET: f32 = 20.0;

const CURVE_WIDTH: f32 = 3.0;
const STRIPE_PITCH: f32 = 20.0;
const STRIPE_WIDTH: f32 = 10.0;

// Layers of the soft glow round each wall: (spread, alpha)
const GLOW: [(f32, f32); 3] = [(9.0, 0.08), (6.0, 0.12), (3.0, 0.2)];

pub fn background_colors(theme: Theme) -> (Rgb, Rgb) {
    match theme {
        Theme::Night => (Rgb::hex(0x0f0f23), Rgb::hex(0x1a1a2e)),
        Theme::Sunset => (Rgb::hex(0x2d1b3d), Rgb::hex(0x1a1a2e)),
        Theme::Neon => (Rgb::hex(0x0a0a0a), Rgb::hex(0x1a0a1a)),
        Theme::Classic | Theme::Industrial => (Rgb::hex(0x1a1a1a), Rgb::hex(0x2a2a2a)),
    }
}

/// Everything that doesn't move: backdrop, tarmac, walls, decorations.
pub fn draw_track(pixmap: &mut Pixmap, track: &Track) {
    let identity = Transform::identity();
    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);

    let (top, bottom) = background_colors(track.theme);
    fill_rect(pixmap, 0.0, 0.0, width, height, &vertical_gradient(top, bottom, 0.0, 0.0, height), identity);

    let surface = track.surface();
    fill_rect(
        pixmap,
        surface.x,
        surface.y,
        surface.width,
        surface.height,
        &solid(track.surface_color, 1.0),
        identity,
    );

    draw_lane_markers(pixmap, track);

    for (spread, alpha) in GLOW {
        let glow = solid(track.boundary_color, alpha);
        for wall in &track.boundaries {
            fill_rect(
                pixmap,
                wall.x - spread,
                wall.y - spread,
                wall.width + 2.0 * spread,
                wall.height + 2.0 * spread,
                &glow,
                identity,
            );
        }
    }
    let wall_paint = solid(track.boundary_color, 1.0);
    for wall in &track.boundaries {
        fill_rect(pixmap, wall.x, wall.y, wall.width, wall.height, &wall_paint, identity);
    }

    let accent = solid(track.accent_color, 1.0);
    for curve in track.curves {
        stroke_circle(pixmap, curve.center, curve.radius, CURVE_WIDTH, &accent, identity);
    }

    if let Some(line) = &track.start_line {
        fill_rect(pixmap, line.x, line.y, line.width, line.height, &solid(WHITE, 1.0), identity);
        let stripe = solid(BLACK, 1.0);
        let mut offset = 0.0;
        while offset < line.width {
            fill_rect(pixmap, line.x + offset, line.y, STRIPE_WIDTH, line.height, &stripe, identity);
            offset += STRIPE_PITCH;
        }
    }
}

/// Offsets from the surface edge where lane markers go, across a span of `extent`.
pub fn lane_offsets(extent: f32) -> impl Iterator<Item = f32> {
    std::iter::successors(Some(LANE_START), |offset| Some(offset + LANE_SPACING))
        .take_while(move |offset| *offset < extent - LANE_START)
}

fn draw_lane_markers(pixmap: &mut Pixmap, track: &Track) {
    let surface = track.surface();
    let paint = solid(LANE_COLOR, 1.0);
    let identity = Transform::identity();

    for dx in lane_offsets(surface.width) {
        let x = surface.x + dx;
        stroke_line(
            pixmap,
            Vec2::new(x, surface.y + LANE_INSET),
            Vec2::new(x, surface.bottom() - LANE_INSET),
            1.0,
            Some(LANE_DASH),
            &paint,
            identity,
        );
    }
    for dy in lane_offsets(surface.height) {
        let y = surface.y + dy;
        stroke_line(
            pixmap,
            Vec2::new(surface.x + LANE_INSET, y),
            Vec2::new(surface.right() - LANE_INSET, y),
            1.0,
            Some(LANE_DASH),
            &paint,
            identity,
        );
    }
}
