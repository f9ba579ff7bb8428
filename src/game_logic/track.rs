use crate::game_logic::{CAR_HALF_WIDTH, Rgb};
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Classic,
    Night,
    Sunset,
    Neon,
    Industrial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Axis-aligned rectangle in track space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Decorative circle painted on the surface. Not collidable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    pub center: Vec2,
    pub radius: f32,
}

const fn curve(x: f32, y: f32, radius: f32) -> Curve {
    Curve {
        center: Vec2::new(x, y),
        radius,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartPosition {
    pub position: Vec2,
    pub heading: f32,
}

/// Area the car's center may occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrivableArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl DrivableArea {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

const TOP: usize = 0;
const LEFT: usize = 1;
const BOTTOM: usize = 2;
const RIGHT: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub theme: Theme,
    pub surface_color: Rgb,
    pub boundary_color: Rgb,
    pub accent_color: Rgb,
    pub start: Option<StartPosition>,
    /// Ordered top, left, bottom, right.
    pub boundaries: [Bounds; 4],
    pub curves: &'static [Curve],
    pub start_line: Option<Bounds>,
}

impl Track {
    pub fn top(&self) -> &Bounds {
        &self.boundaries[TOP]
    }

    pub fn left(&self) -> &Bounds {
        &self.boundaries[LEFT]
    }

    pub fn bottom(&self) -> &Bounds {
        &self.boundaries[BOTTOM]
    }

    pub fn right(&self) -> &Bounds {
        &self.boundaries[RIGHT]
    }

    /// The paved rectangle enclosed by the four walls.
    pub fn surface(&self) -> Bounds {
        let x = self.left().right();
        let y = self.top().bottom();
        Bounds::new(x, y, self.right().x - x, self.bottom().y - y)
    }

    /// The surface shrunk by the car's half width on every side.
    pub fn drivable_area(&self) -> DrivableArea {
        DrivableArea {
            min: Vec2::new(
                self.left().right() + CAR_HALF_WIDTH,
                self.top().bottom() + CAR_HALF_WIDTH,
            ),
            max: Vec2::new(self.right().x - CAR_HALF_WIDTH, self.bottom().y - CAR_HALF_WIDTH),
        }
    }
}

pub static TRACKS: [Track; 5] = [
    Track {
        name: "Circuito Alpha",
        difficulty: Difficulty::Easy,
        description: "Beginner friendly layout with gentle sweepers",
        theme: Theme::Classic,
        surface_color: Rgb::hex(0x2a2a2a),
        boundary_color: Rgb::hex(0xff4444),
        accent_color: Rgb::hex(0x666666),
        start: Some(StartPosition {
            position: Vec2::new(150.0, 300.0),
            heading: 0.0,
        }),
        boundaries: [
            Bounds::new(50., 50., 700., 20.),
            Bounds::new(50., 50., 20., 500.),
            Bounds::new(50., 530., 700., 20.),
            Bounds::new(730., 50., 20., 500.),
        ],
        curves: &[
            curve(200., 150., 80.),
            curve(600., 200., 60.),
            curve(300., 400., 90.),
            curve(550., 450., 70.),
        ],
        start_line: Some(Bounds::new(120., 280., 60., 40.)),
    },
    Track {
        name: "Velocidade Noturna",
        difficulty: Difficulty::Medium,
        description: "Neon-lit city circuit with demanding corners",
        theme: Theme::Night,
        surface_color: Rgb::hex(0x1a1a2e),
        boundary_color: Rgb::hex(0x00d4ff),
        accent_color: Rgb::hex(0xff6b9d),
        start: Some(StartPosition {
            position: Vec2::new(100.0, 300.0),
            heading: 0.0,
        }),
        boundaries: [
            Bounds::new(30., 30., 740., 15.),
            Bounds::new(30., 30., 15., 540.),
            Bounds::new(30., 555., 740., 15.),
            Bounds::new(755., 30., 15., 540.),
        ],
        curves: &[
            curve(150., 120., 60.),
            curve(650., 150., 80.),
            curve(200., 450., 70.),
            curve(600., 480., 90.),
            curve(400., 300., 100.),
        ],
        start_line: Some(Bounds::new(70., 280., 60., 40.)),
    },
    Track {
        name: "Pôr do Sol",
        difficulty: Difficulty::Medium,
        description: "Warm gradients and flowing curves",
        theme: Theme::Sunset,
        surface_color: Rgb::hex(0x3a2a4a),
        boundary_color: Rgb::hex(0xff8c42),
        accent_color: Rgb::hex(0xffaa77),
        start: Some(StartPosition {
            position: Vec2::new(400.0, 550.0),
            heading: -FRAC_PI_2,
        }),
        boundaries: [
            Bounds::new(80., 80., 640., 25.),
            Bounds::new(80., 80., 25., 440.),
            Bounds::new(80., 495., 640., 25.),
            Bounds::new(695., 80., 25., 440.),
        ],
        curves: &[
            curve(250., 200., 90.),
            curve(550., 180., 75.),
            curve(200., 380., 65.),
            curve(600., 400., 85.),
        ],
        start_line: Some(Bounds::new(380., 520., 40., 60.)),
    },
    Track {
        name: "Arena Neon",
        difficulty: Difficulty::Hard,
        description: "Futuristic arena with tight corners",
        theme: Theme::Neon,
        surface_color: Rgb::hex(0x0a0a1a),
        boundary_color: Rgb::hex(0xff00ff),
        accent_color: Rgb::hex(0x00ffff),
        start: Some(StartPosition {
            position: Vec2::new(400.0, 100.0),
            heading: FRAC_PI_2,
        }),
        boundaries: [
            Bounds::new(100., 60., 600., 18.),
            Bounds::new(100., 60., 18., 480.),
            Bounds::new(100., 522., 600., 18.),
            Bounds::new(682., 60., 18., 480.),
        ],
        curves: &[
            curve(200., 160., 50.),
            curve(600., 160., 50.),
            curve(300., 300., 40.),
            curve(500., 300., 40.),
            curve(200., 440., 55.),
            curve(600., 440., 55.),
        ],
        start_line: Some(Bounds::new(380., 80., 40., 40.)),
    },
    Track {
        name: "Circuito Extreme",
        difficulty: Difficulty::Hard,
        description: "For drift masters: extreme corners at high speed",
        theme: Theme::Industrial,
        surface_color: Rgb::hex(0x2a2a2a),
        boundary_color: Rgb::hex(0xffaa00),
        accent_color: Rgb::hex(0xff6600),
        start: Some(StartPosition {
            position: Vec2::new(200.0, 500.0),
            heading: -FRAC_PI_4,
        }),
        boundaries: [
            Bounds::new(60., 40., 680., 22.),
            Bounds::new(60., 40., 22., 520.),
            Bounds::new(60., 538., 680., 22.),
            Bounds::new(718., 40., 22., 520.),
        ],
        curves: &[
            curve(180., 140., 45.),
            curve(400., 120., 30.),
            curve(620., 140., 45.),
            curve(650., 300., 60.),
            curve(500., 450., 50.),
            curve(300., 480., 40.),
            curve(150., 350., 70.),
            curve(350., 280., 35.),
        ],
        start_line: Some(Bounds::new(180., 480., 40., 40.)),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_enclose_a_rectangle() {
        for track in TRACKS.iter() {
            let surface = track.surface();
            assert!(surface.width > 2.0 * CAR_HALF_WIDTH, "{}", track.name);
            assert!(surface.height > 2.0 * CAR_HALF_WIDTH, "{}", track.name);
            assert_eq!(track.top().x, track.left().x, "{}", track.name);
            assert_eq!(track.bottom().bottom(), track.right().bottom(), "{}", track.name);
        }
    }

    #[test]
    fn alpha_drivable_area() {
        let area = TRACKS[0].drivable_area();
        assert_eq!(area.min, Vec2::new(85.0, 85.0));
        assert_eq!(area.max, Vec2::new(715.0, 515.0));
    }

    #[test]
    fn sunset_start_lies_outside_drivable_area() {
        // The car spawns past the bottom wall and is pulled back in on the first frame.
        let track = &TRACKS[2];
        let start = track.start.expect("sunset track has a start position");
        assert!(!track.drivable_area().contains(start.position));
    }
}
