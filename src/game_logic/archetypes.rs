use crate::game_logic::REVERSE_SPEED_RATIO;

/// Axis-aligned rectangle in car-local space: +x points toward the nose,
/// the origin is the car's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CarRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Accent-colored detail drawn over the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trim {
    /// Spoilers, splitters, vents, side skirts.
    Bar(CarRect),
    /// Half-circle roll hoop, stroked over the cabin.
    RollBar { cx: f32, cy: f32, radius: f32 },
}

/// A single headlight lamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lamp {
    Rect(CarRect),
    Dot { x: f32, y: f32, radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadlightStyle {
    Standard,
    PopUp,
    Round,
    Rectangular,
}

const STANDARD_LAMPS: [Lamp; 2] = [
    Lamp::Rect(CarRect::new(18., -3., 4., 2.)),
    Lamp::Rect(CarRect::new(18., 1., 4., 2.)),
];
const POPUP_LAMPS: [Lamp; 2] = [
    Lamp::Rect(CarRect::new(20., -4., 2., 2.)),
    Lamp::Rect(CarRect::new(20., 2., 2., 2.)),
];
const ROUND_LAMPS: [Lamp; 2] = [
    Lamp::Dot { x: 22., y: -6., radius: 2. },
    Lamp::Dot { x: 22., y: 6., radius: 2. },
];
const RECTANGULAR_LAMPS: [Lamp; 2] = [
    Lamp::Rect(CarRect::new(16., -5., 2., 3.)),
    Lamp::Rect(CarRect::new(16., 2., 2., 3.)),
];

impl HeadlightStyle {
    pub fn lamps(self) -> &'static [Lamp] {
        match self {
            HeadlightStyle::Standard => &STANDARD_LAMPS,
            HeadlightStyle::PopUp => &POPUP_LAMPS,
            HeadlightStyle::Round => &ROUND_LAMPS,
            HeadlightStyle::Rectangular => &RECTANGULAR_LAMPS,
        }
    }
}

/// Everything the renderer needs to draw one silhouette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub tag: &'static str,
    pub shadow: CarRect,
    pub body: CarRect,
    pub trim: &'static [Trim],
    pub cabin: CarRect,
    pub windshield: CarRect,
    pub headlights: HeadlightStyle,
    pub wheel_size: f32,
}

const SHADOW: CarRect = CarRect::new(-20., -10., 40., 20.);
const CABIN: CarRect = CarRect::new(-16., -8., 32., 16.);
const WINDSHIELD: CarRect = CarRect::new(-12., -6., 24., 12.);
const WHEEL: f32 = 7.0;

/// Star ratings shown in the garage, 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ratings {
    pub speed: u8,
    pub acceleration: u8,
    pub handling: u8,
    pub drift: u8,
}

/// Performance tuning plus the silhouette of one car model.
#[derive(Clone, Debug, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Speed multiplier applied every frame.
    pub friction: f32,
    /// Turn-rate multiplier, scaled by speed.
    pub handling: f32,
    pub drift_multiplier: f32,
    pub ratings: Ratings,
    pub shape: ShapeDescriptor,
}

impl Archetype {
    /// Lowest (most negative) speed reachable in reverse.
    pub fn reverse_limit(&self) -> f32 {
        -self.max_speed * REVERSE_SPEED_RATIO
    }
}

const fn ratings(speed: u8, acceleration: u8, handling: u8, drift: u8) -> Ratings {
    Ratings { speed, acceleration, handling, drift }
}

pub static ARCHETYPES: [Archetype; 12] = [
    Archetype {
        name: "Mazda RX-7 FD",
        description: "Rotary drift legend",
        category: "JDM Legend",
        max_speed: 9.5,
        acceleration: 0.32,
        friction: 0.94,
        handling: 0.055,
        drift_multiplier: 18.0,
        ratings: ratings(4, 4, 5, 5),
        shape: ShapeDescriptor {
            tag: "rx7",
            shadow: CarRect::new(-22., -11., 44., 22.),
            body: CarRect::new(-22., -10., 44., 20.),
            trim: &[
                Trim::Bar(CarRect::new(18., -8., 4., 16.)),
                Trim::Bar(CarRect::new(-18., -12., 36., 2.)),
                Trim::Bar(CarRect::new(-18., 10., 36., 2.)),
            ],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::PopUp,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Nissan Skyline R34 GT-R",
        description: "Godzilla of the tarmac",
        category: "JDM Legend",
        max_speed: 10.0,
        acceleration: 0.38,
        friction: 0.96,
        handling: 0.048,
        drift_multiplier: 15.0,
        ratings: ratings(5, 5, 4, 4),
        shape: ShapeDescriptor {
            tag: "r34",
            shadow: CarRect::new(-24., -12., 48., 24.),
            body: CarRect::new(-24., -12., 48., 24.),
            trim: &[
                Trim::Bar(CarRect::new(-16., -8., 20., 2.)),
                Trim::Bar(CarRect::new(-16., -4., 20., 2.)),
                Trim::Bar(CarRect::new(-22., -8., 2., 16.)),
            ],
            cabin: CarRect::new(-20., -10., 40., 20.),
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Round,
            wheel_size: 8.0,
        },
    },
    Archetype {
        name: "Toyota Supra MK4",
        description: "2JZ straight-six",
        category: "JDM Legend",
        max_speed: 10.5,
        acceleration: 0.35,
        friction: 0.95,
        handling: 0.045,
        drift_multiplier: 16.0,
        ratings: ratings(5, 4, 4, 4),
        shape: ShapeDescriptor {
            tag: "supra",
            shadow: CarRect::new(-22., -11., 44., 22.),
            body: CarRect::new(-22., -11., 44., 22.),
            trim: &[
                Trim::Bar(CarRect::new(-24., -6., 4., 12.)),
                Trim::Bar(CarRect::new(16., -4., 6., 8.)),
            ],
            cabin: CarRect::new(-18., -9., 36., 18.),
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Mitsubishi Lancer Evo IX",
        description: "Rally beast for the streets",
        category: "JDM Rally",
        max_speed: 8.5,
        acceleration: 0.4,
        friction: 0.97,
        handling: 0.06,
        drift_multiplier: 14.0,
        ratings: ratings(3, 5, 5, 4),
        shape: ShapeDescriptor {
            tag: "evo",
            shadow: CarRect::new(-20., -12., 40., 24.),
            body: CarRect::new(-20., -11., 40., 22.),
            trim: &[
                Trim::Bar(CarRect::new(-22., -4., 2., 8.)),
                Trim::Bar(CarRect::new(-24., -3., 4., 6.)),
                Trim::Bar(CarRect::new(18., -8., 4., 16.)),
            ],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Subaru Impreza WRX STI",
        description: "Boxer turbo sensation",
        category: "JDM Rally",
        max_speed: 8.8,
        acceleration: 0.38,
        friction: 0.96,
        handling: 0.058,
        drift_multiplier: 13.0,
        ratings: ratings(4, 5, 5, 3),
        shape: ShapeDescriptor {
            tag: "sti",
            shadow: CarRect::new(-20., -12., 40., 24.),
            body: CarRect::new(-20., -11., 40., 22.),
            trim: &[
                Trim::Bar(CarRect::new(-8., -10., 8., 4.)),
                Trim::Bar(CarRect::new(-22., -3., 2., 6.)),
            ],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Honda NSX",
        description: "Pure Japanese precision",
        category: "JDM Supercar",
        max_speed: 9.8,
        acceleration: 0.33,
        friction: 0.97,
        handling: 0.052,
        drift_multiplier: 12.0,
        ratings: ratings(5, 4, 5, 3),
        shape: ShapeDescriptor {
            tag: "nsx",
            shadow: SHADOW,
            body: CarRect::new(-21., -9., 42., 18.),
            trim: &[
                Trim::Bar(CarRect::new(-8., -11., 6., 2.)),
                Trim::Bar(CarRect::new(-8., 9., 6., 2.)),
            ],
            cabin: CABIN,
            // mid-engine, short glasshouse
            windshield: CarRect::new(-10., -6., 20., 12.),
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Mitsubishi Eclipse GSX",
        description: "Turbocharged 4G63",
        category: "JDM Sport",
        max_speed: 8.2,
        acceleration: 0.34,
        friction: 0.94,
        handling: 0.05,
        drift_multiplier: 16.0,
        ratings: ratings(3, 4, 4, 4),
        shape: ShapeDescriptor {
            tag: "eclipse",
            shadow: SHADOW,
            body: CarRect::new(-20., -10., 40., 20.),
            trim: &[Trim::Bar(CarRect::new(-22., -4., 2., 8.))],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Nissan 240SX (S13)",
        description: "Classic drift machine",
        category: "JDM Drift",
        max_speed: 7.8,
        acceleration: 0.3,
        friction: 0.92,
        handling: 0.055,
        drift_multiplier: 20.0,
        ratings: ratings(2, 3, 4, 5),
        shape: ShapeDescriptor {
            tag: "s13",
            shadow: SHADOW,
            body: CarRect::new(-19., -9., 38., 18.),
            trim: &[Trim::Bar(CarRect::new(17., -6., 2., 12.))],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Toyota AE86 Corolla",
        description: "Hachiroku drift king",
        category: "JDM Classic",
        max_speed: 7.2,
        acceleration: 0.28,
        friction: 0.91,
        handling: 0.06,
        drift_multiplier: 22.0,
        ratings: ratings(2, 2, 5, 5),
        shape: ShapeDescriptor {
            tag: "ae86",
            shadow: SHADOW,
            body: CarRect::new(-18., -9., 36., 18.),
            trim: &[Trim::Bar(CarRect::new(-20., -3., 2., 6.))],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Rectangular,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Honda Civic Type R",
        description: "VTEC kicked in",
        category: "JDM Hot Hatch",
        max_speed: 8.0,
        acceleration: 0.36,
        friction: 0.95,
        handling: 0.055,
        drift_multiplier: 11.0,
        ratings: ratings(3, 4, 5, 3),
        shape: ShapeDescriptor {
            tag: "civic",
            shadow: SHADOW,
            body: CarRect::new(-19., -10., 38., 20.),
            trim: &[
                Trim::Bar(CarRect::new(-22., -4., 3., 8.)),
                Trim::Bar(CarRect::new(17., -8., 2., 16.)),
            ],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Mazda MX-5 Miata",
        description: "Lightweight roadster",
        category: "JDM Roadster",
        max_speed: 7.5,
        acceleration: 0.32,
        friction: 0.93,
        handling: 0.065,
        drift_multiplier: 17.0,
        ratings: ratings(2, 3, 5, 4),
        shape: ShapeDescriptor {
            tag: "miata",
            shadow: SHADOW,
            body: CarRect::new(-17., -8., 34., 16.),
            trim: &[Trim::RollBar { cx: 0., cy: -6., radius: 8. }],
            cabin: CABIN,
            windshield: CarRect::new(-8., -5., 16., 10.),
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
    Archetype {
        name: "Nissan 350Z",
        description: "VQ35 power",
        category: "JDM Modern",
        max_speed: 9.0,
        acceleration: 0.35,
        friction: 0.94,
        handling: 0.05,
        drift_multiplier: 15.0,
        ratings: ratings(4, 4, 4, 4),
        shape: ShapeDescriptor {
            tag: "350z",
            shadow: SHADOW,
            body: CarRect::new(-21., -10., 42., 20.),
            trim: &[Trim::Bar(CarRect::new(16., -8., 5., 16.))],
            cabin: CABIN,
            windshield: WINDSHIELD,
            headlights: HeadlightStyle::Standard,
            wheel_size: WHEEL,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_archetype_has_a_distinct_silhouette() {
        for (i, a) in ARCHETYPES.iter().enumerate() {
            for b in ARCHETYPES.iter().skip(i + 1) {
                assert_ne!(a.shape.tag, b.shape.tag);
            }
        }
    }

    #[test]
    fn tuning_stays_in_arcade_ranges() {
        for archetype in ARCHETYPES.iter() {
            assert!(archetype.friction > 0.9 && archetype.friction < 1.0, "{}", archetype.name);
            assert!(archetype.max_speed > DRIFT_FLOOR, "{} can never drift", archetype.name);
            let r = archetype.ratings;
            assert!(r.speed <= 5 && r.acceleration <= 5 && r.handling <= 5 && r.drift <= 5);
        }
    }

    const DRIFT_FLOOR: f32 = crate::game_logic::DRIFT_MIN_SPEED;

    #[test]
    fn reverse_is_half_of_top_speed() {
        let ae86 = &ARCHETYPES[8];
        assert_eq!(ae86.reverse_limit(), -3.6);
    }
}
