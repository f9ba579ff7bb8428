/// An opaque 8-bit color, written the way the catalogs list them (`0xRRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }
}

/// Paint job for the car body. Purely cosmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub glass: Rgb,
    pub lights: Rgb,
    pub rims: Rgb,
}

const fn scheme(
    name: &'static str,
    primary: u32,
    secondary: u32,
    accent: u32,
    glass: u32,
    lights: u32,
    rims: u32,
) -> ColorScheme {
    ColorScheme {
        name,
        primary: Rgb::hex(primary),
        secondary: Rgb::hex(secondary),
        accent: Rgb::hex(accent),
        glass: Rgb::hex(glass),
        lights: Rgb::hex(lights),
        rims: Rgb::hex(rims),
    }
}

pub static COLOR_SCHEMES: [ColorScheme; 15] = [
    scheme("Championship White", 0xf8f8ff, 0xe6e6fa, 0xd3d3d3, 0x87ceeb, 0xffff99, 0x2c3e50),
    scheme("Bayside Blue", 0x4169e1, 0x0000cd, 0x191970, 0x87ceeb, 0xffff99, 0xc0c0c0),
    scheme("Sonic Yellow", 0xffff00, 0xffd700, 0xdaa520, 0x87ceeb, 0xfff700, 0x2c3e50),
    scheme("Rally Red", 0xdc143c, 0xb22222, 0x8b0000, 0x87ceeb, 0xffff99, 0x000000),
    scheme("Midnight Purple", 0x4b0082, 0x663399, 0x301934, 0xdda0dd, 0xda70d6, 0xc0c0c0),
    scheme("Tokyo Orange", 0xff4500, 0xff6347, 0xcd5c5c, 0x87ceeb, 0xffaa00, 0x2c3e50),
    scheme("Initial D Silver", 0xc0c0c0, 0xa9a9a9, 0x696969, 0xb0c4de, 0xf0f8ff, 0x000000),
    scheme("Gunmetal Grey", 0x2f4f4f, 0x708090, 0x36454f, 0x708090, 0xffffff, 0xc0c0c0),
    scheme("Neon Green", 0x39ff14, 0x32cd32, 0x228b22, 0x87ceeb, 0x00ff00, 0x000000),
    scheme("Deep Blue Pearl", 0x003366, 0x4682b4, 0x1e3a8a, 0x87ceeb, 0x87cefa, 0xc0c0c0),
    scheme("Sunset Orange", 0xff8c00, 0xff7f50, 0xff4500, 0x87ceeb, 0xffa500, 0x2c3e50),
    scheme("Matte Black", 0x1c1c1c, 0x2f2f2f, 0x0f0f0f, 0x696969, 0xffffff, 0xff0000),
    scheme("Electric Cyan", 0x00ffff, 0x1e90ff, 0x0080ff, 0x87ceeb, 0x00bfff, 0x000000),
    scheme("Spoon Yellow", 0xfff700, 0xffff00, 0xf0e68c, 0x87ceeb, 0xffff99, 0x0000ff),
    scheme("Mugen White", 0xffffff, 0xf5f5f5, 0xe5e5e5, 0x87ceeb, 0xffff99, 0xff0000),
];
