/// Integer pixel-space coordinate.
///
/// Points are not normalized and may lie outside the canvas; the renderer clips.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Horizontal coordinate, left to right.
    pub x: i32,
    /// Vertical coordinate, top to bottom.
    pub y: i32,
}

impl Point {
    /// Build a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 0 = fully transparent, 255 = opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Opaque RGB8 color, the meaningful content of one canvas pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Black, the initial content of every canvas.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Build a color from its three components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pixel formats a canvas can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Three color bytes plus one unused padding byte per pixel (`r, g, b, x`).
    #[default]
    Rgb24,
}

impl PixelFormat {
    /// Bytes occupied by one pixel in a row.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb24 => 4,
        }
    }

    /// Leading bytes per pixel that carry color and take part in comparisons.
    pub const fn color_channels(self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
        }
    }
}
