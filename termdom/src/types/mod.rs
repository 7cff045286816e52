//! Plain value types shared by styles, layout and the cell buffer.

use palette::{IntoColor, Oklch, Srgb};

/// A resolved terminal colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    pub const fn from_hex(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// A colour as written in a stylesheet. Resolved to [`Rgb`] at cascade time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Srgb(Rgb),
    /// Perceptual lightness, chroma and hue in degrees.
    Oklch { l: f32, c: f32, h: f32 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Srgb(Rgb::new(r, g, b))
    }

    pub const fn hex(value: u32) -> Self {
        Self::Srgb(Rgb::from_hex(value))
    }

    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Self::Srgb(rgb) => rgb,
            Self::Oklch { l, c, h } => {
                let srgb: Srgb = Oklch::new(l, c, h).into_color();
                let (r, g, b) = srgb.into_format::<u8>().into_components();
                Rgb::new(r, g, b)
            }
        }
    }
}

/// Padding on the four sides of a box, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: u16) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn horizontal(value: u16) -> Self {
        Self::new(0, value, 0, value)
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Cells taken from a box's width.
    pub const fn x_total(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Rows taken from a box's height.
    pub const fn y_total(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// Main axis of a box's flow children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    /// Out of flow, offset from the parent's origin.
    Absolute,
}

/// `None` removes the element and its subtree from layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// Hidden elements keep their box but are neither painted nor hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Character attributes of a painted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        dim: false,
        underline: false,
    };
}
