//! Element styles and per-scope stylesheets.

mod sheet;

pub use sheet::{StyleRule, StyleSheet};

use crate::types::{Color, Direction, Display, Edges, Position, Rgb, TextStyle, Visibility};

/// A set of declared style properties. Unset properties fall through to
/// earlier rules, the parent (for inherited properties) or defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub underline: Option<bool>,
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,
    pub direction: Option<Direction>,
    pub gap: Option<u16>,
    pub padding: Option<Edges>,
    pub position: Option<Position>,
    pub top: Option<i16>,
    pub left: Option<i16>,
    pub z_index: Option<i16>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Take the element out of flow at the given offset from its parent box.
    pub fn absolute(mut self, top: i16, left: i16) -> Self {
        self.position = Some(Position::Absolute);
        self.top = Some(top);
        self.left = Some(left);
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Overlay every property `other` declares on top of `self`.
    pub fn merge(&mut self, other: &Style) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            foreground, background, bold, dim, underline, display, visibility, direction, gap,
            padding, position, top, left, z_index
        );
    }
}

/// Fully resolved style of one node, after cascade and inheritance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub foreground: Rgb,
    pub background: Option<Rgb>,
    pub text_style: TextStyle,
    pub display: Display,
    pub visibility: Visibility,
    pub direction: Direction,
    pub gap: u16,
    pub padding: Edges,
    pub position: Position,
    pub top: i16,
    pub left: i16,
    pub z_index: i16,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            foreground: Rgb::new(255, 255, 255),
            background: None,
            text_style: TextStyle::PLAIN,
            display: Display::Flex,
            visibility: Visibility::Visible,
            direction: Direction::Column,
            gap: 0,
            padding: Edges::default(),
            position: Position::Static,
            top: 0,
            left: 0,
            z_index: 0,
        }
    }
}

impl ComputedStyle {
    /// Resolve `declared` against the parent's computed style.
    ///
    /// Foreground, text attributes and visibility inherit; everything else
    /// starts from its default.
    pub fn resolve(parent: &ComputedStyle, declared: &Style) -> Self {
        let mut text_style = parent.text_style;
        if let Some(bold) = declared.bold {
            text_style.bold = bold;
        }
        if let Some(dim) = declared.dim {
            text_style.dim = dim;
        }
        if let Some(underline) = declared.underline {
            text_style.underline = underline;
        }

        let position = declared.position.unwrap_or_default();
        Self {
            foreground: declared
                .foreground
                .map(|c| c.to_rgb())
                .unwrap_or(parent.foreground),
            background: declared.background.map(|c| c.to_rgb()),
            text_style,
            display: declared.display.unwrap_or_default(),
            visibility: declared.visibility.unwrap_or(parent.visibility),
            direction: declared.direction.unwrap_or_default(),
            gap: declared.gap.unwrap_or(0),
            padding: declared.padding.unwrap_or_default(),
            position,
            top: declared.top.unwrap_or(0),
            left: declared.left.unwrap_or(0),
            // Absolute boxes paint above flow content unless told otherwise.
            z_index: declared
                .z_index
                .unwrap_or(if position == Position::Absolute { 1 } else { parent.z_index }),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}
