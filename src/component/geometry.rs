//! Plain geometry and appearance values carried by components.
//!
//! Units are whatever the layout engine measures in; the reference
//! [`CellLayoutEngine`](crate::layout::CellLayoutEngine) uses character cells.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        same_f64(self.width, other.width) && same_f64(self.height, other.height)
    }
}

impl Eq for Size {}

impl Hash for Size {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.width, state);
        hash_f64(self.height, state);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl PartialEq for Insets {
    fn eq(&self, other: &Self) -> bool {
        same_f64(self.top, other.top)
            && same_f64(self.left, other.left)
            && same_f64(self.bottom, other.bottom)
            && same_f64(self.right, other.right)
    }
}

impl Eq for Insets {}

impl Hash for Insets {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.top, state);
        hash_f64(self.left, state);
        hash_f64(self.bottom, state);
        hash_f64(self.right, state);
    }
}

/// RGBA, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::CLEAR
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub size: u16,
    pub weight: FontWeight,
}

impl Font {
    pub const BODY: Font = Font {
        size: 14,
        weight: FontWeight::Regular,
    };
    pub const HEADLINE: Font = Font {
        size: 17,
        weight: FontWeight::Bold,
    };
}

impl Default for Font {
    fn default() -> Self {
        Font::BODY
    }
}

/// Hashes an `f64` by bit pattern, matching the bitwise equality kinds use.
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    value.to_bits().hash(state);
}

pub(crate) fn same_f64(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}
