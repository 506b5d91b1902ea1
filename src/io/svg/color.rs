//! Stroke colors for SVG export.

use std::fmt;

use crate::network::WalkCategory;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// CSS named colors used by the category palette.
/// Unknown names fall back to neutral gray.
pub(crate) fn named_color(name: &str) -> Rgb {
    match name {
        "green" => Rgb { r: 0, g: 128, b: 0 },
        "blue" => Rgb { r: 0, g: 0, b: 255 },
        "yellow" => Rgb { r: 255, g: 255, b: 0 },
        "orange" => Rgb { r: 255, g: 165, b: 0 },
        "red" => Rgb { r: 255, g: 0, b: 0 },
        _ => Rgb { r: 150, g: 150, b: 150 },
    }
}

pub(crate) fn category_color(category: WalkCategory) -> Rgb {
    named_color(category.color())
}

/// CSS class for a category's strokes, e.g. `cat-very-poor`.
pub(crate) fn category_class(category: WalkCategory) -> String {
    format!("cat-{}", category.label().to_ascii_lowercase().replace(' ', "-"))
}
