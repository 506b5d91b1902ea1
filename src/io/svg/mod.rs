//! SVG writing for static map export.

mod color;
mod writer;

pub(crate) use color::*;
pub(crate) use writer::*;
