//! Figure builders: pure functions from the loaded network, a selection and a
//! viewport to Plotly figure JSON (and a static SVG map).

mod bar;
mod map;
mod plotly;
mod scatter;
mod svg;

pub use bar::bar_figure;
pub use map::map_figure;
pub use plotly::*;
pub use scatter::{scatter_figure, scatter_figures};
pub use svg::{SvgOptions, map_svg, write_map_svg};
