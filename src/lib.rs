#![doc = "Walkability dashboard public API"]
pub mod cli;
pub mod commands;
mod common;
pub mod config;
pub mod dashboard;
pub mod figure;
mod geom;
mod io;
pub mod network;
pub mod viewport;

#[doc(inline)]
pub use config::{DashboardConfig, LatLon, ScoreColumns};

#[doc(inline)]
pub use dashboard::Dashboard;

#[doc(inline)]
pub use geom::{Reprojector, SourceCrs};

#[doc(inline)]
pub use network::{Selection, SegmentNetwork, WalkCategory, load_network};

#[doc(inline)]
pub use viewport::{Viewport, ViewportStore};
