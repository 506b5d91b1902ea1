mod category;
mod load;
mod network;
mod segment;
mod selection;

pub use category::{BAR_PALETTE, WalkCategory};
pub use load::{GeometryFormat, load_geometries, load_network};
pub use network::{CategoryAggregate, JoinReport, SegmentNetwork};
pub use segment::{JoinedSegment, ScoreDimension, SegmentGeometry, SegmentId, SegmentScores};
pub use selection::{ALL_SENTINEL, Selection, SelectionRequest};
