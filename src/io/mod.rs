//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `csv` - CSV score table
//! - `shp` - Shapefile (plain or zipped) segment geometry
//! - `geojson` - GeoJSON segment geometry
//! - `svg` - SVG map export

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod shp;
pub(crate) mod svg;

use geo::Geometry;

use crate::network::SegmentId;

/// A geometry feature before reprojection and join.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawFeature {
    /// `None` when the identifier attribute is missing or not an integer.
    pub(crate) id: Option<SegmentId>,
    pub(crate) geometry: Geometry<f64>,
}
