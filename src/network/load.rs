use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::{
    common::fs::require_file_exists,
    config::DashboardConfig,
    geom::{Reprojector, SourceCrs},
    io::{self, RawFeature},
    network::{SegmentGeometry, SegmentNetwork},
};

/// Geometry file formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    Shapefile,
    ZippedShapefile,
    GeoJson,
}

impl GeometryFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "shp" => Ok(GeometryFormat::Shapefile),
            "zip" => Ok(GeometryFormat::ZippedShapefile),
            "geojson" | "json" => Ok(GeometryFormat::GeoJson),
            _ => bail!("[network::load] unsupported geometry file {:?}; expected .shp, .zip or .geojson", path),
        }
    }
}

/// Load both sources and join them.
pub fn load_network(geometry_path: &Path, scores_path: &Path, config: &DashboardConfig) -> Result<SegmentNetwork> {
    require_file_exists(geometry_path)?;
    require_file_exists(scores_path)?;

    info!(geometry = %geometry_path.display(), scores = %scores_path.display(), "[network::load] loading segment network");

    let (geometries, rejected_features) = load_geometries(geometry_path, config)?;

    let df = io::csv::read_csv(scores_path)?;
    let scores = io::csv::read_score_rows(&df, &config.columns)
        .with_context(|| format!("[network::load] Failed to read scores from {}", scores_path.display()))?;

    let network = SegmentNetwork::join(geometries, scores.rows, config.strict_join)?
        .with_rejected(scores.rejected, rejected_features);
    network.report().log();

    info!(segments = network.len(), "[network::load] network ready");
    Ok(network)
}

/// Read, reproject and key the geometry source.
/// Returns the usable features and the number dropped for a missing id or unreadable geometry.
pub fn load_geometries(path: &Path, config: &DashboardConfig) -> Result<(Vec<SegmentGeometry>, usize)> {
    let id_field = config.geometry_id_field.as_str();

    let (features, prj, malformed) = match GeometryFormat::detect(path)? {
        GeometryFormat::Shapefile => {
            let contents = io::shp::read_shapefile(path, id_field)?;
            (contents.features, contents.prj, 0)
        }
        GeometryFormat::ZippedShapefile => {
            let contents = io::shp::read_zipped_shapefile(path, id_field)?;
            (contents.features, contents.prj, 0)
        }
        GeometryFormat::GeoJson => {
            let contents = io::geojson::read_geojson(path, id_field)?;
            (contents.features, None, contents.malformed)
        }
    };

    let crs = source_crs(config, prj.as_deref())?;
    debug!(?crs, features = features.len(), malformed, "[network::load] geometry source read");

    let (geometries, without_id) = keyed_geometries(features, &crs)?;
    Ok((geometries, without_id + malformed))
}

fn source_crs(config: &DashboardConfig, prj: Option<&str>) -> Result<SourceCrs> {
    if let Some(proj_string) = &config.source_crs {
        return Ok(SourceCrs::Proj4(proj_string.clone()))
    }
    match prj {
        Some(wkt) => SourceCrs::from_prj_wkt(wkt).context("[network::load] could not interpret .prj"),
        None => Ok(SourceCrs::Wgs84),
    }
}

/// Reproject features to WGS84 and drop those without an identifier.
pub(crate) fn keyed_geometries(features: Vec<RawFeature>, crs: &SourceCrs) -> Result<(Vec<SegmentGeometry>, usize)> {
    let reprojector = Reprojector::new(crs)?;
    if !reprojector.is_identity() {
        debug!(features = features.len(), "[network::load] reprojecting geometry to WGS84");
    }

    let mut geometries = Vec::with_capacity(features.len());
    let mut rejected = 0;
    for feature in features {
        let Some(id) = feature.id else {
            rejected += 1;
            continue;
        };
        geometries.push(SegmentGeometry { id, geometry: reprojector.to_wgs84(feature.geometry)? });
    }

    if rejected > 0 {
        warn!(count = rejected, "[network::load] geometry features without an integer id dropped");
    }

    Ok((geometries, rejected))
}
