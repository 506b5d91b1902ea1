//! Shapefile reading for the segment geometry source.

use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point};
use shapefile::{Reader, Shape, dbase::{FieldValue, Record}};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::{common::fs::extract_zip, io::RawFeature, network::SegmentId};

/// Features and the `.prj` WKT (if any) read from a shapefile.
pub(crate) struct ShapefileContents {
    pub(crate) features: Vec<RawFeature>,
    pub(crate) prj: Option<String>,
}

/// Reads all shapes and their identifier attribute from a `.shp` file path.
pub(crate) fn read_shapefile(path: &Path, id_field: &str) -> Result<ShapefileContents> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result
            .with_context(|| format!("[io::shp] Error reading shape+record in {}", path.display()))?;
        features.push(RawFeature {
            id: record_id(&record, id_field),
            geometry: shape_to_geometry(shape),
        });
    }

    let prj_path = path.with_extension("prj");
    let prj = if prj_path.exists() {
        Some(fs::read_to_string(&prj_path)
            .with_context(|| format!("[io::shp] Failed to read {}", prj_path.display()))?)
    } else {
        None
    };

    Ok(ShapefileContents { features, prj })
}

/// Extracts a zipped shapefile into a temporary directory and reads the first `.shp` inside.
pub(crate) fn read_zipped_shapefile(zip_path: &Path, id_field: &str) -> Result<ShapefileContents> {
    let dir = TempDir::new().context("[io::shp] Failed to create temporary directory")?;
    extract_zip(zip_path, dir.path())?;

    let shp = find_shp(dir.path())?
        .with_context(|| format!("[io::shp] No .shp file inside {}", zip_path.display()))?;
    read_shapefile(&shp, id_field)
}

fn find_shp(root: &Path) -> Result<Option<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let is_shp = entry.path().extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));
        // macOS archives carry "._name.shp" resource forks
        let is_resource_fork = entry.file_name().to_string_lossy().starts_with("._");
        if entry.file_type().is_file() && is_shp && !is_resource_fork {
            found.push(entry.into_path());
        }
    }
    found.sort();
    if found.len() > 1 {
        tracing::warn!(count = found.len(), "[io::shp] several shapefiles in archive, using {}", found[0].display());
    }
    Ok(found.into_iter().next())
}

/// Read the identifier attribute as an integer. Any numeric dBase type, or a
/// character field holding an integer, is accepted.
pub(crate) fn record_id(record: &Record, field: &str) -> Option<SegmentId> {
    fn from_float(value: f64) -> Option<SegmentId> {
        (value.is_finite() && value.fract() == 0.0).then_some(value as SegmentId)
    }

    match record.get(field)? {
        FieldValue::Integer(n) => Some(*n as SegmentId),
        FieldValue::Numeric(Some(n)) => from_float(*n),
        FieldValue::Double(n) => from_float(*n),
        FieldValue::Float(Some(n)) => from_float(*n as f64),
        FieldValue::Character(Some(s)) => {
            let s = s.trim();
            s.parse::<SegmentId>().ok().or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    }
}

/// Convert a shapefile shape into a `geo` geometry.
/// Single-part polylines become `LineString`s and points stay points. Polygons
/// and the remaining kinds become an empty collection, since they are never drawn.
pub(crate) fn shape_to_geometry(shape: Shape) -> Geometry<f64> {
    fn line(points: impl Iterator<Item = (f64, f64)>) -> LineString<f64> {
        LineString(points.map(|(x, y)| Coord { x, y }).collect())
    }

    fn lines(parts: Vec<LineString<f64>>) -> Geometry<f64> {
        match <[LineString<f64>; 1]>::try_from(parts) {
            Ok([single]) => Geometry::LineString(single),
            Err(parts) => Geometry::MultiLineString(MultiLineString(parts)),
        }
    }

    match shape {
        Shape::Polyline(polyline) => lines(polyline.parts().iter()
            .map(|part| line(part.iter().map(|p| (p.x, p.y))))
            .collect()),
        Shape::PolylineM(polyline) => lines(polyline.parts().iter()
            .map(|part| line(part.iter().map(|p| (p.x, p.y))))
            .collect()),
        Shape::PolylineZ(polyline) => lines(polyline.parts().iter()
            .map(|part| line(part.iter().map(|p| (p.x, p.y))))
            .collect()),
        Shape::Point(p) => Geometry::Point(Point::new(p.x, p.y)),
        Shape::PointM(p) => Geometry::Point(Point::new(p.x, p.y)),
        Shape::PointZ(p) => Geometry::Point(Point::new(p.x, p.y)),
        Shape::Multipoint(points) => Geometry::MultiPoint(MultiPoint(
            points.points().iter().map(|p| Point::new(p.x, p.y)).collect()
        )),
        _ => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use shapefile::{Point as ShpPoint, Polygon, PolygonRing, Polyline};

    use super::*;

    fn record(field: &str, value: FieldValue) -> Record {
        let mut record = Record::default();
        record.insert(field.to_string(), value);
        record
    }

    #[test]
    fn ids_from_any_numeric_field() {
        assert_eq!(record_id(&record("P_ID", FieldValue::Numeric(Some(12.0))), "P_ID"), Some(12));
        assert_eq!(record_id(&record("P_ID", FieldValue::Integer(5)), "P_ID"), Some(5));
        assert_eq!(record_id(&record("P_ID", FieldValue::Double(7.0)), "P_ID"), Some(7));
        assert_eq!(record_id(&record("P_ID", FieldValue::Character(Some(" 42 ".into()))), "P_ID"), Some(42));
    }

    #[test]
    fn bad_ids_are_none() {
        assert_eq!(record_id(&record("P_ID", FieldValue::Numeric(Some(1.5))), "P_ID"), None);
        assert_eq!(record_id(&record("P_ID", FieldValue::Numeric(None)), "P_ID"), None);
        assert_eq!(record_id(&record("OTHER", FieldValue::Integer(1)), "P_ID"), None);
    }

    #[test]
    fn single_part_polyline_is_linestring() {
        let polyline = Polyline::new(vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(1.0, 1.0)]);
        match shape_to_geometry(Shape::Polyline(polyline)) {
            Geometry::LineString(line) => assert_eq!(line.0.len(), 2),
            other => panic!("expected LineString, got {other:?}"),
        }
    }

    #[test]
    fn multi_part_polyline_is_multilinestring() {
        let polyline = Polyline::with_parts(vec![
            vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(1.0, 1.0)],
            vec![ShpPoint::new(2.0, 2.0), ShpPoint::new(3.0, 3.0)],
        ]);
        assert!(matches!(shape_to_geometry(Shape::Polyline(polyline)), Geometry::MultiLineString(_)));
    }

    #[test]
    fn polygons_become_empty_collections() {
        let ring = PolygonRing::Outer(vec![
            ShpPoint::new(0.0, 0.0), ShpPoint::new(0.0, 1.0), ShpPoint::new(1.0, 1.0), ShpPoint::new(0.0, 0.0),
        ]);
        let geometry = shape_to_geometry(Shape::Polygon(Polygon::new(ring)));
        assert_eq!(geometry, Geometry::GeometryCollection(GeometryCollection(Vec::new())));
    }

    #[test]
    fn points_are_not_lines() {
        let geometry = shape_to_geometry(Shape::Point(ShpPoint::new(1.0, 2.0)));
        assert!(matches!(geometry, Geometry::Point(_)));
    }
}
