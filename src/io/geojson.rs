//! GeoJSON reading for the segment geometry source.

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point};
use serde_json::Value;
use tracing::warn;

use crate::{io::RawFeature, network::SegmentId};

/// Features read from a GeoJSON source, plus how many had unreadable geometry.
#[derive(Debug)]
pub(crate) struct GeoJsonContents {
    pub(crate) features: Vec<RawFeature>,
    pub(crate) malformed: usize,
}

/// Read features from a GeoJSON FeatureCollection file.
pub(crate) fn read_geojson(path: &Path, id_field: &str) -> Result<GeoJsonContents> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to read {}", path.display()))?;
    read_geojson_bytes(&bytes, id_field)
        .with_context(|| format!("[io::geojson] Failed to parse {}", path.display()))
}

/// Read features from GeoJSON bytes. Coordinates are taken as WGS84 lon/lat.
///
/// A feature whose geometry cannot be parsed is skipped and counted; only a
/// document that is not a FeatureCollection fails the read.
pub(crate) fn read_geojson_bytes(bytes: &[u8], id_field: &str) -> Result<GeoJsonContents> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[io::geojson] expected a FeatureCollection, found {:?}", value["type"]);
    }

    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no features array"))?;

    let mut contents = GeoJsonContents { features: Vec::with_capacity(features.len()), malformed: 0 };
    for (index, feature) in features.iter().enumerate() {
        match parse_geometry(&feature["geometry"]) {
            Ok(geometry) => contents.features.push(RawFeature {
                id: property_id(&feature["properties"], id_field),
                geometry,
            }),
            Err(e) => {
                warn!(index, error = %e, "[io::geojson] skipping feature with malformed geometry");
                contents.malformed += 1;
            }
        }
    }

    Ok(contents)
}

/// Identifier from a feature's properties: an integer, an integral float or a numeric string.
fn property_id(properties: &Value, id_field: &str) -> Option<SegmentId> {
    match &properties[id_field] {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as SegmentId)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse the geometry kinds the network can hold. Polygons and other kinds
/// become an empty collection, since they are never drawn.
fn parse_geometry(geometry: &Value) -> Result<Geometry<f64>> {
    let coords = &geometry["coordinates"];
    let parsed = match geometry["type"].as_str() {
        Some("LineString") => Geometry::LineString(parse_line(coords)?),
        Some("MultiLineString") => Geometry::MultiLineString(MultiLineString(
            array(coords)?.iter().map(parse_line).collect::<Result<_>>()?
        )),
        Some("Point") => Geometry::Point(Point(parse_coord(coords)?)),
        Some("MultiPoint") => Geometry::MultiPoint(MultiPoint(
            array(coords)?.iter().map(|c| parse_coord(c).map(Point)).collect::<Result<_>>()?
        )),
        _ => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
    };
    Ok(parsed)
}

fn array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("[io::geojson] expected a coordinate array"))
}

fn parse_line(coords: &Value) -> Result<LineString<f64>> {
    Ok(LineString(array(coords)?.iter().map(parse_coord).collect::<Result<_>>()?))
}

fn parse_coord(coord: &Value) -> Result<Coord<f64>> {
    let pair = array(coord)?;
    if pair.len() < 2 {
        bail!("[io::geojson] coordinate needs at least two numbers");
    }
    let x = pair[0].as_f64().ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: x must be a number"))?;
    let y = pair[1].as_f64().ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: y must be a number"))?;
    Ok(Coord { x, y })
}
