use std::{collections::HashMap, sync::LazyLock};

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, Geometry, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};
use regex::Regex;

const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";
const WGS84_A: f64 = 6378137.0;
const WGS84_RF: f64 = 298.257223563;

static SPHEROID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)SPHEROID\s*\[\s*"[^"]*"\s*,\s*([-+\d.eE]+)\s*,\s*([-+\d.eE]+)"#).expect("valid regex")
});
static TOWGS84: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)TOWGS84\s*\[([^\]]*)\]").expect("valid regex")
});
static PROJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)PROJECTION\s*\[\s*"([^"]+)""#).expect("valid regex")
});
static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)PARAMETER\s*\[\s*"([^"]+)"\s*,\s*([-+\d.eE]+)"#).expect("valid regex")
});
static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)UNIT\s*\[\s*"[^"]*"\s*,\s*([-+\d.eE]+)"#).expect("valid regex")
});

/// Coordinate reference system of the geometry source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCrs {
    /// Already WGS84 lon/lat; no transform needed.
    Wgs84,
    /// Any other CRS, as a PROJ.4 string.
    Proj4(String),
}

impl SourceCrs {
    /// Interpret the WKT of a shapefile `.prj`.
    ///
    /// Geographic systems and Transverse Mercator (including every UTM zone) are
    /// understood, as is Web Mercator. Anything else needs an explicit PROJ.4 override.
    pub fn from_prj_wkt(wkt: &str) -> Result<Self> {
        let wkt = wkt.trim();
        let (a, rf) = spheroid(wkt)?;
        let towgs84 = TOWGS84.captures(wkt)
            .map(|caps| format!(" +towgs84={}", caps[1].split(',').map(str::trim).collect::<Vec<_>>().join(",")))
            .unwrap_or_default();
        let ellps = if rf == 0.0 { format!("+a={a} +b={a}") } else { format!("+a={a} +rf={rf}") };

        let projected = wkt.get(..6).is_some_and(|head| head.eq_ignore_ascii_case("PROJCS"));
        if !projected {
            if is_wgs84(a, rf) && towgs84.is_empty() { return Ok(SourceCrs::Wgs84) }
            return Ok(SourceCrs::Proj4(format!("+proj=longlat {ellps}{towgs84} +no_defs +type=crs")));
        }

        let projection = PROJECTION.captures(wkt)
            .map(|caps| caps[1].to_ascii_lowercase())
            .ok_or_else(|| anyhow!("[geom::proj] projected WKT has no PROJECTION"))?;

        let params: HashMap<String, f64> = PARAMETER.captures_iter(wkt)
            .filter_map(|caps| Some((caps[1].to_ascii_lowercase(), caps[2].parse().ok()?)))
            .collect();
        let param = |name: &str, default: f64| params.get(name).copied().unwrap_or(default);

        // The projected unit is the last UNIT; earlier ones belong to the GEOGCS.
        let to_meter = UNIT.captures_iter(wkt)
            .last()
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .unwrap_or(1.0);
        let units = if (to_meter - 1.0).abs() < 1e-12 { " +units=m".to_string() } else { format!(" +to_meter={to_meter}") };

        match projection.as_str() {
            "transverse_mercator" => Ok(SourceCrs::Proj4(format!(
                "+proj=tmerc +lat_0={} +lon_0={} +k={} +x_0={} +y_0={} {ellps}{towgs84}{units} +no_defs +type=crs",
                param("latitude_of_origin", 0.0),
                param("central_meridian", 0.0),
                param("scale_factor", 1.0),
                param("false_easting", 0.0),
                param("false_northing", 0.0),
            ))),
            "mercator_auxiliary_sphere" | "popular_visualisation_pseudo_mercator" => Ok(SourceCrs::Proj4(
                "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs".into()
            )),
            other => bail!("[geom::proj] unsupported projection {other:?}; pass an explicit PROJ.4 string"),
        }
    }

    fn is_geographic(&self) -> bool {
        match self {
            SourceCrs::Wgs84 => true,
            SourceCrs::Proj4(s) => s.contains("+proj=longlat") || s.contains("+proj=latlong"),
        }
    }
}

fn spheroid(wkt: &str) -> Result<(f64, f64)> {
    let Some(caps) = SPHEROID.captures(wkt) else { return Ok((WGS84_A, WGS84_RF)) };
    let a = caps[1].parse::<f64>().with_context(|| format!("[geom::proj] bad semi-major axis {:?}", &caps[1]))?;
    let rf = caps[2].parse::<f64>().with_context(|| format!("[geom::proj] bad inverse flattening {:?}", &caps[2]))?;
    Ok((a, rf))
}

fn is_wgs84(a: f64, rf: f64) -> bool {
    (a - WGS84_A).abs() < 1e-3 && (rf - WGS84_RF).abs() < 1e-6
}

/// Transforms geometries from a source CRS into WGS84 lon/lat degrees.
pub struct Reprojector {
    from: Option<Proj4>,
    to: Proj4,
    source_geographic: bool,
}

impl Reprojector {
    pub fn new(source: &SourceCrs) -> Result<Self> {
        let to = Proj4::from_proj_string(WGS84_PROJ4)
            .with_context(|| anyhow!("failed to build target PROJ.4: {WGS84_PROJ4}"))?;

        let from = match source {
            SourceCrs::Wgs84 => None,
            SourceCrs::Proj4(proj_string) => Some(
                Proj4::from_proj_string(proj_string)
                    .with_context(|| anyhow!("failed to build source PROJ.4: {proj_string}"))?
            ),
        };

        Ok(Self { from, to, source_geographic: source.is_geographic() })
    }

    pub fn is_identity(&self) -> bool { self.from.is_none() }

    /// Reproject every coordinate of `geometry` to lon/lat degrees.
    pub fn to_wgs84(&self, geometry: Geometry<f64>) -> Result<Geometry<f64>> {
        let Some(from) = &self.from else { return Ok(geometry) };
        let to = &self.to;
        let source_geographic = self.source_geographic;

        geometry.try_map_coords(|coord: Coord<f64>| {
            // Geographic input is radians in, projected input is native units in.
            let mut point = if source_geographic {
                (coord.x.to_radians(), coord.y.to_radians(), 0.0)
            } else {
                (coord.x, coord.y, 0.0)
            };
            transform(from, to, &mut point)
                .map_err(|e| anyhow!("[geom::proj] CRS transform failed at ({}, {}): {e}", coord.x, coord.y))?;
            Ok(Coord { x: point.0.to_degrees(), y: point.1.to_degrees() })
        })
    }
}
