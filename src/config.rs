use serde::{Deserialize, Serialize};

/// Default map center (Port of Spain, Trinidad).
pub const DEFAULT_CENTER: LatLon = LatLon { lat: 10.6394, lon: -61.4002 };
pub const DEFAULT_ZOOM: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Column names of the score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreColumns {
    pub id: String,
    pub category: String,
    pub length: String,
    pub aesthetics: String,
    pub destination: String,
    pub conspicuousness: String,
    pub safety: String,
}

impl Default for ScoreColumns {
    fn default() -> Self {
        Self {
            id: "P_ID".into(),
            category: "WALK_CATEGORY".into(),
            length: "SHAPE_Length".into(),
            aesthetics: "AES_SCORE".into(),
            destination: "DEST_SCORE".into(),
            conspicuousness: "CON_SCORE".into(),
            safety: "SAFETY".into(),
        }
    }
}

/// Everything the loader and figure builders need besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ScoreColumns,
    /// Identifier attribute on the geometry source.
    pub geometry_id_field: String,
    /// PROJ.4 string overriding the geometry source CRS.
    pub source_crs: Option<String>,
    /// Fail the load instead of dropping unmatched or duplicate ids.
    pub strict_join: bool,
    pub default_center: LatLon,
    pub default_zoom: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ScoreColumns::default(),
            geometry_id_field: "P_ID".into(),
            source_crs: None,
            strict_join: false,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}
