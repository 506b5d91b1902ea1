use clap::{Args, Parser, Subcommand, ValueHint};
use std::{net::SocketAddr, path::PathBuf};

use crate::config::{DashboardConfig, LatLon};

/// Walkability dashboard over a scored pedestrian network
#[derive(Parser, Debug)]
#[command(name = "walkability", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the data and serve the interactive dashboard
    Serve(ServeArgs),

    /// Write the dashboard figures and a static map to a directory
    Render(RenderArgs),
}

/// Inputs and loader options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Segment geometry (.shp, zipped shapefile or .geojson)
    #[arg(long, env = "WALK_GEOMETRY", value_hint = ValueHint::FilePath)]
    pub geometry: PathBuf,

    /// Score table (.csv)
    #[arg(long, env = "WALK_SCORES", value_hint = ValueHint::FilePath)]
    pub scores: PathBuf,

    /// Segment id attribute on the geometry source
    #[arg(long, default_value = "P_ID")]
    pub id_field: String,

    /// PROJ.4 string for the geometry CRS, overriding any .prj
    #[arg(long)]
    pub source_crs: Option<String>,

    /// Fail on unmatched or duplicate segment ids instead of dropping them
    #[arg(long)]
    pub strict_join: bool,

    /// Initial map center latitude
    #[arg(long, default_value_t = crate::config::DEFAULT_CENTER.lat, allow_hyphen_values = true)]
    pub center_lat: f64,

    /// Initial map center longitude
    #[arg(long, default_value_t = crate::config::DEFAULT_CENTER.lon, allow_hyphen_values = true)]
    pub center_lon: f64,

    /// Initial map zoom
    #[arg(long, default_value_t = crate::config::DEFAULT_ZOOM)]
    pub zoom: f64,
}

impl DataArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            geometry_id_field: self.id_field.clone(),
            source_crs: self.source_crs.clone(),
            strict_join: self.strict_join,
            default_center: LatLon { lat: self.center_lat, lon: self.center_lon },
            default_zoom: self.zoom,
            ..DashboardConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Address to listen on
    #[arg(long, env = "WALK_BIND", default_value = "127.0.0.1:8050")]
    pub bind: SocketAddr,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output location (directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out: PathBuf,

    /// Categories to select (repeatable; "ALL" for everything). Defaults to every category.
    #[arg(long = "select", value_name = "LABEL")]
    pub select: Vec<String>,

    /// Width of the static map in pixels
    #[arg(long, default_value_t = 1200.0)]
    pub width: f64,

    /// Overwrite existing outputs (off by default)
    #[arg(long)]
    pub force: bool,
}
