//! Plotly figure JSON, restricted to what the dashboard draws.

use serde::Serialize;

use crate::{config::LatLon, network::SegmentId};

/// A renderable figure: `{"data": [...], "layout": {...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn mapbox_traces(&self) -> impl Iterator<Item = &MapboxTrace> {
        self.data.iter().filter_map(|trace| match trace {
            Trace::Scattermapbox(trace) => Some(trace),
            _ => None,
        })
    }

    /// Map traces that draw a segment (the basemap anchor carries no points).
    pub fn segment_traces(&self) -> impl Iterator<Item = &MapboxTrace> {
        self.mapbox_traces().filter(|trace| !trace.lat.is_empty())
    }

    /// Names shown in the legend, in trace order.
    pub fn legend_names(&self) -> Vec<&str> {
        self.mapbox_traces()
            .filter(|trace| trace.showlegend != Some(false))
            .filter_map(|trace| trace.name.as_deref())
            .collect()
    }

    pub fn scatter(&self) -> Option<&ScatterTrace> {
        self.data.iter().find_map(|trace| match trace {
            Trace::Scatter(trace) => Some(trace),
            _ => None,
        })
    }

    pub fn bar(&self) -> Option<&BarTrace> {
        self.data.iter().find_map(|trace| match trace {
            Trace::Bar(trace) => Some(trace),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scattermapbox(MapboxTrace),
    Bar(BarTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapboxTrace {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Segment id repeated for every vertex.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customdata: Vec<SegmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectgaps: Option<bool>,
}

impl MapboxTrace {
    pub fn segment_id(&self) -> Option<SegmentId> { self.customdata.first().copied() }

    pub fn color(&self) -> Option<&str> { self.line.as_ref().map(|line| line.color.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub width: f64,
    pub opacity: f64,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: String,
    pub customdata: Vec<SegmentId>,
    pub hovertemplate: String,
    pub marker: Marker,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub fn uniform(px: u32) -> Self { Self { l: px, r: px, t: px, b: px } }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Title {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), font: None, x: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: LatLon,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}
