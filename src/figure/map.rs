use crate::{
    figure::{Figure, Layout, Legend, LineStyle, Mapbox, MapboxTrace, Margin, Trace},
    network::{JoinedSegment, SegmentNetwork, Selection, WalkCategory},
    viewport::Viewport,
};

const MAP_STYLE: &str = "open-street-map";
const LINE_WIDTH: f64 = 2.0;

/// Categorized map of the selected segments.
///
/// An empty selection yields a basemap-only figure. Otherwise one line trace
/// is drawn per segment, grouped by category best to worst, and only the first
/// trace of each category is shown in the legend. Segments whose geometry is
/// not a simple polyline with at least two finite vertices are skipped.
pub fn map_figure(network: &SegmentNetwork, selection: &Selection, viewport: &Viewport) -> Figure {
    let mut data = Vec::new();

    if !selection.is_empty() {
        for category in WalkCategory::order() {
            if !selection.admits(category) { continue }

            let traces = network.in_category(category).filter_map(segment_trace);
            for (i, mut trace) in traces.enumerate() {
                if i > 0 { trace.showlegend = Some(false) }
                data.push(Trace::Scattermapbox(trace));
            }
        }
    }

    // Plotly only draws the map subplot when it has at least one mapbox trace.
    if data.is_empty() {
        data.push(Trace::Scattermapbox(MapboxTrace { showlegend: Some(false), ..MapboxTrace::default() }));
    }

    Figure { data, layout: map_layout(viewport) }
}

fn segment_trace(segment: &JoinedSegment) -> Option<MapboxTrace> {
    let line = segment.line()?;
    if line.0.len() < 2 || line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return None
    }

    let category = segment.category();
    let (lon, lat): (Vec<f64>, Vec<f64>) = line.0.iter().map(|c| (c.x, c.y)).unzip();

    Some(MapboxTrace {
        customdata: vec![segment.id(); lat.len()],
        lat,
        lon,
        mode: Some("lines".into()),
        line: Some(LineStyle { color: category.color().into(), width: LINE_WIDTH }),
        hoverinfo: Some("text".into()),
        text: Some(category.label().into()),
        name: Some(category.label().into()),
        legendgroup: Some(category.label().into()),
        showlegend: Some(true),
        connectgaps: Some(true),
    })
}

fn map_layout(viewport: &Viewport) -> Layout {
    Layout {
        autosize: Some(true),
        margin: Some(Margin::uniform(2)),
        mapbox: Some(Mapbox { style: MAP_STYLE.into(), center: viewport.center, zoom: viewport.zoom }),
        legend: Some(Legend { yanchor: "top".into(), y: 0.99, xanchor: "left".into(), x: 0.01 }),
        ..Layout::default()
    }
}
