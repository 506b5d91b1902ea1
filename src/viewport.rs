use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LatLon;

/// Zoom used when the first interaction reports a center but no zoom.
pub const RELAYOUT_FALLBACK_ZOOM: f64 = 15.0;

/// Map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: f64,
}

/// The parts of a Plotly `relayoutData` payload that describe the map view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelayoutEvent {
    pub center: Option<LatLon>,
    pub zoom: Option<f64>,
}

impl RelayoutEvent {
    /// Read `mapbox.center` / `mapbox.zoom` out of relayout data.
    /// Other keys (autosize, legend clicks, drag modes) are ignored.
    pub fn from_relayout(data: &Map<String, Value>) -> Self {
        let center = data.get("mapbox.center").and_then(|center| {
            Some(LatLon { lat: center.get("lat")?.as_f64()?, lon: center.get("lon")?.as_f64()? })
        });
        let zoom = data.get("mapbox.zoom").and_then(Value::as_f64);
        Self { center, zoom }
    }
}

/// Remembered map view for one dashboard session.
///
/// Starts empty. Only an interaction that reports a new center moves it; the
/// zoom carries over from the previous view when the interaction has none.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportStore {
    remembered: Option<Viewport>,
}

impl ViewportStore {
    pub fn remembered(&self) -> Option<&Viewport> { self.remembered.as_ref() }

    /// Apply a pan/zoom interaction. Returns whether the remembered view changed.
    pub fn apply(&mut self, event: &RelayoutEvent) -> bool {
        let next = next_viewport(self.remembered, event);
        let changed = next != self.remembered;
        self.remembered = next;
        changed
    }
}

/// Viewport transition for one interaction.
pub fn next_viewport(previous: Option<Viewport>, event: &RelayoutEvent) -> Option<Viewport> {
    let Some(center) = event.center else { return previous };
    let zoom = event.zoom
        .or(previous.map(|viewport| viewport.zoom))
        .unwrap_or(RELAYOUT_FALLBACK_ZOOM);
    Some(Viewport { center, zoom })
}
