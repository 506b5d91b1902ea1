use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    dashboard::Dashboard,
    figure::{Figure, map_figure, scatter_figures},
    network::{SegmentNetwork, Selection},
    viewport::{RelayoutEvent, Viewport, ViewportStore},
};

/// One scatter chart with the key the page uses to place it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub key: &'static str,
    pub figure: Figure,
}

/// Everything the page draws on first load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFigures {
    /// Labels the multi-select starts with.
    pub selected: Vec<String>,
    pub map: Figure,
    pub bar: Figure,
    pub scatters: Vec<ScatterFigure>,
}

/// The outputs that react to the multi-select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionFigures {
    pub map: Figure,
    pub scatters: Vec<ScatterFigure>,
}

pub(crate) fn scatter_set(network: &SegmentNetwork, selection: &Selection) -> Vec<ScatterFigure> {
    scatter_figures(network, selection).into_iter()
        .map(|(dimension, figure)| ScatterFigure { key: dimension.key(), figure })
        .collect()
}

/// First render: every category selected, prebuilt bar and scatter charts.
pub fn initial_figures(dashboard: &Dashboard, remembered: Option<&Viewport>) -> DashboardFigures {
    let selection = Selection::every_category();
    DashboardFigures {
        selected: selection.labels(),
        map: map_figure(dashboard.network(), &selection, &dashboard.viewport(remembered)),
        bar: dashboard.bar().clone(),
        scatters: dashboard.full_scatters().to_vec(),
    }
}

/// Recompute the map and scatter charts for a new selection.
/// The remembered viewport is read, never changed.
pub fn on_selection(dashboard: &Dashboard, selection: &Selection, remembered: Option<&Viewport>) -> SelectionFigures {
    debug!(selection = ?selection.labels(), "[dashboard::selection] recomputing figures");

    let scatters = match selection {
        Selection::Empty | Selection::All => dashboard.full_scatters().to_vec(),
        Selection::Categories(_) => scatter_set(dashboard.network(), selection),
    };

    SelectionFigures {
        map: map_figure(dashboard.network(), selection, &dashboard.viewport(remembered)),
        scatters,
    }
}

/// Fold a Plotly relayout payload into the viewport store.
/// Returns the remembered viewport afterwards.
pub fn on_relayout(store: &mut ViewportStore, data: &Map<String, Value>) -> Option<Viewport> {
    let event = RelayoutEvent::from_relayout(data);
    if store.apply(&event) {
        debug!(viewport = ?store.remembered(), "[dashboard::relayout] viewport remembered");
    }
    store.remembered().copied()
}
