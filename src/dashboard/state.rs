use std::sync::Arc;

use crate::{
    config::DashboardConfig,
    figure::{Figure, bar_figure},
    network::{SegmentNetwork, Selection},
    viewport::Viewport,
};

use super::callbacks::{ScatterFigure, scatter_set};

/// Loaded data plus the figures that never change after load.
#[derive(Debug, Clone)]
pub struct Dashboard {
    network: Arc<SegmentNetwork>,
    config: DashboardConfig,
    bar: Figure,
    full_scatters: Vec<ScatterFigure>,
}

impl Dashboard {
    pub fn new(network: SegmentNetwork, config: DashboardConfig) -> Self {
        let bar = bar_figure(network.aggregates());
        let full_scatters = scatter_set(&network, &Selection::All);
        Self { network: Arc::new(network), config, bar, full_scatters }
    }

    pub fn network(&self) -> &SegmentNetwork { &self.network }

    pub fn config(&self) -> &DashboardConfig { &self.config }

    /// The category bar chart, built once at load.
    pub fn bar(&self) -> &Figure { &self.bar }

    /// Scatter charts over every joined segment.
    pub fn full_scatters(&self) -> &[ScatterFigure] { &self.full_scatters }

    pub fn default_viewport(&self) -> Viewport {
        Viewport { center: self.config.default_center, zoom: self.config.default_zoom }
    }

    /// The remembered viewport, or the configured default.
    pub fn viewport(&self, remembered: Option<&Viewport>) -> Viewport {
        remembered.copied().unwrap_or_else(|| self.default_viewport())
    }
}
