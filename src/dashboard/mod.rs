//! Dashboard wiring: shared state, pure callbacks and the HTTP adapter.

mod callbacks;
mod page;
mod server;
mod state;

pub use callbacks::{DashboardFigures, ScatterFigure, SelectionFigures, initial_figures, on_relayout, on_selection};
pub use server::{AppState, router, serve};
pub use state::Dashboard;
