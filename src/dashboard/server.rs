//! HTTP routes: /, /health, /api/figures, /api/selection and /api/relayout.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::{signal, sync::RwLock};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    dashboard::{Dashboard, initial_figures, on_relayout, on_selection, page::INDEX_HTML},
    network::{Selection, SelectionRequest},
    viewport::{Viewport, ViewportStore},
};

/// Shared server state. The network is immutable; the viewport is the only
/// thing interactions change.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub viewport: Arc<RwLock<ViewportStore>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard: Arc::new(dashboard), viewport: Arc::new(RwLock::new(ViewportStore::default())) }
    }
}

#[derive(Debug, Serialize)]
struct RelayoutResponse {
    viewport: Option<Viewport>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Html(INDEX_HTML) }))
        .route("/health", get(|| async { "ok" }))
        .route("/api/figures", get(figures))
        .route("/api/selection", post(selection))
        .route("/api/relayout", post(relayout))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn figures(State(st): State<AppState>) -> impl IntoResponse {
    let store = st.viewport.read().await;
    Json(initial_figures(&st.dashboard, store.remembered()))
}

async fn selection(State(st): State<AppState>, Json(request): Json<SelectionRequest>) -> impl IntoResponse {
    let selection = Selection::from(&request);
    let store = st.viewport.read().await;
    Json(on_selection(&st.dashboard, &selection, store.remembered()))
}

async fn relayout(State(st): State<AppState>, Json(data): Json<Map<String, Value>>) -> impl IntoResponse {
    let mut store = st.viewport.write().await;
    Json(RelayoutResponse { viewport: on_relayout(&mut store, &data) })
}

/// Serve the dashboard until Ctrl-C.
pub async fn serve(dashboard: Dashboard, bind: SocketAddr) -> Result<()> {
    let app = router(AppState::new(dashboard));

    let listener = tokio::net::TcpListener::bind(bind).await
        .with_context(|| format!("[dashboard::serve] Failed to bind {bind}"))?;
    info!("[dashboard::serve] listening on http://{}", listener.local_addr()?);

    let serve = axum::serve(listener, app);
    tokio::select! {
        result = serve => { result.context("[dashboard::serve] server error")?; },
        _ = signal::ctrl_c() => { info!("[dashboard::serve] shutting down"); }
    }
    Ok(())
}
