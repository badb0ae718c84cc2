use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use launch_core::controller::{ChartId, ControlId, Controller};
use launch_core::layout::DashboardLayout;
use launch_core::{PayloadRange, SelectorState, SiteSelector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{page, plotly, AppState, WebError};

pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.layout.clone())
}

/// Control values as sent by the page. The payload pair is validated here so
/// an inverted range is reported as a bad request.
#[derive(Debug, Deserialize)]
pub struct PageState {
    pub site: SiteSelector,
    pub payload: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Control that changed; absent on the initial page render.
    #[serde(default)]
    pub changed: Option<ControlId>,
    pub state: PageState,
}

#[derive(Debug, Serialize)]
pub struct ChartFigure {
    pub id: ChartId,
    pub figure: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// State after clamping into the slider domain.
    pub state: SelectorState,
    pub charts: Vec<ChartFigure>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, WebError> {
    let [low, high] = request.state.payload;
    let selection = SelectorState {
        site: request.state.site,
        payload: PayloadRange::new(low, high)?,
    };
    let controller = Controller::restore(Arc::clone(&state.store), selection);
    let updates = match request.changed {
        Some(control) => controller.render_bound(control),
        None => controller.initial_render(),
    };
    debug!(
        changed = request.changed.map(ControlId::as_str),
        charts = updates.len(),
        "dispatched update"
    );

    let charts = updates
        .iter()
        .map(|update| ChartFigure {
            id: update.chart,
            figure: plotly::figure(&update.spec),
        })
        .collect();
    Ok(Json(UpdateResponse {
        state: controller.state().clone(),
        charts,
    }))
}
