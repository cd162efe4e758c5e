use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use log::info;
use std::sync::Arc;

use super::{AppState, DashboardParams};
use crate::loader::load_dashboard_data;
use crate::presenter::render_dashboard;

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let query = params.to_query(&state.config);
    let data = load_dashboard_data(&state.config.data);
    let page = render_dashboard(&state.config, &data, &query);
    info!("Rendered dashboard for team '{}'", query.team.label());

    let status = if page.complete {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Html(page.html))
}

pub async fn health() -> &'static str {
    "ok"
}
