use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    dashboard::{get_dashboard, health},
    data::{get_elo_chart, get_matchups, get_qualification, get_qualification_chart, get_teams},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/health", get(health))
        .route("/api/teams", get(get_teams))
        .route("/api/matchups", get(get_matchups))
        .route("/api/qualification", get(get_qualification))
        .route("/api/charts/elo", get(get_elo_chart))
        .route("/api/charts/qualification", get(get_qualification_chart))
        .with_state(state)
}
