use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState, DashboardParams};
use crate::api::models::{MatchupListResponse, QualificationResponse};
use crate::filter::{apply_filter, team_options};
use crate::loader::{load_matchups_from_path, load_qualification_from_path};
use crate::presenter::chart::ordered_buckets;
use crate::presenter::{render_elo_scatter, render_qual_bar_chart};

pub async fn get_teams(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match load_matchups_from_path(&state.config.data.stats_path) {
        Ok(table) => Json(team_options(&table)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn get_matchups(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let query = params.to_query(&state.config);
    let table = match load_matchups_from_path(&state.config.data.stats_path) {
        Ok(table) => table,
        Err(e) => return error_response(&e),
    };

    let filtered = apply_filter(&table, &query.team);
    Json(MatchupListResponse {
        team: query.team.label().to_string(),
        total: filtered.len(),
        items: filtered.rows,
    })
    .into_response()
}

pub async fn get_qualification(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let table = match load_qualification_from_path(&state.config.data.by_gd_path) {
        Ok(table) => table,
        Err(e) => return error_response(&e),
    };

    let items = ordered_buckets(&table, state.config.presentation.gd_order)
        .into_iter()
        .cloned()
        .collect();
    Json(QualificationResponse { items }).into_response()
}

pub async fn get_elo_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let query = params.to_query(&state.config);
    match load_matchups_from_path(&state.config.data.stats_path) {
        Ok(table) => Json(render_elo_scatter(&apply_filter(&table, &query.team))).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn get_qualification_chart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match load_qualification_from_path(&state.config.data.by_gd_path) {
        Ok(table) => Json(render_qual_bar_chart(
            &table,
            state.config.presentation.gd_order,
        ))
        .into_response(),
        Err(e) => error_response(&e),
    }
}
