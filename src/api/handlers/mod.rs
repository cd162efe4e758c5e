use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::config::settings::{AppConfig, TableLayoutKind};
use crate::errors::DataError;
use crate::filter::TeamSelection;
use crate::presenter::DashboardQuery;

pub mod dashboard;
pub mod data;

/// Shared, read-only. Tables are loaded per request.
pub struct AppState {
    pub config: AppConfig,
}

#[derive(Deserialize, Default)]
pub struct DashboardParams {
    pub team: Option<String>,
    pub layout: Option<TableLayoutKind>,
}

impl DashboardParams {
    pub fn to_query(&self, config: &AppConfig) -> DashboardQuery {
        DashboardQuery::new(
            TeamSelection::from_param(self.team.as_deref()),
            self.layout.unwrap_or(config.presentation.default_layout),
        )
    }
}

pub fn error_response(error: &DataError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            kind: error.kind(),
            error: error.to_string(),
        }),
    )
        .into_response()
}
