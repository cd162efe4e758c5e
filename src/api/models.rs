use serde::Serialize;

use crate::domain::{MatchupRow, QualificationRow};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupListResponse {
    pub team: String,
    pub total: usize,
    pub items: Vec<MatchupRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResponse {
    pub items: Vec<QualificationRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: &'static str,
    pub error: String,
}
