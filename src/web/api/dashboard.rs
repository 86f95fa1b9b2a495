use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::heading::HeadingState;
use crate::navigation::NavigationSummary;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HeadingResponse {
    pub state: HeadingState,
    /// Rotation to apply to the compass rose so it keeps pointing north.
    pub indicator_rotation_deg: Option<f64>,
}

impl From<HeadingState> for HeadingResponse {
    fn from(state: HeadingState) -> Self {
        HeadingResponse {
            indicator_rotation_deg: state.sample().map(|s| s.indicator_rotation_deg()),
            state,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Local wall clock, `HH:MM`.
    pub time: String,
    /// Local date, e.g. `Sat, 17 Oct`.
    pub date: String,
    pub heading: HeadingResponse,
    pub navigation: NavigationSummary,
}

#[utoipa::path(
    get,
    path = "/api/heading",
    responses(
        (status = 200, description = "Latest compass reading", body = HeadingResponse)
    ),
    tag = "dashboard"
)]
pub async fn heading(State(state): State<AppState>) -> Json<HeadingResponse> {
    Json(state.heading().into())
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Home screen status", body = DashboardResponse)
    ),
    tag = "dashboard"
)]
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let now = Local::now();
    let navigation = state.session.lock().await.state().summary();

    Json(DashboardResponse {
        time: now.format("%H:%M").to_string(),
        date: now.format("%a, %-d %b").to_string(),
        heading: state.heading().into(),
        navigation,
    })
}
