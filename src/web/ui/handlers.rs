use axum::{extract::State, response::IntoResponse};

use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    DashboardTemplate {
        identifier: state.config.app.identifier.clone(),
        attribution: state.config.map.attribution.clone(),
    }
}
