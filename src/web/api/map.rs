use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::TileAxisOrder;
use crate::navigation::CameraCommand;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MapResponse {
    /// Tile URL template served through this backend.
    pub tile_url: String,
    /// Template of the upstream tile source.
    pub upstream_tile_url: String,
    pub axis_order: TileAxisOrder,
    pub attribution: String,
    pub initial_camera: CameraCommand,
}

#[utoipa::path(
    get,
    path = "/api/map",
    responses(
        (status = 200, description = "Map settings and initial camera", body = MapResponse)
    ),
    tag = "map"
)]
pub async fn settings(State(state): State<AppState>) -> ApiResult<Json<MapResponse>> {
    let center = match state.location() {
        Some(position) => position,
        None => state
            .config
            .map
            .default_center()
            .map_err(|e| ApiError::Validation(e.to_string()))?,
    };

    Ok(Json(MapResponse {
        tile_url: "/api/map/tiles/{z}/{x}/{y}".to_string(),
        upstream_tile_url: state.tiles.as_str().to_string(),
        axis_order: state.tiles.order(),
        attribution: state.config.map.attribution.clone(),
        initial_camera: CameraCommand::fly_to(center, state.config.map.default_zoom),
    }))
}

#[utoipa::path(
    get,
    path = "/api/map/tiles/{z}/{x}/{y}",
    params(
        ("z" = u8, Path, description = "Zoom level"),
        ("x" = u32, Path, description = "Tile column"),
        ("y" = u32, Path, description = "Tile row")
    ),
    responses(
        (status = 307, description = "Redirect to the upstream tile"),
        (status = 400, description = "Tile outside the zoom level", body = ErrorResponse)
    ),
    tag = "map"
)]
pub async fn tile(
    State(state): State<AppState>,
    Path((z, x, y)): Path<(u8, u32, u32)>,
) -> ApiResult<Redirect> {
    let url = state.tiles.url(z, x, y)?;
    Ok(Redirect::temporary(&url))
}
