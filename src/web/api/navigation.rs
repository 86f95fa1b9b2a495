use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinate;
use crate::navigation::{
    plan_route, CameraCommand, NavigationError, NavigationSession, NavigationSummary,
    NavigationViewState,
};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Free-text destination, e.g. `"Alexanderplatz, Berlin"`.
    pub query: String,
    /// Route origin; the last reported device position when omitted.
    pub origin: Option<Coordinate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub state: NavigationViewState,
    pub summary: NavigationSummary,
    /// Camera move the map should perform, if the request caused one.
    pub camera: Option<CameraCommand>,
    /// Route path as a GeoJSON `LineString`.
    #[schema(value_type = Option<Object>)]
    pub route: Option<serde_json::Value>,
    pub searching: bool,
}

impl NavigationResponse {
    fn new(session: &NavigationSession, camera: Option<CameraCommand>) -> Self {
        let state = session.state().clone();
        NavigationResponse {
            summary: state.summary(),
            route: state.plan().map(|plan| plan.to_geojson()),
            searching: session.is_searching(),
            camera,
            state,
        }
    }
}

fn validated(position: Coordinate) -> ApiResult<Coordinate> {
    Coordinate::new(position.latitude, position.longitude)
        .map_err(|e| ApiError::Validation(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Current navigation state", body = NavigationResponse)
    ),
    tag = "navigation"
)]
pub async fn status(State(state): State<AppState>) -> Json<NavigationResponse> {
    let session = state.session.lock().await;
    Json(NavigationResponse::new(&session, None))
}

#[utoipa::path(
    post,
    path = "/api/navigation/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Route found, previewing", body = NavigationResponse),
        (status = 400, description = "Empty query or invalid origin", body = ErrorResponse),
        (status = 404, description = "Destination or route not found", body = ErrorResponse),
        (status = 409, description = "Search not allowed now or superseded", body = ErrorResponse),
        (status = 502, description = "Upstream service failed", body = ErrorResponse),
        (status = 503, description = "Device position unknown", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<NavigationResponse>> {
    let origin = match request.origin {
        Some(origin) => validated(origin)?,
        None => state.location().ok_or_else(|| {
            NavigationError::LocationUnavailable("no position has been reported".into())
        })?,
    };

    // The session is not held while the upstream services are queried, so a
    // newer search or a cancel can supersede this one.
    let ticket = state.session.lock().await.begin_search(&request.query)?;
    let result = plan_route(
        state.geocoder.as_ref(),
        state.planner.as_ref(),
        &origin,
        &request.query,
    )
    .await;

    let mut session = state.session.lock().await;
    match session.complete_search(ticket, result) {
        Ok(camera) => Ok(Json(NavigationResponse::new(&session, camera))),
        Err(e) => Err(ApiError::from(e).with_camera(session.take_camera())),
    }
}

#[utoipa::path(
    post,
    path = "/api/navigation/cancel",
    responses(
        (status = 200, description = "Preview or search discarded", body = NavigationResponse),
        (status = 409, description = "Nothing to cancel", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn cancel(State(state): State<AppState>) -> ApiResult<Json<NavigationResponse>> {
    let mut session = state.session.lock().await;
    let camera = session.cancel()?;
    Ok(Json(NavigationResponse::new(&session, camera)))
}

#[utoipa::path(
    post,
    path = "/api/navigation/confirm",
    responses(
        (status = 200, description = "Navigation started", body = NavigationResponse),
        (status = 409, description = "No route is being previewed", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn confirm(State(state): State<AppState>) -> ApiResult<Json<NavigationResponse>> {
    let mut session = state.session.lock().await;
    let camera = session.confirm()?;
    Ok(Json(NavigationResponse::new(&session, camera)))
}

#[utoipa::path(
    post,
    path = "/api/navigation/stop",
    responses(
        (status = 200, description = "Navigation stopped", body = NavigationResponse),
        (status = 409, description = "Not navigating", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn stop(State(state): State<AppState>) -> ApiResult<Json<NavigationResponse>> {
    let mut session = state.session.lock().await;
    let camera = session.stop()?;
    Ok(Json(NavigationResponse::new(&session, camera)))
}

#[utoipa::path(
    post,
    path = "/api/navigation/advance",
    responses(
        (status = 200, description = "Moved to the next step", body = NavigationResponse),
        (status = 409, description = "Not navigating", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn advance(State(state): State<AppState>) -> ApiResult<Json<NavigationResponse>> {
    let mut session = state.session.lock().await;
    let camera = session.advance_step()?;
    Ok(Json(NavigationResponse::new(&session, camera)))
}

#[utoipa::path(
    post,
    path = "/api/location",
    request_body = LocationUpdate,
    responses(
        (status = 200, description = "Position recorded", body = NavigationResponse),
        (status = 400, description = "Coordinate out of range", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn update_location(
    State(state): State<AppState>,
    Json(update): Json<LocationUpdate>,
) -> ApiResult<Json<NavigationResponse>> {
    let position = Coordinate::new(update.latitude, update.longitude)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    state.set_location(position);

    let mut session = state.session.lock().await;
    session.update_position(position)?;
    Ok(Json(NavigationResponse::new(&session, None)))
}
