use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::TileError;
use crate::geocode::GeocodeError;
use crate::navigation::{CameraCommand, NavigationError};
use crate::routing::RouteError;

pub enum ApiError {
    Validation(String),
    Navigation(NavigationError),
    /// A navigation failure that still moved the map, e.g. a failed search
    /// that discarded the previewed route.
    Reframed(NavigationError, CameraCommand),
}

impl From<NavigationError> for ApiError {
    fn from(e: NavigationError) -> Self {
        ApiError::Navigation(e)
    }
}

impl From<TileError> for ApiError {
    fn from(e: TileError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl ApiError {
    /// Attach the camera move the failed request left behind, if any.
    pub fn with_camera(self, camera: Option<CameraCommand>) -> Self {
        match (self, camera) {
            (ApiError::Navigation(e), Some(camera)) => ApiError::Reframed(e, camera),
            (this, _) => this,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            ApiError::Navigation(e) | ApiError::Reframed(e, _) => navigation_status(e),
        }
    }
}

fn navigation_status(e: &NavigationError) -> (StatusCode, &'static str) {
    match e {
        NavigationError::Geocode(GeocodeError::EmptyQuery) => {
            (StatusCode::BAD_REQUEST, "empty_query")
        }
        NavigationError::Geocode(GeocodeError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "destination_not_found")
        }
        NavigationError::Geocode(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
        NavigationError::Route(RouteError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "route_not_found")
        }
        NavigationError::Route(RouteError::Rejected { .. }) => {
            (StatusCode::BAD_GATEWAY, "route_rejected")
        }
        NavigationError::Route(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
        NavigationError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
        NavigationError::Superseded => (StatusCode::CONFLICT, "search_superseded"),
        NavigationError::LocationUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "location_unavailable")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = match self {
            ApiError::Validation(msg) => ErrorResponse::with_message(code, &msg),
            ApiError::Navigation(e) => ErrorResponse::with_message(code, &e.to_string()),
            ApiError::Reframed(e, camera) => {
                ErrorResponse::with_message(code, &e.to_string()).camera(camera)
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Camera move the map should still perform despite the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraCommand>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
            camera: None,
        }
    }

    pub fn camera(mut self, camera: CameraCommand) -> Self {
        self.camera = Some(camera);
        self
    }
}
