use thiserror::Error;

use crate::geo::{CoordinateError, PolylineError};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route found ({0})")]
    NotFound(String),
    #[error("routing request rejected ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("routing service unreachable: {0}")]
    Network(String),
    #[error("unexpected routing response: {0}")]
    InvalidResponse(String),
    #[error("invalid route geometry: {0}")]
    Geometry(#[from] PolylineError),
    #[error("invalid maneuver location: {0}")]
    Location(#[from] CoordinateError),
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RouteError::InvalidResponse(err.to_string())
        } else {
            RouteError::Network(err.to_string())
        }
    }
}
