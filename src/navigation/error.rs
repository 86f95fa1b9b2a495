use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::routing::RouteError;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("cannot {event} while in {state} mode")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
    #[error("search was superseded by a newer request")]
    Superseded,
    #[error("current location unknown: {0}")]
    LocationUnavailable(String),
}
