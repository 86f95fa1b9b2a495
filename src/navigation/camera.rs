use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::Coordinate;
use crate::routing::RoutePlan;

pub const TRACKING_PITCH_DEG: f64 = 60.0;
pub const TRACKING_ZOOM: f64 = 17.0;
pub const FLY_TO_ANIMATION_MS: u64 = 2000;
pub const ROUTE_PADDING_PX: u32 = 48;

/// Camera repositioning request for the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraCommand {
    FlyTo {
        center: Coordinate,
        zoom: f64,
        animation_ms: u64,
    },
    FitRoute {
        south_west: Coordinate,
        north_east: Coordinate,
        padding_px: u32,
    },
    /// Follow the device position and heading from an elevated pitch.
    Track {
        pitch_deg: f64,
        zoom: f64,
        follow_heading: bool,
    },
    /// Top-down, north-up.
    Neutral { pitch_deg: f64, bearing_deg: f64 },
}

impl CameraCommand {
    pub fn fly_to(center: Coordinate, zoom: f64) -> Self {
        CameraCommand::FlyTo {
            center,
            zoom,
            animation_ms: FLY_TO_ANIMATION_MS,
        }
    }

    pub fn fit_route(plan: &RoutePlan) -> Self {
        let (south_west, north_east) = plan.bounds();
        CameraCommand::FitRoute {
            south_west,
            north_east,
            padding_px: ROUTE_PADDING_PX,
        }
    }

    pub fn tracking() -> Self {
        CameraCommand::Track {
            pitch_deg: TRACKING_PITCH_DEG,
            zoom: TRACKING_ZOOM,
            follow_heading: true,
        }
    }

    pub fn neutral() -> Self {
        CameraCommand::Neutral {
            pitch_deg: 0.0,
            bearing_deg: 0.0,
        }
    }
}
