use utoipa::OpenApi;

use super::api::dashboard::{DashboardResponse, HeadingResponse};
use super::api::error::ErrorResponse;
use super::api::map::MapResponse;
use super::api::navigation::{LocationUpdate, NavigationResponse, SearchRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::navigation::status,
        super::api::navigation::search,
        super::api::navigation::cancel,
        super::api::navigation::confirm,
        super::api::navigation::stop,
        super::api::navigation::advance,
        super::api::navigation::update_location,
        super::api::dashboard::heading,
        super::api::dashboard::dashboard,
        super::api::map::settings,
        super::api::map::tile,
    ),
    components(
        schemas(
            SearchRequest,
            LocationUpdate,
            NavigationResponse,
            HeadingResponse,
            DashboardResponse,
            MapResponse,
            ErrorResponse,
            crate::geo::Coordinate,
            crate::geo::TileAxisOrder,
            crate::heading::HeadingState,
            crate::heading::HeadingSample,
            crate::navigation::CameraCommand,
            crate::navigation::NavigationSummary,
            crate::navigation::NavigationViewState,
            crate::routing::RoutePlan,
            crate::routing::RouteStep,
        )
    ),
    info(
        title = "PITBIKΞ OS API",
        description = "Navigation, compass and map backend for the PITBIKΞ OS dashboard",
        version = "0.1.0"
    ),
    tags(
        (name = "navigation", description = "Destination search and turn-by-turn state"),
        (name = "dashboard", description = "Home screen status"),
        (name = "map", description = "Map settings and tiles")
    )
)]
pub struct ApiDoc;
