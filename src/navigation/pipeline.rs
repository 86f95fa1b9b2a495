use async_trait::async_trait;

use super::error::NavigationError;
use crate::geo::Coordinate;
use crate::geocode::{GeocodeClient, GeocodeError, Place};
use crate::routing::{RouteClient, RouteError, RoutePlan};

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Place, GeocodeError>;
}

#[async_trait]
pub trait RoutePlanner: Send + Sync {
    async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RoutePlan, RouteError>;
}

#[async_trait]
impl Geocoder for GeocodeClient {
    async fn resolve(&self, query: &str) -> Result<Place, GeocodeError> {
        GeocodeClient::resolve(self, query).await
    }
}

#[async_trait]
impl RoutePlanner for RouteClient {
    async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RoutePlan, RouteError> {
        RouteClient::route(self, origin, destination).await
    }
}

#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub destination: Place,
    pub plan: RoutePlan,
}

/// Geocode `query`, then route from `origin` to the match. The routing call
/// is only made once geocoding succeeded; the first failure is returned.
pub async fn plan_route<G, R>(
    geocoder: &G,
    planner: &R,
    origin: &Coordinate,
    query: &str,
) -> Result<PlannedRoute, NavigationError>
where
    G: Geocoder + ?Sized,
    R: RoutePlanner + ?Sized,
{
    let destination = geocoder.resolve(query).await?;
    log::debug!(
        "Resolved {:?} to {:.5},{:.5}",
        query,
        destination.coordinate.latitude,
        destination.coordinate.longitude
    );

    let plan = planner.route(origin, &destination.coordinate).await?;
    Ok(PlannedRoute { destination, plan })
}
