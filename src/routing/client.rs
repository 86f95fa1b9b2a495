use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use super::error::RouteError;
use super::types::{ManeuverType, RoutePlan, RouteStep};
use crate::geo::{polyline, Coordinate};

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
    /// `[lon, lat]`
    location: [f64; 2],
}

const NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoSegment"];

/// Client for an OSRM-compatible `/route/v1/<profile>` endpoint.
pub struct RouteClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RouteClient {
    pub fn new(
        endpoint: &str,
        identifier: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, RouteError> {
        let mut builder = reqwest::Client::builder().user_agent(identifier);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// The routing service takes `lon,lat` pairs.
    fn route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/{},{};{},{}",
            self.endpoint,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }

    pub async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RoutePlan, RouteError> {
        let url = self.route_url(origin, destination);
        log::debug!("Requesting route {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline"),
                ("steps", "true"),
            ])
            .send()
            .await?;

        // Error codes arrive with a 4xx status and a JSON body, so the body is
        // inspected before the status.
        let status = response.status();
        let body = response.text().await?;
        let parsed: OsrmRouteResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(RouteError::Network(format!("HTTP {}", status.as_u16())))
            }
            Err(e) => return Err(RouteError::InvalidResponse(e.to_string())),
        };

        parse_route_response(parsed)
    }
}

fn parse_route_response(response: OsrmRouteResponse) -> Result<RoutePlan, RouteError> {
    if response.code != "Ok" {
        if NO_ROUTE_CODES.contains(&response.code.as_str()) {
            return Err(RouteError::NotFound(response.code));
        }
        return Err(RouteError::Rejected {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    // Alternatives, if any, follow the primary route; only the first is used.
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::NotFound("no routes returned".into()))?;

    let path = polyline::decode(&route.geometry)?;
    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(convert_step)
        .collect::<Result<Vec<_>, _>>()?;

    RoutePlan::new(path, route.distance, route.duration, steps)
}

fn convert_step(step: OsrmStep) -> Result<RouteStep, RouteError> {
    let [lon, lat] = step.maneuver.location;
    let maneuver_type = ManeuverType::from_str(&step.maneuver.kind)
        .unwrap_or(ManeuverType::Other(step.maneuver.kind));

    Ok(RouteStep {
        maneuver_type,
        maneuver_modifier: step.maneuver.modifier,
        street_name: step.name,
        distance_meters: step.distance.max(0.0),
        duration_seconds: step.duration.max(0.0),
        location: Coordinate::new(lat, lon)?,
    })
}
