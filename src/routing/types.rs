use serde::{Serialize, Serializer};
use serde_json::json;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::error::RouteError;
use crate::geo::Coordinate;

/// Maneuver kinds reported by OSRM-compatible routing engines.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
pub enum ManeuverType {
    #[strum(serialize = "depart")]
    Depart,
    #[strum(serialize = "arrive")]
    Arrive,
    #[strum(serialize = "turn")]
    Turn,
    #[strum(serialize = "new name")]
    NewName,
    #[strum(serialize = "continue")]
    Continue,
    #[strum(serialize = "merge")]
    Merge,
    #[strum(serialize = "on ramp")]
    OnRamp,
    #[strum(serialize = "off ramp")]
    OffRamp,
    #[strum(serialize = "fork")]
    Fork,
    #[strum(serialize = "end of road")]
    EndOfRoad,
    #[strum(serialize = "roundabout")]
    Roundabout,
    #[strum(serialize = "rotary")]
    Rotary,
    #[strum(serialize = "roundabout turn")]
    RoundaboutTurn,
    #[strum(serialize = "exit roundabout")]
    ExitRoundabout,
    #[strum(serialize = "exit rotary")]
    ExitRotary,
    #[strum(serialize = "notification")]
    Notification,
    #[strum(default)]
    Other(String),
}

impl Serialize for ManeuverType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RouteStep {
    #[schema(value_type = String, example = "turn")]
    pub maneuver_type: ManeuverType,
    pub maneuver_modifier: Option<String>,
    pub street_name: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Where the maneuver takes place.
    pub location: Coordinate,
}

impl RouteStep {
    pub fn instruction(&self) -> String {
        let modifier = self.maneuver_modifier.as_deref();
        let action = match (&self.maneuver_type, modifier) {
            (ManeuverType::Arrive, _) => return "Arrive at your destination".to_string(),
            (ManeuverType::Depart, _) => "Depart".to_string(),
            (_, Some("uturn")) => "Make a U-turn".to_string(),
            (ManeuverType::Turn, Some("straight")) => "Continue straight".to_string(),
            (ManeuverType::Turn, Some(m)) | (ManeuverType::EndOfRoad, Some(m)) => {
                format!("Turn {}", m)
            }
            (ManeuverType::Continue, Some(m)) => format!("Continue {}", m),
            (ManeuverType::Merge, Some(m)) => format!("Merge {}", m),
            (ManeuverType::Fork, Some(m)) => format!("Keep {} at the fork", m),
            (ManeuverType::OnRamp, _) => "Take the ramp".to_string(),
            (ManeuverType::OffRamp, _) => "Take the exit".to_string(),
            (ManeuverType::Roundabout, _)
            | (ManeuverType::Rotary, _)
            | (ManeuverType::RoundaboutTurn, _) => "Enter the roundabout".to_string(),
            (ManeuverType::ExitRoundabout, _) | (ManeuverType::ExitRotary, _) => {
                "Exit the roundabout".to_string()
            }
            _ => "Continue".to_string(),
        };

        if self.street_name.is_empty() {
            action
        } else {
            format!("{} onto {}", action, self.street_name)
        }
    }
}

/// Decoded result of one routing request. Never mutated after construction;
/// a new search replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RoutePlan {
    path: Vec<Coordinate>,
    total_distance_meters: f64,
    total_duration_seconds: f64,
    steps: Vec<RouteStep>,
}

impl RoutePlan {
    pub fn new(
        path: Vec<Coordinate>,
        total_distance_meters: f64,
        total_duration_seconds: f64,
        steps: Vec<RouteStep>,
    ) -> Result<Self, RouteError> {
        if path.len() < 2 {
            return Err(RouteError::InvalidResponse(format!(
                "route geometry has {} point(s)",
                path.len()
            )));
        }
        if !(total_distance_meters >= 0.0 && total_duration_seconds >= 0.0) {
            return Err(RouteError::InvalidResponse(
                "negative route distance or duration".into(),
            ));
        }
        Ok(Self {
            path,
            total_distance_meters,
            total_duration_seconds,
            steps,
        })
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.total_distance_meters
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// South-west and north-east corners enclosing the whole path.
    pub fn bounds(&self) -> (Coordinate, Coordinate) {
        let mut sw = self.path[0];
        let mut ne = self.path[0];
        for point in &self.path[1..] {
            sw.latitude = sw.latitude.min(point.latitude);
            sw.longitude = sw.longitude.min(point.longitude);
            ne.latitude = ne.latitude.max(point.latitude);
            ne.longitude = ne.longitude.max(point.longitude);
        }
        (sw, ne)
    }

    /// Path as a GeoJSON `LineString` in `[lon, lat]` order for the map layer.
    pub fn to_geojson(&self) -> serde_json::Value {
        let coordinates: Vec<[f64; 2]> = self.path.iter().map(Coordinate::lng_lat).collect();
        json!({
            "type": "Feature",
            "properties": {
                "distance": self.total_distance_meters,
                "duration": self.total_duration_seconds,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            }
        })
    }
}
