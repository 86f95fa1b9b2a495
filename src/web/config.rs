use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::geo::{Coordinate, TileTemplate};
use crate::heading::DEFAULT_INTERVAL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub web: WebConfig,
    pub geocoding: GeocodingConfig,
    pub routing: RoutingConfig,
    pub map: MapConfig,
    pub heading: HeadingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sent as `User-Agent` to the geocoding and routing services.
    pub identifier: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            identifier: "PITBIKE-OS/2.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    pub timeout: Option<Duration>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub endpoint: String,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    pub timeout: Option<Duration>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://router.project-osrm.org/route/v1/driving".to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    /// `"lat,lon"`, used when the device position is unknown.
    pub default_center: String,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}".to_string(),
            attribution: "Tiles © Esri, Source: Esri et al.".to_string(),
            default_center: "37.78825,-122.4324".to_string(),
            default_zoom: 12.0,
        }
    }
}

impl MapConfig {
    pub fn tiles(&self) -> Result<TileTemplate, ConfigError> {
        TileTemplate::parse(&self.tile_url).map_err(|e| ConfigError::Invalid {
            field: "map.tile_url",
            message: e.to_string(),
        })
    }

    pub fn default_center(&self) -> Result<Coordinate, ConfigError> {
        Coordinate::from_coordinates(&self.default_center).map_err(|e| ConfigError::Invalid {
            field: "map.default_center",
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingSource {
    Termux,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    pub source: HeadingSource,
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            source: HeadingSource::Termux,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.map.tiles()?;
        self.map.default_center()?;
        if self.app.identifier.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "app.identifier",
                message: "must not be empty".into(),
            });
        }
        if self.heading.interval.is_zero() {
            return Err(ConfigError::Invalid {
                field: "heading.interval",
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.app.identifier, "PITBIKE-OS/2.0");
        assert_eq!(config.heading.source, HeadingSource::Termux);
        assert_eq!(config.heading.interval, Duration::from_millis(100));
        assert_eq!(config.geocoding.timeout, None);
        assert_eq!(config.map.default_zoom, 12.0);
        assert_eq!(config.map.default_center().unwrap().latitude, 37.78825);
    }

    #[test]
    fn parses_full_file() {
        let yaml = r#"
app:
  identifier: "PITBIKE-OS/2.0 (rider@example.org)"
web:
  bind: "127.0.0.1:9000"
geocoding:
  endpoint: "http://localhost:8088/search"
  timeout: "5s"
routing:
  endpoint: "http://localhost:5000/route/v1/bike"
  timeout: "1m 30s"
map:
  tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png"
  default_center: "52.52,13.405"
  default_zoom: 14
heading:
  source: none
  interval: "250ms"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.geocoding.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.routing.timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.routing.endpoint, "http://localhost:5000/route/v1/bike");
        assert_eq!(config.map.default_zoom, 14.0);
        assert_eq!(config.heading.source, HeadingSource::None);
        assert_eq!(config.heading.interval, Duration::from_millis(250));
        // attribution keeps its default
        assert!(config.map.attribution.contains("Esri"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_yaml("map:\n  tile_url: \"https://example.org/{z}/{x}\"\n"),
            Err(ConfigError::Invalid { field: "map.tile_url", .. })
        ));
        assert!(matches!(
            Config::from_yaml("map:\n  default_center: \"somewhere\"\n"),
            Err(ConfigError::Invalid { field: "map.default_center", .. })
        ));
        assert!(matches!(
            Config::from_yaml("heading:\n  interval: \"0s\"\n"),
            Err(ConfigError::Invalid { field: "heading.interval", .. })
        ));
        assert!(matches!(
            Config::from_yaml("heading:\n  interval: \"soon\"\n"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
