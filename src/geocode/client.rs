use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use super::error::GeocodeError;
use crate::geo::Coordinate;

/// A resolved destination.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Place {
    pub coordinate: Coordinate,
    pub label: String,
}

/// One element of the text-search response array.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Client for a Nominatim-compatible `/search` endpoint.
///
/// Does not retry; a failed lookup is reported once and the caller decides
/// whether to resubmit.
pub struct GeocodeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeocodeClient {
    /// `identifier` is sent as the `User-Agent`, which the public Nominatim
    /// usage policy requires to be specific to the application.
    pub fn new(
        endpoint: &str,
        identifier: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, GeocodeError> {
        let mut builder = reqwest::Client::builder().user_agent(identifier);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub async fn resolve(&self, query: &str) -> Result<Place, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        log::debug!("Geocoding {:?}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Network(format!("HTTP {}", status.as_u16())));
        }

        let candidates: Vec<Candidate> = response.json().await?;
        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| GeocodeError::InvalidResponse(format!("bad coordinate {:?}", value)))
        };
        let coordinate = Coordinate::new(parse(&first.lat)?, parse(&first.lon)?)
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        Ok(Place {
            coordinate,
            label: first.display_name.unwrap_or_else(|| query.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture;
    use approx::assert_relative_eq;
    use axum::http::StatusCode;

    const IDENT: &str = "PITBIKE-OS/test";

    fn client(url: &str) -> GeocodeClient {
        GeocodeClient::new(&format!("{}/search", url), IDENT, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn empty_query_never_hits_the_network() {
        let server = fixture(StatusCode::OK, "[]").await;
        let geocoder = client(&server.url);

        assert!(matches!(geocoder.resolve("").await, Err(GeocodeError::EmptyQuery)));
        assert!(matches!(geocoder.resolve("   ").await, Err(GeocodeError::EmptyQuery)));
        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let server = fixture(StatusCode::OK, "[]").await;
        let err = client(&server.url).resolve("atlantis").await.unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound(q) if q == "atlantis"));
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn resolves_first_candidate() {
        let body = r#"[
            {
                "lat": "52.5170365", "lon": "13.3888599",
                "display_name": "Berlin, Deutschland", "importance": 0.9
            },
            {"lat": "0", "lon": "0", "display_name": "Elsewhere"}
        ]"#;
        let server = fixture(StatusCode::OK, body).await;

        let place = client(&server.url).resolve("Berlin").await.unwrap();
        assert_relative_eq!(place.coordinate.latitude, 52.5170365);
        assert_relative_eq!(place.coordinate.longitude, 13.3888599);
        assert_eq!(place.label, "Berlin, Deutschland");

        let request = server.last_request().unwrap();
        assert_eq!(request.path, "/search");
        assert_eq!(request.query, "q=Berlin&format=json&limit=1");
        assert_eq!(request.user_agent.as_deref(), Some(IDENT));
    }

    #[tokio::test]
    async fn query_is_url_encoded() {
        let server = fixture(StatusCode::OK, r#"[{"lat": "1.5", "lon": "2.5"}]"#).await;
        let place = client(&server.url).resolve("Main St & 5th").await.unwrap();
        assert_eq!(place.label, "Main St & 5th");

        let request = server.last_request().unwrap();
        assert!(request.query.starts_with("q=Main+St+%26+5th&"));
    }

    #[tokio::test]
    async fn error_status_is_network_error() {
        let server = fixture(StatusCode::SERVICE_UNAVAILABLE, "busy").await;
        let err = client(&server.url).resolve("Berlin").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Network(msg) if msg == "HTTP 503"));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let geocoder = client("http://127.0.0.1:9");
        assert!(matches!(
            geocoder.resolve("Berlin").await,
            Err(GeocodeError::Network(_))
        ));
    }

    #[tokio::test]
    async fn unparseable_coordinates_are_rejected() {
        let server = fixture(StatusCode::OK, r#"[{"lat": "north", "lon": "2.5"}]"#).await;
        assert!(matches!(
            client(&server.url).resolve("x").await,
            Err(GeocodeError::InvalidResponse(_))
        ));
    }
}
