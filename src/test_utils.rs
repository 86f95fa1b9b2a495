//! Stand-ins for the geocoding and routing services: in-process HTTP
//! fixtures for the clients and in-memory fakes for the navigation layer.

use async_trait::async_trait;
use axum::{
    http::{header, HeaderMap, StatusCode, Uri},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::geo::Coordinate;
use crate::geocode::{GeocodeError, Place};
use crate::navigation::{Geocoder, RoutePlanner};
use crate::routing::{RouteError, RoutePlan};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: String,
    pub user_agent: Option<String>,
}

pub struct Fixture {
    pub url: String,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<RecordedRequest>>>,
}

impl Fixture {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last.lock().unwrap().clone()
    }
}

/// Serve `body` with `status` for every request on a loopback port.
pub async fn fixture(status: StatusCode, body: impl Into<String>) -> Fixture {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));
    let body = body.into();

    let app = {
        let hits = hits.clone();
        let last = last.clone();
        Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let hits = hits.clone();
            let last = last.clone();
            let body = body.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = Some(RecordedRequest {
                    path: uri.path().to_string(),
                    query: uri.query().unwrap_or_default().to_string(),
                    user_agent: headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from),
                });
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        })
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Fixture {
        url: format!("http://{}", addr),
        hits,
        last,
    }
}

pub struct FakeGeocoder {
    result: Option<Place>,
    /// Queries that resolve; every query does when `None`.
    known: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn found() -> Self {
        Self {
            result: Some(Place {
                coordinate: Coordinate::new(52.52, 13.405).unwrap(),
                label: "Berlin".into(),
            }),
            known: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            result: None,
            known: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Resolves only the given queries, all to the same place.
    pub fn knowing(queries: &[&str]) -> Self {
        Self {
            known: Some(queries.iter().map(|q| q.to_string()).collect()),
            ..Self::found()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, query: &str) -> Result<Place, GeocodeError> {
        if query.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(known) = &self.known {
            if !known.iter().any(|k| k == query.trim()) {
                return Err(GeocodeError::NotFound(query.to_string()));
            }
        }
        self.result
            .clone()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }
}

pub struct FakePlanner {
    route: bool,
    calls: AtomicUsize,
}

impl FakePlanner {
    pub fn new(route: bool) -> Self {
        Self {
            route,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutePlanner for FakePlanner {
    async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<RoutePlan, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.route {
            return Err(RouteError::NotFound("NoRoute".into()));
        }
        RoutePlan::new(vec![*origin, *destination], 1200.0, 300.0, Vec::new())
    }
}
