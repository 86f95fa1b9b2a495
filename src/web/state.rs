use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

use crate::geo::{Coordinate, TileTemplate};
use crate::heading::HeadingState;
use crate::navigation::{Geocoder, NavigationSession, RoutePlanner};

use super::config::{Config, ConfigError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tiles: Arc<TileTemplate>,
    pub geocoder: Arc<dyn Geocoder>,
    pub planner: Arc<dyn RoutePlanner>,
    pub session: Arc<Mutex<NavigationSession>>,
    heading: Arc<RwLock<HeadingState>>,
    location: Arc<RwLock<Option<Coordinate>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        geocoder: Arc<dyn Geocoder>,
        planner: Arc<dyn RoutePlanner>,
    ) -> Result<Self, ConfigError> {
        let tiles = config.map.tiles()?;
        Ok(Self {
            config: Arc::new(config),
            tiles: Arc::new(tiles),
            geocoder,
            planner,
            session: Arc::new(Mutex::new(NavigationSession::new())),
            heading: Arc::new(RwLock::new(HeadingState::disabled("waiting for sensor"))),
            location: Arc::new(RwLock::new(None)),
        })
    }

    pub fn heading(&self) -> HeadingState {
        self.heading
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns a sink suitable for [`HeadingAdapter::start`].
    ///
    /// [`HeadingAdapter::start`]: crate::heading::HeadingAdapter::start
    pub fn heading_sink(&self) -> impl FnMut(HeadingState) + Send + 'static {
        let heading = self.heading.clone();
        move |next| {
            if let HeadingState::Disabled { reason } = &next {
                log::warn!("Heading unavailable: {}", reason);
            }
            *heading.write().unwrap_or_else(PoisonError::into_inner) = next;
        }
    }

    pub fn location(&self) -> Option<Coordinate> {
        *self.location.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_location(&self, position: Coordinate) {
        *self.location.write().unwrap_or_else(PoisonError::into_inner) = Some(position);
    }
}
