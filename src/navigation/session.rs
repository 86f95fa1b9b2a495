use uuid::Uuid;

use super::camera::CameraCommand;
use super::error::NavigationError;
use super::pipeline::PlannedRoute;
use super::state::{transition, NavigationEvent, NavigationViewState};
use crate::geo::Coordinate;
use crate::geocode::GeocodeError;

/// Identifies one in-flight search. Only the most recent ticket may
/// complete; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(Uuid);

/// Owns the navigation view state. Network I/O never happens while a
/// transition is applied: callers take a ticket with [`begin_search`],
/// run [`plan_route`] and hand the result to [`complete_search`].
///
/// [`begin_search`]: NavigationSession::begin_search
/// [`complete_search`]: NavigationSession::complete_search
/// [`plan_route`]: super::plan_route
#[derive(Debug)]
pub struct NavigationSession {
    state: NavigationViewState,
    pending: Option<SearchTicket>,
    /// Camera move issued by a transition whose caller has not received it yet.
    undelivered_camera: Option<CameraCommand>,
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSession {
    pub fn new() -> Self {
        Self {
            state: NavigationViewState::Search,
            pending: None,
            undelivered_camera: None,
        }
    }

    pub fn state(&self) -> &NavigationViewState {
        &self.state
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    fn apply(&mut self, event: NavigationEvent) -> Result<Option<CameraCommand>, NavigationError> {
        let from = self.state.name();
        let next = transition(&self.state, event)?;
        if next.state.name() != from {
            log::info!("Navigation {} -> {}", from, next.state.name());
        }
        self.state = next.state;
        if next.camera.is_some() {
            self.undelivered_camera = None;
        }
        Ok(next.camera)
    }

    /// Take the camera move left behind by a search that ended without a
    /// route, e.g. one started from `Preview` that then failed.
    pub fn take_camera(&mut self) -> Option<CameraCommand> {
        self.undelivered_camera.take()
    }

    /// Start a search, superseding any search still in flight. A camera move
    /// caused by leaving `Preview` is held until the search completes: a found
    /// route replaces it, otherwise [`take_camera`] hands it out.
    ///
    /// [`take_camera`]: NavigationSession::take_camera
    pub fn begin_search(&mut self, query: &str) -> Result<SearchTicket, NavigationError> {
        if query.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery.into());
        }

        if let Some(camera) = self.apply(NavigationEvent::BeginSearch)? {
            self.undelivered_camera = Some(camera);
        }
        if let Some(stale) = self.pending {
            log::info!("Search {:?} superseded", stale.0);
        }
        let ticket = SearchTicket(Uuid::new_v4());
        self.pending = Some(ticket);
        log::info!("Search {:?} started for {:?}", ticket.0, query.trim());
        Ok(ticket)
    }

    /// Apply the outcome of the search identified by `ticket`. Failures leave
    /// the session in `Search` and keep any undelivered camera move.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<PlannedRoute, NavigationError>,
    ) -> Result<Option<CameraCommand>, NavigationError> {
        if self.pending != Some(ticket) {
            log::info!("Discarding result of stale search {:?}", ticket.0);
            return Err(NavigationError::Superseded);
        }
        self.pending = None;

        let planned = result.map_err(|e| {
            log::warn!("Search {:?} failed: {}", ticket.0, e);
            e
        })?;

        log::info!(
            "Search {:?} found a {:.0} m route to {}",
            ticket.0,
            planned.plan.total_distance_meters(),
            planned.destination.label
        );
        self.apply(NavigationEvent::RouteReady {
            plan: planned.plan,
            destination: planned.destination.label,
        })
    }

    /// Leave the preview, or abandon a search that is still running.
    pub fn cancel(&mut self) -> Result<Option<CameraCommand>, NavigationError> {
        if matches!(self.state, NavigationViewState::Search) && self.pending.take().is_some() {
            log::info!("In-flight search cancelled");
            return Ok(self.undelivered_camera.take());
        }
        self.apply(NavigationEvent::Cancel)
    }

    pub fn confirm(&mut self) -> Result<Option<CameraCommand>, NavigationError> {
        self.apply(NavigationEvent::Confirm)
    }

    pub fn stop(&mut self) -> Result<Option<CameraCommand>, NavigationError> {
        self.apply(NavigationEvent::Stop)
    }

    pub fn advance_step(&mut self) -> Result<Option<CameraCommand>, NavigationError> {
        self.apply(NavigationEvent::AdvanceStep)
    }

    pub fn update_position(&mut self, position: Coordinate) -> Result<(), NavigationError> {
        let before = self.state.current_step();
        self.apply(NavigationEvent::PositionUpdate(position))?;
        let after = self.state.current_step();
        if after != before {
            log::info!("Reached step {}", after);
        }
        Ok(())
    }
}
