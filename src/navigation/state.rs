use serde::Serialize;
use utoipa::ToSchema;

use super::camera::CameraCommand;
use super::error::NavigationError;
use crate::geo::format::{format_distance, format_duration};
use crate::geo::{haversine_m, Coordinate};
use crate::routing::RoutePlan;

/// A position this close to the next maneuver counts as having reached it.
pub const STEP_ARRIVAL_RADIUS_M: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NavigationViewState {
    Search,
    Preview {
        plan: RoutePlan,
        destination: String,
    },
    Navigating {
        plan: RoutePlan,
        destination: String,
        current_step: usize,
    },
}

#[derive(Debug, Clone)]
pub enum NavigationEvent {
    BeginSearch,
    RouteReady { plan: RoutePlan, destination: String },
    Cancel,
    Confirm,
    Stop,
    AdvanceStep,
    PositionUpdate(Coordinate),
}

impl NavigationEvent {
    fn name(&self) -> &'static str {
        match self {
            NavigationEvent::BeginSearch => "search",
            NavigationEvent::RouteReady { .. } => "preview a route",
            NavigationEvent::Cancel => "cancel",
            NavigationEvent::Confirm => "start navigation",
            NavigationEvent::Stop => "stop navigation",
            NavigationEvent::AdvanceStep => "advance a step",
            NavigationEvent::PositionUpdate(_) => "update position",
        }
    }
}

/// Result of applying one event: the next state plus at most one camera move.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: NavigationViewState,
    pub camera: Option<CameraCommand>,
}

impl Transition {
    fn to(state: NavigationViewState, camera: Option<CameraCommand>) -> Self {
        Self { state, camera }
    }
}

impl NavigationViewState {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationViewState::Search => "search",
            NavigationViewState::Preview { .. } => "preview",
            NavigationViewState::Navigating { .. } => "navigating",
        }
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            NavigationViewState::Search => None,
            NavigationViewState::Preview { plan, .. }
            | NavigationViewState::Navigating { plan, .. } => Some(plan),
        }
    }

    pub fn current_step(&self) -> usize {
        match self {
            NavigationViewState::Navigating { current_step, .. } => *current_step,
            _ => 0,
        }
    }

    pub fn summary(&self) -> NavigationSummary {
        let mut summary = NavigationSummary {
            mode: self.name().to_string(),
            destination: None,
            distance: None,
            duration: None,
            instruction: None,
            step_index: 0,
            step_count: 0,
        };

        match self {
            NavigationViewState::Search => {}
            NavigationViewState::Preview { plan, destination } => {
                summary.destination = Some(destination.clone());
                summary.distance = Some(format_distance(plan.total_distance_meters()));
                summary.duration = Some(format_duration(plan.total_duration_seconds()));
                summary.step_count = plan.steps().len();
            }
            NavigationViewState::Navigating {
                plan,
                destination,
                current_step,
            } => {
                let remaining = &plan.steps()[(*current_step).min(plan.steps().len())..];
                summary.destination = Some(destination.clone());
                summary.distance =
                    Some(format_distance(remaining.iter().map(|s| s.distance_meters).sum()));
                summary.duration =
                    Some(format_duration(remaining.iter().map(|s| s.duration_seconds).sum()));
                summary.instruction = remaining.first().map(|s| s.instruction());
                summary.step_index = *current_step;
                summary.step_count = plan.steps().len();
            }
        }

        summary
    }
}

/// Display-ready view of the navigation panel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NavigationSummary {
    pub mode: String,
    pub destination: Option<String>,
    pub distance: Option<String>,
    pub duration: Option<String>,
    pub instruction: Option<String>,
    pub step_index: usize,
    pub step_count: usize,
}

/// Pure state machine: `Search -> Preview -> Navigating -> Search`.
pub fn transition(
    state: &NavigationViewState,
    event: NavigationEvent,
) -> Result<Transition, NavigationError> {
    use NavigationEvent as E;
    use NavigationViewState as S;

    let next = match (state, event) {
        (S::Search, E::BeginSearch) => Transition::to(S::Search, None),
        (S::Preview { .. }, E::BeginSearch) => {
            Transition::to(S::Search, Some(CameraCommand::neutral()))
        }
        (S::Search, E::RouteReady { plan, destination }) => {
            let camera = CameraCommand::fit_route(&plan);
            Transition::to(S::Preview { plan, destination }, Some(camera))
        }
        (S::Preview { .. }, E::Cancel) => Transition::to(S::Search, Some(CameraCommand::neutral())),
        (S::Preview { plan, destination }, E::Confirm) => Transition::to(
            S::Navigating {
                plan: plan.clone(),
                destination: destination.clone(),
                current_step: 0,
            },
            Some(CameraCommand::tracking()),
        ),
        (S::Navigating { .. }, E::Stop) => {
            Transition::to(S::Search, Some(CameraCommand::neutral()))
        }
        (
            S::Navigating {
                plan,
                destination,
                current_step,
            },
            E::AdvanceStep,
        ) => {
            let last = plan.steps().len().saturating_sub(1);
            Transition::to(
                S::Navigating {
                    plan: plan.clone(),
                    destination: destination.clone(),
                    current_step: (*current_step + 1).min(last).max(*current_step),
                },
                None,
            )
        }
        (
            S::Navigating {
                plan,
                destination,
                current_step,
            },
            E::PositionUpdate(position),
        ) => Transition::to(
            S::Navigating {
                plan: plan.clone(),
                destination: destination.clone(),
                current_step: step_for_position(plan, *current_step, &position),
            },
            None,
        ),
        (state, E::PositionUpdate(_)) => Transition::to(state.clone(), None),
        (state, event) => {
            return Err(NavigationError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            })
        }
    };

    Ok(next)
}

/// Advance past every upcoming maneuver the position has reached. Never
/// moves backwards.
fn step_for_position(plan: &RoutePlan, current: usize, position: &Coordinate) -> usize {
    let mut index = current;
    while let Some(next) = plan.steps().get(index + 1) {
        if haversine_m(position, &next.location) > STEP_ARRIVAL_RADIUS_M {
            break;
        }
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{ManeuverType, RouteStep};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn step(kind: ManeuverType, name: &str, location: Coordinate) -> RouteStep {
        RouteStep {
            maneuver_type: kind,
            maneuver_modifier: Some("left".into()),
            street_name: name.into(),
            distance_meters: 500.0,
            duration_seconds: 60.0,
            location,
        }
    }

    fn plan() -> RoutePlan {
        RoutePlan::new(
            vec![coord(52.0, 13.0), coord(52.01, 13.0), coord(52.02, 13.0)],
            1500.0,
            180.0,
            vec![
                step(ManeuverType::Depart, "A Street", coord(52.0, 13.0)),
                step(ManeuverType::Turn, "B Street", coord(52.01, 13.0)),
                step(ManeuverType::Arrive, "", coord(52.02, 13.0)),
            ],
        )
        .unwrap()
    }

    fn preview() -> NavigationViewState {
        NavigationViewState::Preview {
            plan: plan(),
            destination: "Somewhere".into(),
        }
    }

    fn navigating(step: usize) -> NavigationViewState {
        NavigationViewState::Navigating {
            plan: plan(),
            destination: "Somewhere".into(),
            current_step: step,
        }
    }

    #[test]
    fn route_ready_enters_preview_and_frames_route() {
        let t = transition(
            &NavigationViewState::Search,
            NavigationEvent::RouteReady {
                plan: plan(),
                destination: "Somewhere".into(),
            },
        )
        .unwrap();
        assert_eq!(t.state, preview());
        assert!(matches!(t.camera, Some(CameraCommand::FitRoute { .. })));
    }

    #[test]
    fn cancel_discards_preview() {
        let t = transition(&preview(), NavigationEvent::Cancel).unwrap();
        assert_eq!(t.state, NavigationViewState::Search);
        assert_eq!(t.state.plan(), None);
        assert_eq!(t.camera, Some(CameraCommand::neutral()));
    }

    #[test]
    fn confirm_starts_at_first_step_with_tracking_camera() {
        let t = transition(&preview(), NavigationEvent::Confirm).unwrap();
        assert_eq!(t.state, navigating(0));
        assert_eq!(t.camera, Some(CameraCommand::tracking()));
    }

    #[test]
    fn stop_clears_plan_and_progress() {
        let t = transition(&navigating(2), NavigationEvent::Stop).unwrap();
        assert_eq!(t.state, NavigationViewState::Search);
        assert_eq!(t.state.plan(), None);
        assert_eq!(t.state.current_step(), 0);
        assert_eq!(t.camera, Some(CameraCommand::neutral()));
    }

    #[test]
    fn advance_is_monotonic_and_capped() {
        let t = transition(&navigating(0), NavigationEvent::AdvanceStep).unwrap();
        assert_eq!(t.state.current_step(), 1);
        assert_eq!(t.camera, None);

        let t = transition(&navigating(2), NavigationEvent::AdvanceStep).unwrap();
        assert_eq!(t.state.current_step(), 2);
    }

    #[test]
    fn position_near_next_maneuver_advances() {
        // ~5 m from the turn
        let t = transition(
            &navigating(0),
            NavigationEvent::PositionUpdate(coord(52.01004, 13.0)),
        )
        .unwrap();
        assert_eq!(t.state.current_step(), 1);

        // far from everything
        let t = transition(
            &navigating(1),
            NavigationEvent::PositionUpdate(coord(52.5, 13.5)),
        )
        .unwrap();
        assert_eq!(t.state.current_step(), 1);

        // back at the start does not rewind
        let t = transition(
            &navigating(2),
            NavigationEvent::PositionUpdate(coord(52.0, 13.0)),
        )
        .unwrap();
        assert_eq!(t.state.current_step(), 2);
    }

    #[test]
    fn position_updates_outside_navigation_are_ignored() {
        let t = transition(
            &preview(),
            NavigationEvent::PositionUpdate(coord(52.0, 13.0)),
        )
        .unwrap();
        assert_eq!(t.state, preview());
        assert_eq!(t.camera, None);
    }

    #[test]
    fn new_search_from_preview_discards_route() {
        let t = transition(&preview(), NavigationEvent::BeginSearch).unwrap();
        assert_eq!(t.state, NavigationViewState::Search);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        for (state, event) in [
            (NavigationViewState::Search, NavigationEvent::Confirm),
            (NavigationViewState::Search, NavigationEvent::Stop),
            (preview(), NavigationEvent::Stop),
            (navigating(0), NavigationEvent::Cancel),
            (navigating(0), NavigationEvent::BeginSearch),
            (
                navigating(0),
                NavigationEvent::RouteReady {
                    plan: plan(),
                    destination: "x".into(),
                },
            ),
        ] {
            assert!(matches!(
                transition(&state, event),
                Err(NavigationError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn summary_reports_remaining_route() {
        let summary = navigating(1).summary();
        assert_eq!(summary.mode, "navigating");
        assert_eq!(summary.distance.as_deref(), Some("1.0 km"));
        assert_eq!(summary.duration.as_deref(), Some("2 min"));
        assert_eq!(summary.instruction.as_deref(), Some("Turn left onto B Street"));
        assert_eq!(summary.step_index, 1);
        assert_eq!(summary.step_count, 3);

        let summary = preview().summary();
        assert_eq!(summary.distance.as_deref(), Some("1.5 km"));
        assert_eq!(summary.duration.as_deref(), Some("3 min"));
        assert_eq!(summary.instruction, None);

        assert_eq!(NavigationViewState::Search.summary().destination, None);
    }
}
