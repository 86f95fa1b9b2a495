mod camera;
mod error;
mod pipeline;
mod session;
mod state;

pub use camera::CameraCommand;
pub use error::NavigationError;
pub use pipeline::{plan_route, Geocoder, PlannedRoute, RoutePlanner};
pub use session::{NavigationSession, SearchTicket};
pub use state::{transition, NavigationEvent, NavigationSummary, NavigationViewState, Transition};
