mod client;
mod error;
mod types;

pub use client::RouteClient;
pub use error::RouteError;
pub use types::{ManeuverType, RoutePlan, RouteStep};
