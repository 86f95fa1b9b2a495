mod client;
mod error;

pub use client::{GeocodeClient, Place};
pub use error::GeocodeError;
