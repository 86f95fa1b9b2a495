mod adapter;
mod error;
mod sensor;

pub use adapter::{
    bearing_degrees, HeadingAdapter, HeadingSample, HeadingState, HeadingSubscription,
    DEFAULT_INTERVAL,
};
pub use error::SensorError;
pub use sensor::{MagneticSample, Magnetometer, TermuxMagnetometer};
