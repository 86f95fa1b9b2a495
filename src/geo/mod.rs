mod coordinate;
mod error;
pub mod format;
pub mod polyline;
mod tile;

pub use coordinate::{haversine_m, Coordinate};
pub use error::{CoordinateError, PolylineError, TileError};
pub use tile::{TileAxisOrder, TileTemplate};
