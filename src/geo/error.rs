use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("latitude out of range: {0}")]
    Latitude(f64),
    #[error("longitude out of range: {0}")]
    Longitude(f64),
    #[error("invalid coordinate string: {0}")]
    Format(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PolylineError {
    #[error("invalid character {0:?} at offset {1}")]
    InvalidCharacter(char, usize),
    #[error("truncated value at offset {0}")]
    Truncated(usize),
    #[error("decoded point {index} is out of range: {source}")]
    OutOfRange {
        index: usize,
        source: CoordinateError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum TileError {
    #[error("tile template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("tile {x}/{y} does not exist at zoom {z}")]
    OutOfRange { z: u8, x: u32, y: u32 },
}
