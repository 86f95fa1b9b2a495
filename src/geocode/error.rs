use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("no match for {0:?}")]
    NotFound(String),
    #[error("geocoding service unreachable: {0}")]
    Network(String),
    #[error("unexpected geocoding response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GeocodeError::InvalidResponse(err.to_string())
        } else {
            GeocodeError::Network(err.to_string())
        }
    }
}
