use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SensorError {
    #[error("sensor not present: {0}")]
    Missing(String),
    #[error("sensor unavailable: {0}")]
    Unavailable(String),
    #[error("sensor permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid sensor reading: {0}")]
    InvalidReading(String),
}

impl SensorError {
    /// Terminal errors disable the heading for the lifetime of the subscription.
    /// A failed read is retried on the next tick.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SensorError::Missing(_) | SensorError::PermissionDenied(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_sensor_or_permission_is_terminal() {
        assert!(SensorError::Missing("termux-sensor".into()).is_terminal());
        assert!(SensorError::PermissionDenied("denied".into()).is_terminal());
        assert!(!SensorError::Unavailable("exit status: 1".into()).is_terminal());
        assert!(!SensorError::InvalidReading("glitch".into()).is_terminal());
    }
}
