use std::process::Command;

use super::error::SensorError;

/// Raw magnetometer vector in the device frame (µT).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub trait Magnetometer: Send + 'static {
    fn name(&self) -> &str;
    fn read(&mut self) -> Result<MagneticSample, SensorError>;
}

/// Reads the magnetic field sensor through the Termux:API `termux-sensor` command.
pub struct TermuxMagnetometer {
    sensor: String,
}

impl TermuxMagnetometer {
    pub fn new() -> Self {
        Self {
            sensor: "magnetic".to_string(),
        }
    }
}

impl Default for TermuxMagnetometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Magnetometer for TermuxMagnetometer {
    fn name(&self) -> &str {
        "termux-sensor"
    }

    fn read(&mut self) -> Result<MagneticSample, SensorError> {
        let output = Command::new("termux-sensor")
            .arg("-n")
            .arg("1")
            .arg("-s")
            .arg(&self.sensor)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SensorError::Missing(e.to_string()),
                _ => SensorError::Unavailable(e.to_string()),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("permission") {
            return Err(SensorError::PermissionDenied(stderr.trim().to_string()));
        }
        if !output.status.success() {
            return Err(SensorError::Unavailable(format!(
                "termux-sensor exited with {}",
                output.status
            )));
        }

        parse_termux_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `{"<sensor name>": {"values": [x, y, z]}}`.
fn parse_termux_output(text: &str) -> Result<MagneticSample, SensorError> {
    let root: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| SensorError::InvalidReading(e.to_string()))?;

    let sensor = root
        .as_object()
        .and_then(|sensors| sensors.values().next())
        .ok_or_else(|| SensorError::Missing("no magnetic sensor reported".into()))?;

    let values: Vec<f64> = sensor
        .get("values")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(|v| v.as_f64()).collect())
        .unwrap_or_default();

    match values.as_slice() {
        [x, y, z, ..] => Ok(MagneticSample {
            x: *x,
            y: *y,
            z: *z,
        }),
        [x, y] => Ok(MagneticSample { x: *x, y: *y, z: 0.0 }),
        _ => Err(SensorError::InvalidReading(format!(
            "expected 3 values, got {}",
            values.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_termux_sensor_json() {
        let text = r#"{
          "AK09918 Magnetometer": {
            "values": [
              -12.5,
              30.25,
              -41.0
            ]
          }
        }"#;
        let sample = parse_termux_output(text).unwrap();
        assert_eq!(
            sample,
            MagneticSample {
                x: -12.5,
                y: 30.25,
                z: -41.0
            }
        );
    }

    #[test]
    fn empty_object_means_no_sensor() {
        assert!(matches!(
            parse_termux_output("{}"),
            Err(SensorError::Missing(_))
        ));
    }

    #[test]
    fn garbage_is_an_invalid_reading() {
        assert!(matches!(
            parse_termux_output("not json"),
            Err(SensorError::InvalidReading(_))
        ));
        assert!(matches!(
            parse_termux_output(r#"{"mag": {"values": [1.0]}}"#),
            Err(SensorError::InvalidReading(_))
        ));
    }
}
