use serde::Serialize;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use utoipa::ToSchema;

use super::sensor::Magnetometer;

/// 10 Hz.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct HeadingSample {
    /// Whole degrees in `[0, 360)`, clockwise from the sensor's north axis.
    pub bearing_degrees: f64,
}

impl HeadingSample {
    pub fn from_vector(x: f64, y: f64) -> Self {
        Self {
            bearing_degrees: bearing_degrees(x, y),
        }
    }

    /// Rotation that keeps a north indicator fixed while the device turns.
    pub fn indicator_rotation_deg(&self) -> f64 {
        360.0 - self.bearing_degrees
    }
}

/// `atan2(y, x)` in degrees, normalized to `[0, 360)` and rounded.
/// A zero vector has no direction and maps to 0.
pub fn bearing_degrees(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    let mut angle = y.atan2(x).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle.round() % 360.0
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeadingState {
    Disabled { reason: String },
    Active { sample: HeadingSample },
}

impl HeadingState {
    pub fn disabled(reason: impl Into<String>) -> Self {
        HeadingState::Disabled {
            reason: reason.into(),
        }
    }

    pub fn sample(&self) -> Option<HeadingSample> {
        match self {
            HeadingState::Active { sample } => Some(*sample),
            HeadingState::Disabled { .. } => None,
        }
    }
}

pub struct HeadingAdapter<M> {
    sensor: Option<M>,
    interval: Duration,
}

impl<M: Magnetometer> HeadingAdapter<M> {
    pub fn new(sensor: Option<M>, interval: Duration) -> Self {
        Self { sensor, interval }
    }

    /// Start delivering heading updates to `callback` from a background task.
    ///
    /// A missing sensor is reported once as [`HeadingState::Disabled`] and
    /// yields an inert subscription. Must be called inside a tokio runtime.
    pub fn start<F>(self, mut callback: F) -> HeadingSubscription
    where
        F: FnMut(HeadingState) + Send + 'static,
    {
        let Some(sensor) = self.sensor else {
            log::info!("No heading sensor configured, compass disabled");
            callback(HeadingState::disabled("no heading sensor configured"));
            return HeadingSubscription::inert();
        };

        log::info!(
            "Starting heading updates from {} every {:?}",
            sensor.name(),
            self.interval
        );

        let (stop_tx, stop_rx) = oneshot::channel();
        let interval = self.interval;
        let join = tokio::spawn(async move {
            run_heading_loop(sensor, interval, callback, stop_rx).await
        });

        HeadingSubscription {
            stop_tx: Some(stop_tx),
            join: Some(join),
        }
    }
}

async fn run_heading_loop<M, F>(
    mut sensor: M,
    interval: Duration,
    mut callback: F,
    mut stop_rx: oneshot::Receiver<()>,
) where
    M: Magnetometer,
    F: FnMut(HeadingState),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            break;
        }

        // Sensor reads may block on a subprocess.
        let (returned, reading) = match tokio::task::spawn_blocking(move || {
            let reading = sensor.read();
            (sensor, reading)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => {
                log::error!("Heading sensor task failed: {}", e);
                callback(HeadingState::disabled("heading sensor failed"));
                return;
            }
        };
        sensor = returned;

        match reading {
            Ok(raw) => callback(HeadingState::Active {
                sample: HeadingSample::from_vector(raw.x, raw.y),
            }),
            Err(e) if e.is_terminal() => {
                log::warn!("Heading sensor {} disabled: {}", sensor.name(), e);
                callback(HeadingState::disabled(e.to_string()));
                break;
            }
            Err(e) => log::debug!("Skipping heading sample: {}", e),
        }
    }

    log::info!("Heading updates from {} stopped", sensor.name());
}

/// Handle to a running heading stream. Cancelling is idempotent and also
/// happens on drop, so the sensor is released on every exit path.
#[derive(Debug)]
pub struct HeadingSubscription {
    stop_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl HeadingSubscription {
    fn inert() -> Self {
        Self {
            stop_tx: None,
            join: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stop_tx.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    /// Cancel and wait for the sampling task to finish.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                log::error!("Heading task failed: {}", e);
            }
        }
    }
}

impl Drop for HeadingSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
