pub mod fixed;
pub mod ip;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::Coordinates;

/// Why a position could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    /// The user or the platform refused access to the position.
    PermissionDenied,
    /// No position could be produced (sensor missing, lookup failed, ...).
    SensorUnavailable,
    /// The source did not answer within the acquisition timeout.
    Timeout,
}

impl LocationError {
    /// Short, fixed explanation suitable for showing to the user.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::PermissionDenied => "location denied",
            Self::SensorUnavailable => "location unavailable",
            Self::Timeout => "location timed out",
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for LocationError {}

pub type PositionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Coordinates, LocationError>> + Send + 'a>>;

/// A host facility that can report the device's current position once.
///
/// Implementations classify their own failures into [`LocationError`];
/// transport details never leave the source.
pub trait PositionSource: Send + Sync + 'static {
    /// Request a single current position.
    fn current_position(&self) -> PositionFuture<'_>;
}

/// Progress of a single acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionState {
    NotStarted,
    Pending,
    Succeeded(Coordinates),
    Failed(LocationError),
}

impl AcquisitionState {
    /// Whether the acquisition has reached `Succeeded` or `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// One-shot position acquisition.
///
/// Moves `NotStarted -> Pending -> {Succeeded | Failed}` and stays in the
/// terminal state: calling [`Acquirer::acquire`] again returns the recorded
/// outcome without asking the source a second time. Every view creates its
/// own acquirer.
pub struct Acquirer<'a> {
    source: &'a dyn PositionSource,
    timeout: Option<Duration>,
    state: AcquisitionState,
}

impl<'a> Acquirer<'a> {
    #[must_use]
    pub fn new(source: &'a dyn PositionSource) -> Self {
        Self {
            source,
            timeout: None,
            state: AcquisitionState::NotStarted,
        }
    }

    /// Fail with [`LocationError::Timeout`] when the source takes longer
    /// than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AcquisitionState {
        &self.state
    }

    /// Run the acquisition, or return its outcome if it already ran.
    pub async fn acquire(&mut self) -> AcquisitionState {
        if !matches!(self.state, AcquisitionState::NotStarted) {
            return self.state.clone();
        }
        self.state = AcquisitionState::Pending;

        let source = self.source;
        let result = match self.timeout {
            Some(timeout) => {
                futures_lite::future::or(source.current_position(), async move {
                    async_io::Timer::after(timeout).await;
                    Err(LocationError::Timeout)
                })
                .await
            }
            None => source.current_position().await,
        };

        self.state = match result {
            Ok(coordinates) if coordinates.is_valid() => {
                tracing::info!(%coordinates, "position acquired");
                AcquisitionState::Succeeded(coordinates)
            }
            Ok(coordinates) => {
                tracing::warn!(%coordinates, "position source returned out-of-range coordinates");
                AcquisitionState::Failed(LocationError::SensorUnavailable)
            }
            Err(e) => {
                tracing::warn!(reason = %e, "position acquisition failed");
                AcquisitionState::Failed(e)
            }
        };
        self.state.clone()
    }
}
