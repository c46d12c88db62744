//! Artificial delay standing in for a network round trip.
//!
//! Auth calls pause for a fixed interval so the UI can show its loading
//! state. The delay has no effect on the outcome.

use std::time::Duration;

/// Fixed delay applied before mock auth calls complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    /// No delay, for tests and scripted use.
    pub const NONE: Self = Self(Duration::ZERO);

    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    #[must_use]
    pub const fn delay(self) -> Duration {
        self.0
    }

    /// Sleep for the configured delay.
    pub async fn pause(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
