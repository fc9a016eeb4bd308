//! Stubbed submission handler.
//!
//! Stands in for a real network submission: logs the accepted values,
//! waits a fixed delay, and always resolves. The caller is responsible
//! for only handing over values whose validation report is clean, and for
//! keeping at most one submission in flight (the CLI is sequential, so
//! this holds by construction).

use std::time::Duration;
use tracing::{debug, info};

use crate::models::FormValues;

/// How long the stub pretends the network round trip takes.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2500;

/// Overrides the delay, mainly so tests don't wait 2.5 seconds.
pub const SUBMIT_DELAY_ENV: &str = "DONFORM_SUBMIT_DELAY_MS";

pub struct Submitter {
    delay: Duration,
}

impl Submitter {
    /// Delay from `DONFORM_SUBMIT_DELAY_MS` when set, otherwise the
    /// default 2500 ms.
    pub fn new() -> Self {
        let ms = std::env::var(SUBMIT_DELAY_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SUBMIT_DELAY_MS);
        Self::with_delay(Duration::from_millis(ms))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit a validated form. Never fails; resolves with no payload
    /// once the fixed delay has elapsed.
    pub async fn submit(&self, values: &FormValues) {
        info!(
            full_name = %values.full_name,
            amount = ?values.donations_amount,
            "submitting donation form"
        );
        debug!(delay_ms = self.delay.as_millis() as u64, "submission stub delay");

        tokio::time::sleep(self.delay).await;

        info!("donation form accepted");
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}
