//! Pacing between failed candidates.
//!
//! After every failed candidate the search sleeps for [`PacingPolicy::base_delay`];
//! on every `backoff_every`-th consecutive failure it sleeps for the longer
//! backoff delay instead, to stay under server-side rate limits.

use std::time::Duration;

use async_trait::async_trait;

/// Default base delay between candidates (150ms).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(150);

/// Default number of consecutive failures between backoff sleeps.
pub const DEFAULT_BACKOFF_EVERY: u64 = 50;

/// Default backoff multiplier applied to the base delay.
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 10;

/// Default cap on a backoff sleep (2 seconds).
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Delay schedule applied between failed candidates.
///
/// # Delay Calculation
///
/// ```text
/// failures % backoff_every == 0  =>  min(base_delay * backoff_multiplier, max_backoff)
/// otherwise                      =>  base_delay
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingPolicy {
    base_delay: Duration,
    backoff_every: u64,
    backoff_multiplier: u32,
    max_backoff: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            backoff_every: DEFAULT_BACKOFF_EVERY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl PacingPolicy {
    /// Creates a policy with custom settings.
    ///
    /// A `backoff_every` of zero is raised to one (backoff after every failure).
    #[must_use]
    pub fn new(
        base_delay: Duration,
        backoff_every: u64,
        backoff_multiplier: u32,
        max_backoff: Duration,
    ) -> Self {
        Self {
            base_delay,
            backoff_every: backoff_every.max(1),
            backoff_multiplier,
            max_backoff,
        }
    }

    /// Creates a policy with a custom base delay, using defaults for other settings.
    #[must_use]
    pub fn with_base_delay(base_delay: Duration) -> Self {
        Self {
            base_delay,
            ..Self::default()
        }
    }

    /// Policy that never sleeps.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, DEFAULT_BACKOFF_EVERY, 0, Duration::ZERO)
    }

    /// Base delay after an ordinary failure.
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Sleep length after the `consecutive_failures`-th failure (1-indexed).
    #[must_use]
    pub fn delay_after(&self, consecutive_failures: u64) -> Duration {
        if self.is_backoff(consecutive_failures) {
            self.backoff_delay()
        } else {
            self.base_delay
        }
    }

    /// Whether the `consecutive_failures`-th failure triggers a backoff.
    #[must_use]
    pub fn is_backoff(&self, consecutive_failures: u64) -> bool {
        consecutive_failures > 0 && consecutive_failures % self.backoff_every == 0
    }

    fn backoff_delay(&self) -> Duration {
        self.base_delay
            .saturating_mul(self.backoff_multiplier)
            .min(self.max_backoff)
    }
}

/// Suspends the search between candidates.
///
/// Production code sleeps on the tokio timer; tests substitute an
/// implementation that records durations and returns immediately.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
