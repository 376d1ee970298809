//! First-valid-URL search over an arithmetic sequence of timestamps.
//!
//! Candidates are generated as `start, start + step, start + 2*step, ...` and
//! probed strictly in that order, one at a time. The first confirmed
//! candidate ends the search; nothing after it is ever probed.
//!
//! # Example
//!
//! ```no_run
//! use stampscan_core::download::HttpClient;
//! use stampscan_core::probe::{HttpProber, UrlTemplate};
//! use stampscan_core::search::{PacingPolicy, SearchParams, TokioSleeper, find_first_valid};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let template = UrlTemplate::new("https://img.example.com/0-{ts}/4.jpg");
//! let prober = HttpProber::new(HttpClient::for_probing()?);
//! let params = SearchParams::new(1_697_712_533_700, 1, 5000);
//! let hit = find_first_valid(&template, &params, &prober, &PacingPolicy::default(), &TokioSleeper).await;
//! if let Some(hit) = hit {
//!     println!("ts={} url={}", hit.timestamp, hit.url);
//! }
//! # Ok(())
//! # }
//! ```

mod pacing;

pub use pacing::{
    DEFAULT_BACKOFF_EVERY, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_BASE_DELAY, DEFAULT_MAX_BACKOFF,
    PacingPolicy, Sleeper, TokioSleeper,
};

use tracing::{debug, info, instrument, warn};

use crate::probe::{Probe, ProbeOutcome, UrlTemplate};

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_TRIES: u64 = 5000;

/// Bounds of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// First candidate timestamp.
    pub start: i64,
    /// Distance between candidates; negative scans downwards.
    pub step: i64,
    /// Maximum number of candidates to probe.
    pub max_tries: u64,
}

impl SearchParams {
    /// Creates search bounds.
    #[must_use]
    pub fn new(start: i64, step: i64, max_tries: u64) -> Self {
        Self {
            start,
            step,
            max_tries,
        }
    }

    /// Timestamp of the `index`-th candidate, or `None` if it overflows `i64`.
    #[must_use]
    pub fn candidate(&self, index: u64) -> Option<i64> {
        i64::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(self.step))
            .and_then(|offset| self.start.checked_add(offset))
    }
}

/// A confirmed candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The rendered URL that was confirmed.
    pub url: String,
    /// The timestamp that produced it.
    pub timestamp: i64,
    /// Zero-based position of the candidate in the sequence.
    pub index: u64,
}

/// Probes candidates in order and returns the first confirmed one.
///
/// Sleeps per `pacing` after every failed candidate, including the last.
/// Returns `None` when `max_tries` candidates fail, when `max_tries` is zero
/// (no request is made), or when the next candidate would overflow `i64`.
#[instrument(skip_all, fields(template = %template.pattern(), start = params.start, step = params.step, max_tries = params.max_tries))]
pub async fn find_first_valid<P, S>(
    template: &UrlTemplate,
    params: &SearchParams,
    prober: &P,
    pacing: &PacingPolicy,
    sleeper: &S,
) -> Option<SearchHit>
where
    P: Probe + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut consecutive_failures: u64 = 0;

    for index in 0..params.max_tries {
        let Some(timestamp) = params.candidate(index) else {
            warn!(index, "candidate timestamp overflows, ending search");
            return None;
        };
        let url = template.render(timestamp);

        match prober.probe(&url).await {
            ProbeOutcome::Confirmed => {
                info!(timestamp, index, url = %url, "found usable image");
                return Some(SearchHit {
                    url,
                    timestamp,
                    index,
                });
            }
            ProbeOutcome::Failed(reason) => {
                debug!(timestamp, index, %reason, "candidate failed");
            }
        }

        consecutive_failures += 1;
        let delay = pacing.delay_after(consecutive_failures);
        if pacing.is_backoff(consecutive_failures) {
            warn!(
                consecutive_failures,
                ?delay,
                "backing off after consecutive failures"
            );
        }
        sleeper.sleep(delay).await;
    }

    info!(tries = params.max_tries, "search space exhausted");
    None
}
