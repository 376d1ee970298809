//! One complete scan: search for the first usable image, then save it.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::download::{DownloadError, ImageDownloader};
use crate::probe::{Probe, UrlTemplate};
use crate::search::{PacingPolicy, SearchHit, SearchParams, Sleeper, find_first_valid};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// URL pattern with the timestamp placeholder.
    pub template: UrlTemplate,
    /// Candidate range.
    pub search: SearchParams,
    /// Delays between failed candidates.
    pub pacing: PacingPolicy,
    /// Directory that receives the image.
    pub output_dir: PathBuf,
}

/// How a run ended.
#[derive(Debug)]
pub enum ScenarioOutcome {
    /// An image was found and written.
    Saved {
        /// The confirmed candidate.
        hit: SearchHit,
        /// Where the image was written.
        path: PathBuf,
    },
    /// No candidate in range was confirmed.
    NotFound {
        /// Candidates budgeted for the search.
        tries: u64,
    },
    /// A candidate was confirmed but saving it failed.
    DownloadFailed {
        /// The confirmed candidate.
        hit: SearchHit,
        /// Why the save failed.
        error: DownloadError,
    },
}

impl ScenarioOutcome {
    /// Whether an image was saved.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { hit, path } => write!(
                f,
                "Found downloadable image: ts={}\nURL={}\nImage saved to: {}",
                hit.timestamp,
                hit.url,
                path.display()
            ),
            Self::NotFound { tries } => write!(
                f,
                "No downloadable image URL found within {tries} candidates."
            ),
            Self::DownloadFailed { hit, error } => write!(
                f,
                "Found downloadable image: ts={}\nURL={}\nError saving image: {error}",
                hit.timestamp, hit.url
            ),
        }
    }
}

/// Runs the search and, on a hit, saves the image.
///
/// Never fails: search exhaustion and save errors are reported through the
/// returned [`ScenarioOutcome`].
#[instrument(skip_all, fields(template = %scenario.template.pattern()))]
pub async fn run_scenario<P, S>(
    scenario: &Scenario,
    prober: &P,
    sleeper: &S,
    downloader: &ImageDownloader,
) -> ScenarioOutcome
where
    P: Probe + ?Sized,
    S: Sleeper + ?Sized,
{
    if !scenario.template.has_placeholder() {
        warn!("URL template has no timestamp placeholder; every candidate is the same URL");
    }

    let hit = find_first_valid(
        &scenario.template,
        &scenario.search,
        prober,
        &scenario.pacing,
        sleeper,
    )
    .await;

    let Some(hit) = hit else {
        return ScenarioOutcome::NotFound {
            tries: scenario.search.max_tries,
        };
    };

    match downloader.save(&hit.url, &scenario.output_dir).await {
        Ok(path) => {
            info!(path = %path.display(), timestamp = hit.timestamp, "scenario complete");
            ScenarioOutcome::Saved { hit, path }
        }
        Err(e) => {
            error!(error = %e, url = %hit.url, "failed to save confirmed image");
            ScenarioOutcome::DownloadFailed { hit, error: e }
        }
    }
}
