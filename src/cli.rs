//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use stampscan_core::download::constants::DEFAULT_OUTPUT_DIR;
use stampscan_core::search::DEFAULT_MAX_TRIES;
use stampscan_core::user_agent::DEFAULT_REFERER;

/// URL scanned when no template is given.
pub const DEFAULT_TEMPLATE: &str = "https://img-preview.51jiaoxi.com/1/3/14914151/0-{ts}/4.jpg?x-oss-process=image/resize,w_794,m_lfit,g_center/format,webp/sharpen,100";

/// First timestamp scanned when `--start` is not given.
pub const DEFAULT_START: i64 = 1_697_712_533_700;

/// Scan a timestamped URL pattern for the first downloadable image.
///
/// Candidates `start, start+step, start+2*step, ...` are substituted for the
/// `{ts}` placeholder and probed one at a time; the first URL that serves an
/// image is downloaded into the output directory.
#[derive(Parser, Debug)]
#[command(name = "stampscan")]
#[command(author, version, about)]
pub struct Args {
    /// URL template; `{ts}` is replaced by each candidate timestamp
    #[arg(default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// First candidate timestamp
    #[arg(short = 's', long, default_value_t = DEFAULT_START, allow_negative_numbers = true)]
    pub start: i64,

    /// Distance between candidates (negative scans downwards)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub step: i64,

    /// Maximum number of candidates to probe (0 probes nothing)
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_TRIES)]
    pub max_tries: u64,

    /// Delay after each failed candidate in milliseconds (every 50th failure backs off)
    #[arg(short = 'd', long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: u64,

    /// Directory to save the image into (created if missing)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Per-request timeout while probing, in seconds (1-300)
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub probe_timeout: u64,

    /// Timeout for the final download, in seconds (1-300)
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub download_timeout: u64,

    /// Referer header sent with every request
    #[arg(long, default_value = DEFAULT_REFERER)]
    pub referer: String,

    /// Skip the lightweight HEAD check and always GET candidates
    #[arg(long)]
    pub no_head: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_match_builtin_scenario() {
        let args = Args::try_parse_from(["stampscan"]).unwrap();
        assert_eq!(args.template, DEFAULT_TEMPLATE);
        assert_eq!(args.start, 1_697_712_533_700);
        assert_eq!(args.step, 1);
        assert_eq!(args.max_tries, DEFAULT_MAX_TRIES);
        assert_eq!(DEFAULT_MAX_TRIES, 5000);
        assert_eq!(args.delay_ms, 100);
        assert_eq!(args.output_dir, PathBuf::from("downloads"));
        assert_eq!(args.probe_timeout, 8);
        assert_eq!(args.download_timeout, 15);
        assert_eq!(args.referer, "https://img-preview.51jiaoxi.com/");
        assert!(!args.no_head);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_template_positional() {
        let args = Args::try_parse_from(["stampscan", "https://example.com/{ts}.png"]).unwrap();
        assert_eq!(args.template, "https://example.com/{ts}.png");
    }

    #[test]
    fn test_cli_negative_step_allowed() {
        let args = Args::try_parse_from(["stampscan", "--step", "-5"]).unwrap();
        assert_eq!(args.step, -5);
    }

    #[test]
    fn test_cli_scan_bounds_flags() {
        let args =
            Args::try_parse_from(["stampscan", "-s", "100", "-n", "0", "-d", "0", "-o", "out"])
                .unwrap();
        assert_eq!(args.start, 100);
        assert_eq!(args.max_tries, 0);
        assert_eq!(args.delay_ms, 0);
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["stampscan", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_no_head_and_quiet() {
        let args = Args::try_parse_from(["stampscan", "--no-head", "-q"]).unwrap();
        assert!(args.no_head);
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_probe_timeout_zero_rejected() {
        let result = Args::try_parse_from(["stampscan", "--probe-timeout", "0"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_delay_over_max_rejected() {
        let result = Args::try_parse_from(["stampscan", "-d", "60001"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["stampscan", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
