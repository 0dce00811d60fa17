// src/config.rs
// =============================================================================
// Run configuration for the scan engine.
//
// The engine does not parse flags or read the environment; it consumes a
// ready-made ScanConfig. The CLI (src/cli.rs) is the collaborator that
// builds one. Every invocation is stateless: nothing here persists or is
// shared between runs.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound on in-flight network checks. Unbounded concurrency is not
/// an option: it overwhelms remote hosts and local sockets alike.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Redirect hops to follow before a chain counts as broken.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// User-Agent header sent with every check. Some hosts answer bare
/// clients with 403, so this mimics a browser-compatible checker.
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; mdlinkcheck/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Which markdown files a run should scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSet {
    /// An explicit, caller-supplied list of file paths.
    Explicit(Vec<PathBuf>),
    /// Recursively discover `.md` files under this root directory.
    Recursive(PathBuf),
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub inputs: InputSet,
    /// Timeout applied to each individual request.
    pub timeout: Duration,
    /// When false ("extract only" mode), every external URL is reported
    /// as skipped and no network call is made.
    pub check_enabled: bool,
    /// Best-effort detection of bare URLs in prose, outside markdown
    /// link syntax.
    pub detect_raw_urls: bool,
    /// Size of the bounded pool of concurrent checks.
    pub concurrency: usize,
    /// Redirect hops to follow before classifying the chain as broken.
    pub max_redirects: usize,
    /// Optional wall-clock budget for the whole verification stage.
    /// When it expires, in-flight checks are abandoned and unresolved
    /// URLs are finalized as timed out, so the report stays complete.
    pub run_budget: Option<Duration>,
}

impl ScanConfig {
    /// A configuration with the default knobs for the given input set.
    pub fn new(inputs: InputSet) -> Self {
        Self {
            inputs,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            check_enabled: true,
            detect_raw_urls: true,
            concurrency: DEFAULT_CONCURRENCY,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            run_budget: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_documented_knobs() {
        let config = ScanConfig::new(InputSet::Explicit(vec![PathBuf::from("README.md")]));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.check_enabled);
        assert!(config.detect_raw_urls);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.run_budget, None);
    }

    #[test]
    fn test_user_agent_carries_the_crate_version() {
        assert!(USER_AGENT.starts_with("Mozilla/5.0 (compatible; mdlinkcheck/"));
        assert!(USER_AGENT.ends_with(')'));
    }
}
