// src/cli.rs
// =============================================================================
// The command-line surface, kept deliberately thin: this file only maps
// flags onto a ScanConfig. The engine itself never sees a flag.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use mdlinkcheck::config::{
    InputSet, ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "mdlinkcheck",
    version,
    about = "Extract links from markdown files and verify that external URLs resolve",
    long_about = "mdlinkcheck scans markdown files, extracts every link occurrence (inline, \
                  autolink, reference definition, image, bare URL in prose), and checks each \
                  unique external HTTP(S) URL exactly once. Exit code 0 means every checked \
                  link resolved, 1 means broken or unverifiable links remain, 2 means the run \
                  could not start at all."
)]
pub struct Cli {
    /// Markdown files to check. Leave empty and pass --recursive to
    /// discover .md files under --root instead.
    pub files: Vec<PathBuf>,

    /// Recursively discover markdown files under --root.
    #[arg(short, long)]
    pub recursive: bool,

    /// Root directory for the recursive scan.
    #[arg(long, default_value = ".", requires = "recursive")]
    pub root: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// How many checks may be in flight at once.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Redirect hops to follow before a chain counts as broken.
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Wall-clock budget in seconds for the whole verification stage.
    /// Checks still pending at the deadline are reported as timed out.
    #[arg(long, value_name = "SECS")]
    pub run_timeout: Option<u64>,

    /// Extract links only; report every external URL as skipped.
    #[arg(long)]
    pub skip_check: bool,

    /// Do not scan prose for bare URLs outside markdown link syntax.
    #[arg(long)]
    pub no_raw_urls: bool,

    /// Show every link, not only the broken ones.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit the full report as pretty-printed JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the engine configuration. Explicit paths win; otherwise
    /// --recursive walks --root; otherwise the empty input set is handed
    /// to the resolver, which rejects it.
    pub fn into_config(self) -> ScanConfig {
        let inputs = if !self.files.is_empty() {
            InputSet::Explicit(self.files)
        } else if self.recursive {
            InputSet::Recursive(self.root)
        } else {
            InputSet::Explicit(Vec::new())
        };

        let mut config = ScanConfig::new(inputs);
        config.timeout = Duration::from_secs(self.timeout);
        config.check_enabled = !self.skip_check;
        config.detect_raw_urls = !self.no_raw_urls;
        config.concurrency = self.concurrency;
        config.max_redirects = self.max_redirects;
        config.run_budget = self.run_timeout.map(Duration::from_secs);
        config
    }
}
