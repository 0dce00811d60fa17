// src/checker/verify.rs
// =============================================================================
// Deduplicated, bounded-concurrency verification.
//
// This module owns the central correctness property of the tool: every
// distinct external URL is checked AT MOST ONCE per run, however many
// occurrences reference it. Occurrences collapse into a sorted set of
// unique URLs up front; results fan back out through the URL ->
// CheckResult map in the report.
//
// Skip mode returns before a client even exists, so "no network call"
// holds by construction. The optional run budget bounds the whole stage:
// at the deadline, in-flight checks are abandoned and every unresolved
// URL is finalized as timed out. The map is total either way.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};

use futures::stream::{self, StreamExt};

use crate::checker::http;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::report::{CheckResult, CheckStatus, FailureKind, LinkOccurrence};

/// Verifies every distinct external HTTP URL referenced by `occurrences`.
/// The returned map holds exactly one entry per such URL, whatever the
/// outcome and however the run ends.
pub async fn verify(
    occurrences: &[LinkOccurrence],
    config: &ScanConfig,
) -> Result<BTreeMap<String, CheckResult>, ScanError> {
    let unique: BTreeSet<String> = occurrences
        .iter()
        .filter(|occurrence| occurrence.is_checkable())
        .map(|occurrence| occurrence.raw_url.clone())
        .collect();

    if !config.check_enabled {
        // Extract-only mode: identical report shape, zero network activity.
        return Ok(unique
            .into_iter()
            .map(|url| {
                let result = CheckResult {
                    url: url.clone(),
                    status: CheckStatus::Skipped,
                };
                (url, result)
            })
            .collect());
    }
    if unique.is_empty() {
        return Ok(BTreeMap::new());
    }

    let client = http::build_client(config)?;
    let urls: Vec<String> = unique.into_iter().collect();
    tracing::info!(unique_urls = urls.len(), "verifying external links");

    let mut checks = stream::iter(urls.clone())
        .map(|url| {
            let client = client.clone();
            async move { http::check_url(client, url).await }
        })
        .buffer_unordered(config.concurrency.max(1));

    let mut results = BTreeMap::new();
    match config.run_budget {
        None => {
            while let Some(result) = checks.next().await {
                results.insert(result.url.clone(), result);
            }
        }
        Some(budget) => {
            let deadline = tokio::time::Instant::now() + budget;
            // Ok(None) means the stream ran dry; Err means the budget did.
            while let Ok(Some(result)) = tokio::time::timeout_at(deadline, checks.next()).await {
                results.insert(result.url.clone(), result);
            }
        }
    }

    // Whatever the budget cut off is still reported, as timed out.
    for url in urls {
        results.entry(url.clone()).or_insert_with(|| CheckResult {
            url,
            status: CheckStatus::Error(FailureKind::Timeout),
        });
    }

    Ok(results)
}
