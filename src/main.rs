// src/main.rs
// =============================================================================
// Binary entry point: parse flags, run the pipeline, render the report,
// map the outcome to an exit code.
//
// Exit codes:
//   0 = every checked link resolved (skipped links do not count against)
//   1 = broken or unverifiable links remain
//   2 = the run could not start (configuration or internal failure)
//
// Diagnostics go to stderr via tracing; the report itself goes to stdout,
// so JSON output stays pipeable.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdlinkcheck::{run_scan, CheckStatus, LinkTarget, RunReport};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let args = cli::Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json = args.json;
    let verbose = args.verbose;
    let config = args.into_config();

    let report = run_scan(&config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, verbose);
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_report(report: &RunReport, verbose: bool) {
    println!(
        "🔍 Scanned {} file(s): {} link(s), {} unique external URL(s)",
        report.summary.files_scanned, report.summary.total_links, report.summary.unique_urls
    );

    if verbose {
        for file in &report.files {
            println!("\n📄 {}", file.path.display());
            if file.occurrences.is_empty() {
                println!("   (no links)");
            }
            for occurrence in &file.occurrences {
                let verdict = match report.result_for(occurrence) {
                    Some(result) => format_status(&result.status),
                    None => format!("➖ {}", target_label(occurrence.target)),
                };
                println!(
                    "   {:>4}  {:<24} {}",
                    occurrence.line_number, verdict, occurrence.raw_url
                );
            }
        }
    }

    // The remediation list: one File/Line/URL/Detail block per finding.
    let findings = report.findings();
    if !findings.is_empty() {
        println!("\n❌ Found {} problem link(s):\n", findings.len());
        for (occurrence, result) in &findings {
            println!("  File:   {}", occurrence.source_file.display());
            println!("  Line:   {}", occurrence.line_number);
            println!("  URL:    {}", occurrence.raw_url);
            println!("  Detail: {}", result.status);
            println!();
        }
    }

    if !report.file_errors.is_empty() {
        println!("⚠️  {} file(s) could not be scanned:", report.file_errors.len());
        for error in &report.file_errors {
            println!("   {error}");
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   ✅ OK: {}", report.summary.ok);
    println!("   ❌ Broken: {}", report.summary.broken);
    println!("   ⚠️  Unverifiable: {}", report.summary.errors);
    println!("   ⏭️  Skipped: {}", report.summary.skipped);

    if report.is_success() {
        println!("\n✓ All links are working!");
    }
}

fn format_status(status: &CheckStatus) -> String {
    match status {
        CheckStatus::Ok(code) => format!("✅ HTTP {code}"),
        CheckStatus::Broken(kind) => format!("❌ {kind}"),
        CheckStatus::Skipped => "⏭️  skipped".to_string(),
        CheckStatus::Error(kind) => format!("⚠️  {kind}"),
    }
}

fn target_label(target: LinkTarget) -> &'static str {
    match target {
        LinkTarget::ExternalHttp => "not checked",
        LinkTarget::ExternalOtherScheme => "other scheme, not checked",
        LinkTarget::LocalRelative => "local path, not checked",
        LinkTarget::AnchorOnly => "anchor, not checked",
    }
}
