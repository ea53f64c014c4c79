// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Fetch the page (fatal if that fails)
// 3. Analyse it: version, title, headings, links
// 4. Classify the links and probe all of them concurrently
// 5. Print the report and exit with a proper code
//    (0 = all links reachable, 1 = unreachable links or incomplete check,
//     2 = error)
// =============================================================================

mod analyzer; // src/analyzer/ - version, title, headings, links, classification
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - tunables for one run
mod error; // src/error.rs - fatal errors
mod fetch; // src/fetch.rs - downloading the page
mod health; // src/health/ - concurrent link probing
mod report; // src/report.rs - the final record

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use analyzer::{analyze_document, classify_links, ExtractOptions};
use cli::Cli;
use config::InspectorConfig;
use health::{HealthChecker, HttpProber};
use report::Report;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays parseable
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,page_inspector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = every link reachable
//   Ok(1) = unreachable links found, or the check was cut short
//   Err   = the page could not be analysed at all
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = InspectorConfig::from(&cli);

    let report = inspect(&cli.url, &config).await?;
    print_results(&report, cli.json)?;

    Ok(if report.is_healthy() { 0 } else { 1 })
}

// Runs one full analysis of `url`
async fn inspect(url: &str, config: &InspectorConfig) -> Result<Report> {
    let base = fetch::parse_base_url(url)?;

    let client = fetch::build_client(config)?;
    let body = fetch::fetch_document(&client, url).await?;

    let analysis = analyze_document(
        &body,
        ExtractOptions {
            skip_empty_links: config.skip_empty_links,
        },
    );
    info!(
        title = %analysis.title,
        version = analysis.version.as_deref().unwrap_or("none detected"),
        links = analysis.links.len(),
        "page analysed"
    );

    let classification = classify_links(url, &analysis.links, &config.login_keywords);

    // Ctrl-C stops the health check but still prints what we have
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping link checks");
            on_interrupt.cancel();
        }
    });

    let checker = HealthChecker::new(HttpProber::new(base, config)?, config);
    let health = checker.check_until_cancelled(&analysis.links, cancel).await;
    interrupt.abort();

    Ok(Report::assemble(url, analysis, classification, health))
}

fn print_results(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints the report in a human-readable layout
fn print_table(report: &Report) {
    println!("🔍 {}", report.url);
    println!("{}", "=".repeat(80));
    println!("{:<20} {}", "Version", report.version.as_deref().unwrap_or("none detected"));
    println!("{:<20} {}", "Title", report.title.trim());

    let headings = report
        .headings
        .iter()
        .map(|(tag, count)| format!("{}: {}", tag, count))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{:<20} {} (total {})", "Headings", headings, report.headings.total());
    println!();

    let classification = &report.classification;
    println!(
        "🔗 Found {} internal link(s) and {} external",
        classification.internal.len(),
        classification.external.len()
    );
    if classification.login_candidates.is_empty() {
        println!("🔑 No login found");
    } else {
        println!("🔑 Found {} login link(s):", classification.login_candidates.len());
        for link in &classification.login_candidates {
            println!("   {}", link);
        }
    }
    println!();

    let health = &report.health;
    if !health.unreachable.is_empty() || !health.not_probed.is_empty() {
        println!("{:<60} {:<15}", "URL", "STATUS");
        println!("{}", "=".repeat(80));
        for link in &health.unreachable {
            println!("{:<60} {:<15}", truncate(link, 57), "❌ UNREACHABLE");
        }
        for link in &health.not_probed {
            println!("{:<60} {:<15}", truncate(link, 57), "⏸️  NOT PROBED");
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   ✅ Reachable: {}", health.reachable.len());
    println!("   ❌ Unreachable: {}", report.unreachable_count());
    if health.incomplete {
        println!(
            "   ⏸️  Not probed: {} (check incomplete, {} of {} links probed)",
            health.not_probed.len(),
            health.completed,
            health.expected
        );
    }
    println!("   📋 Total: {}", report.links.len());
}

// Truncates long URLs for display
fn truncate(url: &str, max: usize) -> String {
    if url.chars().count() > max {
        format!("{}...", url.chars().take(max).collect::<String>())
    } else {
        url.to_string()
    }
}
