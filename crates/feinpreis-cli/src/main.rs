use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use feinpreis_browser::{Browser, BrowserConfig};
use feinpreis_core::{AppConfig, Report};
use feinpreis_scraper::{run_batch, BatchConfig, PacingConfig};

#[derive(Debug, Parser)]
#[command(name = "feinpreis")]
#[command(about = "Scrapes precious-metal buyback prices into a JSON report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the configured targets file
    #[arg(long, global = true)]
    targets: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape all targets and write the price report (the default)
    Scrape {
        /// Override the configured report output path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate the target list and print what would be scraped
    CheckTargets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = feinpreis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let targets_path = cli.targets.unwrap_or_else(|| config.targets_path.clone());

    match cli.command.unwrap_or(Commands::Scrape { out: None }) {
        Commands::Scrape { out } => {
            let report_path = out.unwrap_or_else(|| config.report_path.clone());
            scrape(&config, &targets_path, &report_path).await
        }
        Commands::CheckTargets => check_targets(&targets_path),
    }
}

async fn scrape(config: &AppConfig, targets_path: &Path, report_path: &Path) -> anyhow::Result<()> {
    let targets_file = feinpreis_core::load_targets(targets_path)?;
    tracing::info!(
        targets = targets_file.targets.len(),
        path = %targets_path.display(),
        "target list loaded"
    );

    let browser = Browser::connect(&BrowserConfig {
        webdriver_url: config.webdriver_url.clone(),
        headless: config.headless,
        user_agent: config.user_agent.clone(),
    })
    .await?;
    let page = browser.page();

    let batch_config = BatchConfig {
        source: config.report_source.clone(),
        navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        selector_timeout: Duration::from_millis(config.selector_timeout_ms),
        pacing: PacingConfig::new(config.pacing_base_ms, config.pacing_jitter_ms),
    };

    let report = run_batch(&page, &targets_file.targets, &batch_config).await;

    if let Err(e) = browser.close().await {
        tracing::warn!(error = %e, "browser session did not close cleanly");
    }

    write_report(&report, report_path)?;

    let found = report.items.iter().filter(|r| r.ok).count();
    println!(
        "{found}/{} targets priced — report at {}",
        report.items.len(),
        report_path.display()
    );
    Ok(())
}

/// The report is the run's single artifact, written exactly once at the end.
fn write_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), items = report.items.len(), "report written");
    Ok(())
}

fn check_targets(targets_path: &Path) -> anyhow::Result<()> {
    let targets_file = feinpreis_core::load_targets(targets_path)?;
    println!("{} valid target(s):", targets_file.targets.len());
    for target in &targets_file.targets {
        let metal = target
            .metal
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        let selector = if target.selector.is_some() {
            "selector"
        } else {
            "auto"
        };
        println!("  {:<24} {:<10} {:<8} {}", target.id, metal, selector, target.url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bare_invocation_as_default_scrape() {
        let cli = Cli::parse_from(["feinpreis"]);
        assert!(cli.command.is_none());
        assert!(cli.targets.is_none());
    }

    #[test]
    fn parses_scrape_with_overrides() {
        let cli = Cli::parse_from([
            "feinpreis",
            "scrape",
            "--out",
            "/tmp/report.json",
            "--targets",
            "/tmp/targets.yaml",
        ]);
        assert_eq!(cli.targets, Some(PathBuf::from("/tmp/targets.yaml")));
        match cli.command {
            Some(Commands::Scrape { out }) => {
                assert_eq!(out, Some(PathBuf::from("/tmp/report.json")));
            }
            other => panic!("expected scrape, got {other:?}"),
        }
    }

    #[test]
    fn parses_check_targets() {
        let cli = Cli::parse_from(["feinpreis", "check-targets"]);
        assert!(matches!(cli.command, Some(Commands::CheckTargets)));
    }
}
