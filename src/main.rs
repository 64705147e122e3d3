//! NIFTY Regimes - Index History Analysis
//!
//! Fetches the full NIFTY 50 history, writes the volatility / 5-year return /
//! bull-bear regime summary to `Output_Summary.txt` and echoes it.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use nifty_regimes::adapters::{cli, CsvHistoryProvider, YahooHistoryProvider};
use nifty_regimes::analysis::AnalysisParams;
use nifty_regimes::application::{AnalysisOrchestrator, AnalysisOutcome};
use nifty_regimes::config::{load_config, Config, ProviderKind};
use nifty_regimes::ports::HistoryProvider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let app = cli::init();

    let mut config = match &app.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_cli(&app);
    config.validate().context("Invalid configuration")?;

    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match config.provider.kind {
        ProviderKind::Yahoo => {
            let provider = YahooHistoryProvider::with_config(config.provider.yahoo_config())
                .context("Failed to create Yahoo Finance client")?;
            run(provider, &config).await
        }
        ProviderKind::Csv => {
            let path = config
                .provider
                .get_csv_path()
                .context("csv_path is required for the csv provider")?;
            run(CsvHistoryProvider::new(path), &config).await
        }
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config_level))
            .context("Invalid logging level")?
    };

    // stderr keeps the echoed report on stdout clean
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

async fn run<P: HistoryProvider>(provider: P, config: &Config) -> Result<()> {
    let orchestrator = AnalysisOrchestrator::new(
        provider,
        AnalysisParams::from(config),
        config.instrument.symbol.clone(),
        config.instrument.name.clone(),
        config.output.get_report_path(),
    )
    .context("Failed to create orchestrator")?;

    tracing::info!(
        threshold = orchestrator.params().regime_threshold,
        report = %orchestrator.report_path().display(),
        "Starting analysis"
    );
    println!("Fetching {} data...", config.instrument.name);

    let as_of = chrono::Local::now().date_naive();
    let outcome = orchestrator
        .run(as_of)
        .await
        .context("Analysis run failed")?;

    match outcome {
        Some(outcome) => print_outcome(&outcome),
        None => tracing::warn!("No history available for {}", config.instrument.symbol),
    }
    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    println!(
        "\nAnalysis complete. Results written to {}",
        outcome.report_path.display()
    );
    println!("{}", "-".repeat(30));
    println!("{}", outcome.report);
}
