//! Wiring & DI. Entry point: load config, bootstrap adapters, run interactive or headless scan.
//! No business logic here; the scan itself is delegated to ScanService.

use clap::Parser;
use dotenv::dotenv;
use signal_scan::adapters::report::{JsonReport, TerminalReport};
use signal_scan::adapters::ui::tui::TuiInputPort;
use signal_scan::domain::{Competitor, ScanRequest};
use signal_scan::ports::{InputPort, ReportSink};
use signal_scan::shared::bootstrap::build_scan_service;
use signal_scan::shared::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Scan recent competitor news and surface high-attention signals.
#[derive(Debug, Parser)]
#[command(name = "signal-scan", version, about)]
struct Cli {
    /// Competitor to monitor (display name or slug, e.g. "arista-networks").
    /// Runs headless when given.
    #[arg(short, long)]
    competitor: Option<String>,

    /// Number of recent articles to analyze (3-10).
    #[arg(short, long)]
    limit: Option<usize>,

    /// Attention score threshold (50-100, step 5).
    #[arg(short, long)]
    threshold: Option<u8>,

    /// API key for the inference provider. Overrides SIGNAL_SCAN_AI_API_KEY and OPENAI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Generate analyses locally instead of calling a model.
    #[arg(long)]
    demo: bool,

    /// Print the report as JSON instead of formatted text.
    #[arg(long)]
    json: bool,

    /// Never prompt; scan the configured competitor (default Juniper Networks) and exit.
    #[arg(long)]
    no_interactive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cli = Cli::parse();

    let mut cfg = AppConfig::load()?;
    if cli.competitor.is_some() {
        cfg.competitor = cli.competitor.clone();
    }
    if cli.limit.is_some() {
        cfg.article_limit = cli.limit;
    }
    if cli.threshold.is_some() {
        cfg.threshold = cli.threshold;
    }
    if cli.demo {
        cfg.demo = Some(true);
    }
    let settings = cfg.scan_settings()?;

    // Fails with MissingCredential before anything is fetched.
    let scan_service = Arc::new(build_scan_service(&cfg, cli.api_key.as_deref())?);

    let sink: Arc<dyn ReportSink> = if cli.json {
        Arc::new(JsonReport::new())
    } else {
        Arc::new(TerminalReport::new())
    };

    let headless = cli.no_interactive || cli.json || settings.competitor.is_some();
    if headless {
        let request = ScanRequest {
            competitor: settings.competitor.unwrap_or(Competitor::JuniperNetworks),
            article_limit: settings.article_limit,
            threshold: settings.threshold,
        };
        let report = scan_service.run(request).await;
        sink.publish(&report)?;
        return Ok(());
    }

    signal_scan::adapters::ui::init_ui();
    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(scan_service, sink, settings));
    input_port.run().await?;

    Ok(())
}
