use analytics::{
    DistributionEngine, DistributionResult, ENGINE_VERSION, RegimeDistributionResult,
    StrategyMixExposure, is_compatible, parse_version,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use configuration::{AdapterSettings, LogFormat, init_tracing, load_config_from};
use core_types::{RegimeBucket, RollingWindow, StrategyCategory, TradeRecord};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trade_adapter::{ExternalTrade, TradeAdapter};

/// The main entry point for the riskshape command-line tool.
fn main() -> Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    // Held until exit so the file appender flushes.
    let _guard = init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Distribution(args) => {
            let window = args.window.unwrap_or(settings.defaults.window);
            let trades = load_trades(&args.input, &settings.adapter)?;
            let result = engine(&args).compute_distribution_metrics(&trades, window);
            emit(&result, args.format, render_distribution)
        }
        Commands::Regimes(args) => {
            let window = args.window.unwrap_or(settings.defaults.window);
            let trades = load_trades(&args.input, &settings.adapter)?;
            let result = engine(&args).compute_regime_segmented_metrics(&trades, window);
            emit(&result, args.format, render_regimes)
        }
        Commands::Mix(args) => {
            let window = args.window.unwrap_or(settings.defaults.window);
            let trades = load_trades(&args.input, &settings.adapter)?;
            let result = engine(&args).compute_strategy_mix(&trades, window);
            emit(&result, args.format, render_mix)
        }
        Commands::CheckVersion { version } => handle_check_version(&version),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Return-distribution and risk-structure metrics for a book of closed trades.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured console log format.
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribution metrics, drawdown profile and CII over one rolling window.
    Distribution(AnalyzeArgs),
    /// The same metrics computed independently per volatility regime.
    Regimes(AnalyzeArgs),
    /// Strategy-category mix as a share of trade count.
    Mix(AnalyzeArgs),
    /// Check whether a result version is compatible with this engine.
    CheckVersion {
        /// Version string read from a stored result, e.g. "1.2.0".
        version: String,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// JSON file holding an array of exported trades.
    #[arg(long)]
    input: PathBuf,

    /// Rolling window (7d, 30d, 90d or 180d). Defaults to the configured window.
    #[arg(long)]
    window: Option<RollingWindow>,

    /// Anchor of the window (RFC 3339). Defaults to now.
    #[arg(long)]
    reference_time: Option<DateTime<Utc>>,

    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn engine(args: &AnalyzeArgs) -> DistributionEngine {
    match args.reference_time {
        Some(reference_time) => DistributionEngine::with_reference_time(reference_time),
        None => DistributionEngine::new(),
    }
}

/// Reads the export file and converts it into validated trade records.
fn load_trades(path: &Path, settings: &AdapterSettings) -> Result<Vec<TradeRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trades from {}", path.display()))?;
    let external: Vec<ExternalTrade> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of trades", path.display()))?;

    let adapter = TradeAdapter::new(settings)?;
    let report = adapter.convert(&external)?;
    if !report.skipped.is_empty() {
        warn!(
            skipped = report.skipped.len(),
            total = external.len(),
            "Some trades were not admitted"
        );
    }
    info!(records = report.records.len(), "Trades loaded");
    Ok(report.records)
}

fn emit<T: serde::Serialize>(result: &T, format: OutputFormat, render: fn(&T) -> Table) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => println!("{}", render(result)),
    }
    Ok(())
}

fn handle_check_version(version: &str) -> Result<()> {
    let (major, minor, patch) = parse_version(version)?;
    if is_compatible(version) {
        println!("{major}.{minor}.{patch} is compatible with engine {ENGINE_VERSION}");
        Ok(())
    } else {
        anyhow::bail!("{major}.{minor}.{patch} is not compatible with engine {ENGINE_VERSION}")
    }
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "n/a".to_string(),
    }
}

/// Metric name and value pairs shown for every distribution result.
fn metric_rows(result: &DistributionResult) -> Vec<(&'static str, String)> {
    let drawdown = result.drawdown.as_ref();
    vec![
        ("Trades", result.trade_count.to_string()),
        ("Skew", fmt_metric(result.skew)),
        ("Excess kurtosis", fmt_metric(result.excess_kurtosis)),
        ("LTC", fmt_metric(result.ltc)),
        ("ROCPR", fmt_metric(result.rocpr)),
        ("Avg winner (R)", fmt_metric(result.avg_winner)),
        ("Avg loser (R)", fmt_metric(result.avg_loser)),
        ("Win/loss ratio", fmt_metric(result.win_loss_ratio)),
        ("Profit factor", fmt_metric(result.profit_factor)),
        ("Right-tail contribution", fmt_metric(result.right_tail_contribution)),
        ("Left-tail contribution", fmt_metric(result.left_tail_contribution)),
        ("Tail ratio", fmt_metric(result.tail_ratio)),
        ("Max drawdown (R)", fmt_metric(drawdown.map(|d| d.max_depth))),
        ("Drawdown periods", drawdown.map_or("n/a".to_string(), |d| d.period_count.to_string())),
        ("Drawdown volatility", fmt_metric(drawdown.map(|d| d.volatility))),
        ("CII", fmt_metric(result.cii)),
    ]
}

fn render_distribution(result: &DistributionResult) -> Table {
    let mut table = new_table(vec!["Metric", result.window.as_str()]);
    for (name, value) in metric_rows(result) {
        table.add_row(vec![name.to_string(), value]);
    }
    table
}

fn render_regimes(result: &RegimeDistributionResult) -> Table {
    let mut header = vec!["Metric"];
    header.extend(RegimeBucket::ALL.iter().map(|bucket| bucket.as_str()));
    let mut table = new_table(header);

    let mut group = vec!["Display group".to_string()];
    group.extend(RegimeBucket::ALL.iter().map(|b| b.display().as_str().to_string()));
    table.add_row(group);
    let mut group_trades = vec!["Display-group trades".to_string()];
    group_trades.extend(
        RegimeBucket::ALL
            .iter()
            .map(|b| result.display_trade_count(b.display()).to_string()),
    );
    table.add_row(group_trades);

    let columns: Vec<_> = RegimeBucket::ALL
        .iter()
        .map(|bucket| metric_rows(result.get(*bucket)))
        .collect();
    for (row, (name, _)) in columns[0].iter().enumerate() {
        let mut cells = vec![name.to_string()];
        cells.extend(columns.iter().map(|column| column[row].1.clone()));
        table.add_row(cells);
    }
    table
}

fn render_mix(result: &StrategyMixExposure) -> Table {
    let mut table = new_table(vec!["Strategy", "Share of trades"]);
    for category in StrategyCategory::ALL {
        let weight = if result.trade_count == 0 {
            "n/a".to_string()
        } else {
            format!("{:.2}%", result.mix.weight(category) * 100.0)
        };
        table.add_row(vec![category.as_str().to_string(), weight]);
    }
    table
}
