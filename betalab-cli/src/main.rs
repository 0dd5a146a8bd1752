//! betalab CLI — CAPM alpha/beta of a ticker against the market index.
//!
//! Commands:
//! - `analyze` — load (or fetch) ticker and index prices, fit the regression, print the summary
//! - `fetch` — warm the cache for one or more symbols
//! - `cache status` — list cached series with row counts and date ranges

use anyhow::{Context, Result};
use betalab_core::analysis::StockAnalyzer;
use betalab_core::chart::{render_all, JsonChartWriter};
use betalab_core::config::{AnalyzerConfig, LogConfig};
use betalab_core::data::{DataCache, YahooProvider};
use betalab_core::domain::ReturnSeries;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "betalab",
    about = "betalab CLI — daily returns and CAPM alpha/beta against the S&P 500"
)]
struct Cli {
    /// TOML config file. Every setting has a default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cache directory (overrides the config's data_dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FetchArgs {
    /// Start date (YYYY-MM-DD). Defaults to 252 business days ago.
    #[arg(long)]
    start: Option<String>,

    /// Fetch even if a cache entry exists, overwriting it.
    #[arg(long, default_value_t = false)]
    refresh: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit asset returns on index returns and print alpha, beta and the fit summary.
    Analyze {
        /// Ticker symbol (e.g., TSLA).
        ticker: String,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Restrict both series to their shared trading days before fitting.
        #[arg(long, default_value_t = false)]
        intersect: bool,

        /// Write chart data (JSON) for returns, candles, moving averages and the fit.
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Number of leading returns to print for each series.
        #[arg(long, default_value_t = 5)]
        head: usize,
    },
    /// Fetch series into the cache. Use the index key (default `sp500`) for the index.
    Fetch {
        /// Symbols to fetch (e.g., TSLA AAPL sp500).
        #[arg(required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// List cached series with row counts, date ranges and file sizes.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    init_logging(&config.log)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Analyze {
            ticker,
            fetch,
            intersect,
            charts_dir,
            head,
        } => run_analyze(&config, &ticker, &fetch, intersect, charts_dir, head),
        Commands::Fetch { symbols, fetch } => run_fetch(&config, &symbols, &fetch),
        Commands::Cache { action } => match action {
            CacheAction::Status => run_cache_status(&config),
        },
    }
}

/// Install the fmt subscriber. `RUST_LOG`, when set, wins over the config.
fn init_logging(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .with_context(|| format!("invalid log level '{}'", log.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(log.ansi)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_cache(config: &AnalyzerConfig) -> Result<DataCache> {
    let provider = YahooProvider::new(&config.provider, config.index_symbol.as_str())
        .context("failed to set up the Yahoo Finance provider")?;
    Ok(DataCache::new(&config.data_dir, Box::new(provider)).with_index_key(&config.index_key))
}

fn start_date(config: &AnalyzerConfig, start: Option<&str>) -> Result<NaiveDate> {
    match start {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --start '{s}', expected YYYY-MM-DD")),
        None => Ok(config.default_start(chrono::Local::now().date_naive())),
    }
}

fn run_analyze(
    config: &AnalyzerConfig,
    ticker: &str,
    fetch: &FetchArgs,
    intersect: bool,
    charts_dir: Option<PathBuf>,
    head: usize,
) -> Result<()> {
    let start = start_date(config, fetch.start.as_deref())?;
    let cache = build_cache(config)?;

    let mut analyzer = StockAnalyzer::load(&cache, ticker, start, fetch.refresh)?;
    if intersect {
        analyzer = analyzer.intersected();
    }

    let asset_returns = analyzer.asset_returns()?;
    let index_returns = analyzer.index_returns()?;
    print_head(&asset_returns, head);
    print_head(&index_returns, head);

    let fit = analyzer.ols()?;
    println!();
    println!("{fit}");
    println!();
    println!("Alpha  {:.6}", fit.alpha);
    println!("Beta   {:.6}", fit.beta);
    println!("Mean   {:.4}", analyzer.mean());
    println!("Std    {:.4}", analyzer.std());

    if let Some(dir) = charts_dir {
        let writer = JsonChartWriter::new(&dir, ticker);
        render_all(
            &analyzer,
            &writer,
            config.short_window,
            config.long_window,
            config.candle_bucket_days,
        )?;
        println!();
        println!("Charts written to: {}", dir.display());
    }

    Ok(())
}

fn print_head(returns: &ReturnSeries, n: usize) {
    if n == 0 {
        return;
    }
    println!();
    println!("{:<12} {:>12}", "Date", returns.symbol);
    for point in returns.head(n) {
        println!("{:<12} {:>12.6}", point.date.to_string(), point.value);
    }
}

fn run_fetch(config: &AnalyzerConfig, symbols: &[String], fetch: &FetchArgs) -> Result<()> {
    let start = start_date(config, fetch.start.as_deref())?;
    let cache = build_cache(config)?;

    let total = symbols.len();
    let mut failed = 0;
    for (i, symbol) in symbols.iter().enumerate() {
        println!("[{}/{}] {symbol}...", i + 1, total);
        match cache.get_series(symbol, start, fetch.refresh) {
            Ok(series) => println!("  OK: {} rows", series.len()),
            Err(e) => {
                println!("  FAIL: {e}");
                failed += 1;
            }
        }
    }

    println!("\nFetch complete: {}/{total} succeeded, {failed} failed", total - failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_cache_status(config: &AnalyzerConfig) -> Result<()> {
    let cache_dir = &config.data_dir;
    if !cache_dir.exists() {
        println!("Cache directory does not exist: {}", cache_dir.display());
        return Ok(());
    }

    let cache = DataCache::offline(cache_dir);
    let entries = cache.entries()?;
    if entries.is_empty() {
        println!("Cache is empty: {}", cache_dir.display());
        return Ok(());
    }

    let mut total_size = 0u64;
    println!("Cache: {}", cache_dir.display());
    println!("Series: {}", entries.len());
    println!();
    println!("{:<10} {:<25} {:<12} {:>10}", "Name", "Date Range", "Rows", "Size");
    println!("{}", "-".repeat(60));
    for entry in &entries {
        let size = file_size(&cache.entry_path(&entry.name)?);
        total_size += size;
        let range = match (entry.first_date, entry.last_date) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => "(empty)".into(),
        };
        println!(
            "{:<10} {:<25} {:<12} {:>10}",
            entry.name,
            range,
            format!("{} rows", entry.rows),
            format_size(size)
        );
    }
    println!();
    println!("Total size: {}", format_size(total_size));

    Ok(())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
