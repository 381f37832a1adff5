// =============================================================================
// spot-prices — Binance 1m kline fetcher and M5/H1/D1 snapshot exporter
// =============================================================================
//
// Batch, run-once binary: fetch minute klines, resample to three coarser
// timeframes, write one dated JSON document, exit. Any collaborator error
// (network, malformed response, file write) aborts the run — no retries.
// =============================================================================

mod binance;
mod config;
mod market_data;
mod resample;
mod sink;
mod snapshot;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::binance::BinanceClient;
use crate::config::ExportConfig;
use crate::snapshot::PriceDocument;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export Binance M5/H1/D1 price snapshots as dated JSON")]
struct Cli {
    /// Exchange symbol to fetch (overrides config file), e.g. BTCUSDT
    #[arg(short, long)]
    symbol: Option<String>,

    /// Number of 1m candles to request (overrides config file)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Directory the dated snapshot is written into, e.g. docs/prices/spot
    #[arg(short, long)]
    outdir: PathBuf,

    /// Optional JSON config file with symbol/limit/series metadata
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // ── 1. Config (file < env < CLI) ─────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => ExportConfig::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load config, using defaults");
            ExportConfig::default()
        }),
        None => ExportConfig::default(),
    };

    if let Ok(sym) = std::env::var("SPOT_PRICES_SYMBOL") {
        let sym = sym.trim().to_uppercase();
        if !sym.is_empty() {
            config.symbol = sym;
        }
    }
    if let Some(sym) = cli.symbol {
        config.symbol = sym.trim().to_uppercase();
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }

    info!(
        symbol = %config.symbol,
        limit = config.limit,
        outdir = %cli.outdir.display(),
        "starting snapshot export"
    );

    // ── 2. Fetch 1m klines ───────────────────────────────────────────────
    let client = BinanceClient::new();
    let candles = client.get_klines(&config.symbol, "1m", config.limit).await?;
    info!(count = candles.len(), "1m candles fetched");

    // ── 3. Resample into the three timeframes ────────────────────────────
    let m5 = resample::resample_m5(&candles);
    let h1 = resample::resample_h1(&candles);
    let d1 = resample::resample_d1(&candles);
    info!(m5 = m5.len(), h1 = h1.len(), d1 = d1.len(), "resampling complete");

    // ── 4. Assemble and write the snapshot ───────────────────────────────
    let mut doc = PriceDocument::now();
    doc.push_series(&config.series, "M5", m5);
    doc.push_series(&config.series, "H1", h1);
    doc.push_series(&config.series, "D1", d1);

    let path = sink::write_snapshot(&doc, &cli.outdir, Utc::now().date_naive())?;
    info!(path = %path.display(), "export complete");

    Ok(())
}
