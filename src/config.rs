// =============================================================================
// Export Configuration — optional JSON config with serde defaults
// =============================================================================
//
// Every field carries `#[serde(default)]` so that adding new fields never
// breaks loading an older config file. CLI flags and env vars override file
// values in main.rs.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::snapshot::SeriesMeta;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_limit() -> u32 {
    // 12 hours of 1m candles; Binance caps a single klines request at 1000.
    720
}

// =============================================================================
// ExportConfig
// =============================================================================

/// Configuration for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Exchange symbol to fetch 1m klines for.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Number of 1m candles to request.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Descriptive metadata stamped onto every series in the snapshot.
    #[serde(default)]
    pub series: SeriesMeta,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            limit: default_limit(),
            series: SeriesMeta::default(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read export config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse export config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            limit = config.limit,
            "export config loaded"
        );

        Ok(config)
    }
}
