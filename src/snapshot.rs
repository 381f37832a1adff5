// =============================================================================
// Snapshot document — versioned JSON envelope for the aggregated series
// =============================================================================
//
// The on-disk schema is consumed by external tooling and must stay stable:
//
// {
//   "schema_version": "1.0",
//   "generated_at": "...Z",
//   "series": [
//     { "symbol": "BTCUSD", "class": "crypto", "tf": "M5",
//       "base": "BTC", "quote": "USD", "bars": [ {t,o,h,l,c,v}, ... ] }
//   ]
// }
// =============================================================================

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resample::AggBar;

/// Schema version tag written into every document.
pub const SCHEMA_VERSION: &str = "1.0";

/// Each series is truncated to its most recent `SERIES_CAP` bars.
pub const SERIES_CAP: usize = 120;

/// Fixed descriptive metadata attached to every series in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub symbol: String,
    pub class: String,
    pub base: String,
    pub quote: String,
}

impl Default for SeriesMeta {
    fn default() -> Self {
        Self {
            symbol: "BTCUSD".to_string(),
            class: "crypto".to_string(),
            base: "BTC".to_string(),
            quote: "USD".to_string(),
        }
    }
}

/// One aggregated series plus its descriptive metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub symbol: String,
    pub class: String,
    pub tf: String,
    pub base: String,
    pub quote: String,
    pub bars: Vec<AggBar>,
}

/// The top-level snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDocument {
    pub schema_version: String,
    pub generated_at: String,
    pub series: Vec<SeriesEntry>,
}

impl PriceDocument {
    /// Create an empty document stamped with the current UTC time.
    pub fn now() -> Self {
        Self::with_generated_at(Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Create an empty document with an explicit `generated_at` stamp.
    pub fn with_generated_at(generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: generated_at.into(),
            series: Vec::new(),
        }
    }

    /// Append one timeframe's series to the document.
    ///
    /// Empty series are dropped entirely (no empty `bars` arrays on disk);
    /// non-empty series keep only their most recent [`SERIES_CAP`] bars.
    pub fn push_series(&mut self, meta: &SeriesMeta, tf: &str, mut bars: Vec<AggBar>) {
        if bars.is_empty() {
            debug!(tf, "skipping empty series");
            return;
        }

        if bars.len() > SERIES_CAP {
            bars.drain(..bars.len() - SERIES_CAP);
        }

        debug!(tf, count = bars.len(), "series added to snapshot");
        self.series.push(SeriesEntry {
            symbol: meta.symbol.clone(),
            class: meta.class.clone(),
            tf: tf.to_string(),
            base: meta.base.clone(),
            quote: meta.quote.clone(),
            bars,
        });
    }
}
