// =============================================================================
// OHLCV Resampling — 1m candles into M5 / H1 / D1 bars
// =============================================================================
//
// All three passes share the same shape: walk the minute candles in order,
// accumulate them into the current bucket, and flush the bucket into one
// aggregated bar when a timeframe boundary is hit. Trailing partial buckets
// are always flushed, never dropped.
//
// Boundary rules:
//   M5 — flush after a candle whose minute-of-hour % 5 == 4
//   H1 — flush after a candle whose minute-of-hour == 59
//   D1 — flush when the UTC calendar date changes (the triggering candle
//        seeds the next bucket)
//
// M5 and H1 buckets are therefore aligned to the wall clock, not to the first
// candle of the input: an input starting mid-window produces a short first
// bucket. That is intentional.
// =============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::market_data::Candle;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_DAY: i64 = 86_400_000;

/// One aggregated OHLCV bar covering a coarser period.
///
/// The single-letter JSON field names (`t/o/h/l/c/v`) are the on-disk format
/// consumed by downstream tooling and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggBar {
    /// ISO-8601 UTC timestamp of the first candle in the bucket ("Z" suffix).
    #[serde(rename = "t")]
    pub period_start: String,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

/// Format a millisecond UTC timestamp as ISO-8601 with a literal `Z` suffix.
///
/// Sub-second digits are emitted only when the instant actually carries them;
/// Binance open times are minute-aligned, so the common output is
/// `2024-01-15T10:30:00Z`.
pub fn iso_z(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_default()
}

/// Minute-of-hour (0..=59) for a millisecond open time.
fn minute_of_hour(open_time: i64) -> i64 {
    (open_time / MS_PER_MINUTE) % 60
}

/// UTC day index for a millisecond open time (days since the epoch).
///
/// `div_euclid` keeps pre-epoch timestamps on the correct side of midnight.
fn utc_day(open_time: i64) -> i64 {
    open_time.div_euclid(MS_PER_DAY)
}

/// Reduce one non-empty bucket of minute candles into a single [`AggBar`].
///
/// - `period_start` / `open` come from the first candle
/// - `close` comes from the last candle
/// - `high` / `low` are the bucket-wide max/min
/// - `volume` is the bucket-wide sum
///
/// Returns `None` for an empty bucket; the resampling drivers never flush one.
pub fn aggregate(bucket: &[Candle]) -> Option<AggBar> {
    let first = bucket.first()?;
    let last = bucket.last()?;

    let high = bucket.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = bucket.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let volume = bucket.iter().map(|c| c.volume).sum();

    Some(AggBar {
        period_start: iso_z(first.open_time),
        open: first.open,
        high,
        low,
        close: last.close,
        volume,
    })
}

/// Shared accumulate-then-flush driver for the minute-boundary timeframes.
///
/// Appends each candle to the open bucket, flushes the bucket when `boundary`
/// holds for the candle just appended, and flushes any trailing partial
/// bucket at end of input.
fn resample_by_boundary<F>(candles: &[Candle], boundary: F) -> Vec<AggBar>
where
    F: Fn(&Candle) -> bool,
{
    let mut out = Vec::new();
    let mut bucket: Vec<Candle> = Vec::new();

    for candle in candles {
        bucket.push(candle.clone());
        if boundary(candle) {
            if let Some(bar) = aggregate(&bucket) {
                out.push(bar);
            }
            bucket.clear();
        }
    }

    if let Some(bar) = aggregate(&bucket) {
        out.push(bar);
    }

    out
}

/// Resample minute candles into 5-minute bars aligned to :00/:05/:10/...
pub fn resample_m5(candles: &[Candle]) -> Vec<AggBar> {
    resample_by_boundary(candles, |c| minute_of_hour(c.open_time) % 5 == 4)
}

/// Resample minute candles into hourly bars aligned to the top of the hour.
pub fn resample_h1(candles: &[Candle]) -> Vec<AggBar> {
    resample_by_boundary(candles, |c| minute_of_hour(c.open_time) == 59)
}

/// Resample minute candles into daily bars split at UTC midnight.
///
/// Unlike M5/H1 the boundary is detected *before* appending: a candle on a
/// new calendar date closes the previous bucket and seeds the next one.
/// Empty input yields empty output.
pub fn resample_d1(candles: &[Candle]) -> Vec<AggBar> {
    let mut out = Vec::new();
    let mut bucket: Vec<Candle> = Vec::new();
    let mut current_day: Option<i64> = None;

    for candle in candles {
        let day = utc_day(candle.open_time);
        match current_day {
            Some(d) if d != day => {
                if let Some(bar) = aggregate(&bucket) {
                    out.push(bar);
                }
                bucket.clear();
                bucket.push(candle.clone());
                current_day = Some(day);
            }
            _ => {
                bucket.push(candle.clone());
                current_day = Some(day);
            }
        }
    }

    if let Some(bar) = aggregate(&bucket) {
        out.push(bar);
    }

    out
}
