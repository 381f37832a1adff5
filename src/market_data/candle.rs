use serde::{Deserialize, Serialize};

/// A single 1-minute OHLCV candle as returned by the Binance klines endpoint.
///
/// `open_time` / `close_time` are UTC milliseconds since the epoch. The
/// resampler keys everything off `open_time`; `close_time` is carried through
/// from the exchange payload but not otherwise used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
}

impl Candle {
    pub fn new(
        open_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        close_time: i64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
        }
    }
}
