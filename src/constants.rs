//! Constants for the collector.
//!
//! Default ticker lists, object keys and the reference timezone. The lists
//! are only defaults for [`CollectorConfig`](crate::config::CollectorConfig);
//! every value can be overridden at construction time.

use chrono_tz::Tz;

// ---------------------------------------------------------------------------
// Tickers
// ---------------------------------------------------------------------------

/// Tickers logged on every invocation, in processing order.
pub const DEFAULT_TICKERS: &[&str] = &[
    "AMZN", "SPY", "QQQ", "IWM", "AAPL", "NVDA", "GOOG", "TSLA", "SOXL", "SOFI", "AAL", "INTC",
    "TSLL", "AAPU",
];

/// Tickers classified as exchange-traded funds.
pub const DEFAULT_ETF_TICKERS: &[&str] =
    &["SPY", "QQQ", "IWM", "TQQQ", "SOXL", "TSLL", "SQQQ", "AAPU"];

/// Leveraged/inverse ETFs whose chain is requested for the coming Friday
/// instead of the effective trading date.
pub const DEFAULT_WEEKLY_EXPIRY_ETFS: &[&str] = &["TQQQ", "SOXL", "TSLL", "SQQQ"];

// ---------------------------------------------------------------------------
// Object store
// ---------------------------------------------------------------------------

/// Key of the non-dated open-interest log.
pub const OPEN_INTEREST_KEY: &str = "OpenInterest.json";

/// Suffix appended to the `YYYY-MM-DD` date of a daily log key.
pub const DAILY_LOG_SUFFIX: &str = ".json";

/// Content type written with every log object.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Market timezone used for log keys, pre-append timestamps and the coming
/// Friday computation.
pub const MARKET_TZ: Tz = chrono_tz::America::New_York;

// ---------------------------------------------------------------------------
// Handler response
// ---------------------------------------------------------------------------

/// CORS headers returned with every handler response.
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "*"),
];
