//! Shared enum types that map directly to the quote function's string values.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Asset Class
// ---------------------------------------------------------------------------

/// Asset classification driving the target-date policy.
///
/// Serialized as the quote function expects it: `"ETF"` or `"stocks"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Exchange-traded fund.
    #[serde(rename = "ETF")]
    Etf,
    /// Single stock.
    #[serde(rename = "stocks")]
    Stock,
}

// ---------------------------------------------------------------------------
// Date Granularity
// ---------------------------------------------------------------------------

/// Granularity of the requested chain. Only daily chains are collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateGranularity {
    #[default]
    #[serde(rename = "day")]
    Day,
}
