#![allow(missing_docs)]
//! Quote types: the per-ticker request payload and the chain response.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{AssetClass, DateGranularity};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Query parameters sent to the quote function for one ticker.
///
/// Field names match the function's query-string keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerRequest {
    #[serde(rename = "selectedTicker")]
    pub symbol: String,
    #[serde(rename = "assetclass")]
    pub asset_class: AssetClass,
    #[serde(rename = "selectedDayOrMonth")]
    pub granularity: DateGranularity,
    /// Target date (YYYY-MM-DD).
    #[serde(rename = "inputDate")]
    pub target_date: String,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// One strike row of the chain table.
///
/// Values are usually thousands-separated strings such as `"1,234"`, but any
/// of them may be missing or hold something unparsable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionRow {
    #[serde(default, rename = "c_Volume")]
    pub call_volume: Option<Value>,
    #[serde(default, rename = "p_Volume")]
    pub put_volume: Option<Value>,
    #[serde(default, rename = "c_OpenInterest")]
    pub call_open_interest: Option<Value>,
    #[serde(default, rename = "p_OpenInterest")]
    pub put_open_interest: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteTable {
    #[serde(default)]
    pub rows: Option<Vec<OptionRow>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteData {
    /// Free text such as `"$217.12 (+0.4%)"`.
    #[serde(default, rename = "lastTrade")]
    pub last_trade: Option<Value>,
    #[serde(default)]
    pub table: Option<QuoteTable>,
}

/// Normalized quote document, after any gateway envelope has been removed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub data: Option<QuoteData>,
}

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([\d.]+)").expect("price pattern is valid"));

impl QuoteResponse {
    /// Chain rows, empty when the table is absent.
    pub fn rows(&self) -> &[OptionRow] {
        self.data
            .as_ref()
            .and_then(|d| d.table.as_ref())
            .and_then(|t| t.rows.as_deref())
            .unwrap_or_default()
    }

    /// Last traded price pulled out of `data.lastTrade`, or `0.0`.
    pub fn last_price(&self) -> f64 {
        self.data
            .as_ref()
            .and_then(|d| d.last_trade.as_ref())
            .and_then(Value::as_str)
            .map(extract_price)
            .unwrap_or(0.0)
    }
}

/// Find the first `$`-prefixed decimal in `text`.
///
/// Digits after a second decimal point are ignored, so `"$1.2.3"` reads as
/// `1.2`. No match yields `0.0`.
pub fn extract_price(text: &str) -> f64 {
    let Some(caps) = PRICE_RE.captures(text) else {
        return 0.0;
    };
    let raw = &caps[1];
    let end = raw
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse().unwrap_or(0.0)
}
