//! Collector configuration.
//!
//! [`CollectorConfig`] gathers everything an invocation needs: the bucket,
//! the quote endpoint and the ticker classification lists. It is built once
//! (usually from the environment) and handed to
//! [`Collector`](crate::collector::Collector) at construction time.

use std::env;

use crate::constants::{
    DEFAULT_ETF_TICKERS, DEFAULT_REGION, DEFAULT_TICKERS, DEFAULT_WEEKLY_EXPIRY_ETFS,
    OPEN_INTEREST_KEY,
};
use crate::error::{CollectorError, Result};
use crate::types::AssetClass;

/// Runtime configuration for one collector instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Bucket holding the daily and open-interest logs.
    pub bucket: String,
    /// Region of the bucket.
    pub region: String,
    /// URL of the quote-fetch function.
    pub quote_endpoint: String,
    /// Tickers processed on every invocation, in order.
    pub tickers: Vec<String>,
    /// Tickers classified as [`AssetClass::Etf`].
    pub etf_tickers: Vec<String>,
    /// ETFs that use the coming Friday as their target date.
    pub weekly_expiry_etfs: Vec<String>,
    /// Key of the open-interest log.
    pub open_interest_key: String,
    /// Include per-ticker outcomes in the handler response body.
    pub report_outcomes: bool,
}

impl CollectorConfig {
    /// Create a configuration with the default ticker lists.
    pub fn new(bucket: impl Into<String>, quote_endpoint: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: DEFAULT_REGION.to_owned(),
            quote_endpoint: quote_endpoint.into(),
            tickers: to_owned_list(DEFAULT_TICKERS),
            etf_tickers: to_owned_list(DEFAULT_ETF_TICKERS),
            weekly_expiry_etfs: to_owned_list(DEFAULT_WEEKLY_EXPIRY_ETFS),
            open_interest_key: OPEN_INTEREST_KEY.to_owned(),
            report_outcomes: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Required | Meaning |
    /// |---|---|---|
    /// | `BUCKET_NAME` | yes | log bucket |
    /// | `QUOTE_FUNCTION_URL` | yes | quote function endpoint |
    /// | `AWS_REGION` | no | bucket region |
    /// | `TICKERS` | no | comma-separated ticker list |
    /// | `ETF_TICKERS` | no | comma-separated ETF list |
    /// | `REPORT_OUTCOMES` | no | `true`/`1` to report outcomes |
    pub fn from_env() -> Result<Self> {
        let bucket = required_var("BUCKET_NAME")?;
        let endpoint = required_var("QUOTE_FUNCTION_URL")?;
        url::Url::parse(&endpoint)?;

        let mut config = Self::new(bucket, endpoint);
        if let Ok(region) = env::var("AWS_REGION") {
            if !region.trim().is_empty() {
                config.region = region.trim().to_owned();
            }
        }
        if let Some(tickers) = list_var("TICKERS") {
            config.tickers = tickers;
        }
        if let Some(etfs) = list_var("ETF_TICKERS") {
            config.etf_tickers = etfs;
        }
        if let Ok(flag) = env::var("REPORT_OUTCOMES") {
            config.report_outcomes = matches!(flag.trim(), "1" | "true" | "TRUE" | "True");
        }
        Ok(config)
    }

    /// Replace the ticker list.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the ETF classification list.
    pub fn with_etf_tickers<I, S>(mut self, etfs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.etf_tickers = etfs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the coming-Friday ETF subset.
    pub fn with_weekly_expiry_etfs<I, S>(mut self, etfs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekly_expiry_etfs = etfs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bucket region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the open-interest log key.
    pub fn with_open_interest_key(mut self, key: impl Into<String>) -> Self {
        self.open_interest_key = key.into();
        self
    }

    /// Report per-ticker outcomes in the handler body.
    pub fn with_report_outcomes(mut self, report: bool) -> Self {
        self.report_outcomes = report;
        self
    }

    /// Classify a ticker by membership in the ETF list.
    pub fn asset_class(&self, ticker: &str) -> AssetClass {
        if self.etf_tickers.iter().any(|t| t == ticker) {
            AssetClass::Etf
        } else {
            AssetClass::Stock
        }
    }

    /// Whether an ETF's chain is requested for the coming Friday.
    pub fn uses_weekly_expiry(&self, ticker: &str) -> bool {
        self.weekly_expiry_etfs.iter().any(|t| t == ticker)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn required_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(CollectorError::Config(format!("{name} is not set"))),
    }
}

fn list_var(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let list = parse_list(&raw);
    if list.is_empty() { None } else { Some(list) }
}

/// Split a comma-separated list, trimming and upper-casing entries.
pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_classify_tickers() {
        let config = CollectorConfig::new("bucket", "https://quotes.example.com");
        assert_eq!(config.asset_class("SPY"), AssetClass::Etf);
        assert_eq!(config.asset_class("AAPL"), AssetClass::Stock);
        assert!(config.uses_weekly_expiry("SOXL"));
        assert!(!config.uses_weekly_expiry("SPY"));
        assert_eq!(config.open_interest_key, "OpenInterest.json");
        assert_eq!(config.tickers.len(), 14);
    }

    #[test]
    fn overrides_replace_lists() {
        let config = CollectorConfig::new("b", "https://q.example.com")
            .with_tickers(["XYZ"])
            .with_etf_tickers(["XYZ"]);
        assert_eq!(config.tickers, vec!["XYZ".to_owned()]);
        assert_eq!(config.asset_class("XYZ"), AssetClass::Etf);
        assert_eq!(config.asset_class("SPY"), AssetClass::Stock);
    }

    #[test]
    fn parse_list_trims_and_uppercases() {
        assert_eq!(parse_list(" spy, qqq ,,iwm"), vec!["SPY", "QQQ", "IWM"]);
        assert!(parse_list(" , ").is_empty());
    }
}
