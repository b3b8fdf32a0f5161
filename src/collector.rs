//! Per-invocation orchestration.
//!
//! One [`Collector::run`] walks the configured tickers in order. For each
//! ticker it resolves the target date, fetches the chain, sums volumes and
//! appends a [`LogEntry`] to today's daily log. The first run of a calendar
//! day (the one that finds the daily log missing) also appends one
//! [`OpenInterestEntry`] per ticker to the open-interest log.
//!
//! A failing ticker never stops the run, and a failed open-interest write
//! never stops that ticker's volume entry. The only error that escapes is a
//! failed existence probe on the daily log.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;

use crate::aggregate::{sum_open_interest, sum_volumes};
use crate::api::quote::QuoteSource;
use crate::client::QuoteClient;
use crate::config::CollectorConfig;
use crate::constants::{DAILY_LOG_SUFFIX, MARKET_TZ};
use crate::dates::{format_date, target_date};
use crate::error::Result;
use crate::store::JsonLogStore;
use crate::types::handler::{HandlerResponse, RunSummary, TickerOutcome};
use crate::types::log::{EntryId, LogEntry, OpenInterestEntry};
use crate::types::quote::TickerRequest;
use crate::types::DateGranularity;

/// Daily log key for the market-timezone date of `now`.
pub fn daily_log_key(now: &DateTime<Utc>) -> String {
    format!(
        "{}{}",
        format_date(now.with_timezone(&MARKET_TZ).date_naive()),
        DAILY_LOG_SUFFIX
    )
}

/// Market-timezone wall clock, `YYYY-MM-DD HH:MM:SS`.
fn market_timestamp(now: &DateTime<Utc>) -> String {
    now.with_timezone(&MARKET_TZ)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Mutable per-run state.
struct RunState {
    daily_key: String,
    first_run_of_day: bool,
    daily_created: bool,
    open_interest_ready: bool,
}

/// The scheduled job: quote source + log store + configuration.
pub struct Collector<Q: QuoteSource> {
    config: CollectorConfig,
    quotes: Q,
    logs: JsonLogStore,
}

impl Collector<QuoteClient> {
    /// Build a collector backed by S3 and the HTTP quote function.
    ///
    /// Credentials are taken from the standard AWS environment variables.
    pub fn from_config(config: CollectorConfig) -> Result<Self> {
        let s3 = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .build()?;
        let quotes = QuoteClient::new(config.quote_endpoint.clone())?;
        Ok(Self::new(config, quotes, Arc::new(s3)))
    }
}

impl<Q: QuoteSource> Collector<Q> {
    pub fn new(config: CollectorConfig, quotes: Q, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config,
            quotes,
            logs: JsonLogStore::new(store),
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn logs(&self) -> &JsonLogStore {
        &self.logs
    }

    /// Run once and wrap the result in the handler envelope.
    pub async fn handle(&self) -> Result<HandlerResponse> {
        let summary = self.run().await?;
        HandlerResponse::from_summary(&summary, self.config.report_outcomes)
    }

    /// Run once at the current instant.
    pub async fn run(&self) -> Result<RunSummary> {
        self.run_at(Utc::now()).await
    }

    /// Run once as if the current instant were `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let daily_key = daily_log_key(&now);
        let first_run_of_day = !self.logs.exists(&daily_key).await?;
        if first_run_of_day {
            tracing::info!(key = %daily_key, "first run of the day, open interest will be captured");
        }

        let mut state = RunState {
            daily_key,
            first_run_of_day,
            daily_created: false,
            open_interest_ready: false,
        };

        let mut outcomes = Vec::with_capacity(self.config.tickers.len());
        for ticker in &self.config.tickers {
            tracing::info!(%ticker, "processing ticker");
            let outcome = match self.process_ticker(ticker, &now, &mut state).await {
                Ok(()) => TickerOutcome::success(ticker),
                Err(e) => {
                    tracing::warn!(%ticker, error = %e, "ticker failed");
                    TickerOutcome::failed(ticker, e)
                }
            };
            outcomes.push(outcome);
        }

        let summary = RunSummary {
            daily_key: state.daily_key,
            first_run_of_day: state.first_run_of_day,
            outcomes,
        };
        tracing::info!(
            key = %summary.daily_key,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "run complete"
        );
        Ok(summary)
    }

    async fn process_ticker(
        &self,
        ticker: &str,
        now: &DateTime<Utc>,
        state: &mut RunState,
    ) -> Result<()> {
        let asset_class = self.config.asset_class(ticker);
        let local_now = now.with_timezone(&Local);
        let date = target_date(
            &local_now,
            asset_class,
            self.config.uses_weekly_expiry(ticker),
        );

        let req = TickerRequest {
            symbol: ticker.to_owned(),
            asset_class,
            granularity: DateGranularity::Day,
            target_date: format_date(date),
        };
        tracing::debug!(?req, "fetching quote");

        let quote = self.quotes.fetch_quote(&req).await?;
        let rows = quote.rows();
        let lst_price = quote.last_price();

        if state.first_run_of_day {
            let oi = sum_open_interest(rows);
            let entry = OpenInterestEntry {
                id: EntryId::generate(),
                timestamp: market_timestamp(now),
                call_open_interest: oi.call,
                put_open_interest: oi.put,
                selected_ticker: ticker.to_owned(),
                lst_price,
            };
            if let Err(e) = self.append_open_interest(&entry, state).await {
                tracing::warn!(%ticker, error = %e, "open interest snapshot failed");
            }
        }

        let volume = sum_volumes(rows);
        let entry = LogEntry {
            id: EntryId::generate(),
            timestamp: market_timestamp(now),
            call_volume: volume.call,
            put_volume: volume.put,
            selected_ticker: ticker.to_owned(),
            lst_price,
        };

        if state.first_run_of_day && !state.daily_created {
            self.logs.create_empty(&state.daily_key).await?;
            state.daily_created = true;
        }

        tracing::debug!(provisional_id = %entry.id, "appending volume entry");
        self.logs
            .append(&state.daily_key, &entry)
            .await
            .into_result()
            .map(|_| ())
    }

    async fn append_open_interest(
        &self,
        entry: &OpenInterestEntry,
        state: &mut RunState,
    ) -> Result<()> {
        let key = &self.config.open_interest_key;
        if !state.open_interest_ready {
            if !self.logs.exists(key).await? {
                self.logs.create_empty(key).await?;
            }
            state.open_interest_ready = true;
        }
        self.logs.append(key, entry).await.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn daily_key_uses_market_date() {
        // 03:00 UTC is the previous evening in New York.
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 3, 0, 0).unwrap();
        assert_eq!(daily_log_key(&now), "2025-06-13.json");
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 15, 0, 0).unwrap();
        assert_eq!(daily_log_key(&now), "2025-06-14.json");
    }

    #[test]
    fn market_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(market_timestamp(&now), "2025-01-02 10:04:05");
    }
}
