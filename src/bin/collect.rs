//! One-shot run of the collector, as the scheduler would trigger it.
//!
//! # Usage
//!
//! ```sh
//! export BUCKET_NAME="my-volume-logs"
//! export QUOTE_FUNCTION_URL="https://xxxx.lambda-url.us-east-1.on.aws/"
//! cargo run --bin collect --features cli
//! ```

use options_volume_logger::{Collector, CollectorConfig};

#[tokio::main]
async fn main() -> options_volume_logger::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = CollectorConfig::from_env()?;
    tracing::info!(
        bucket = %config.bucket,
        tickers = config.tickers.len(),
        "starting collection run"
    );

    let collector = Collector::from_config(config)?;
    let response = collector.handle().await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
