//! # options-volume-logger
//!
//! A scheduled collector that records options activity for a fixed list of
//! tickers. Each invocation fetches the option chain of every ticker from a
//! quote function, sums call/put volume, and appends one record per ticker to
//! a per-day JSON log (`YYYY-MM-DD.json`) in object storage. The first
//! invocation of a day also snapshots call/put open interest into
//! `OpenInterest.json`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use options_volume_logger::{Collector, CollectorConfig};
//!
//! #[tokio::main]
//! async fn main() -> options_volume_logger::Result<()> {
//!     let config = CollectorConfig::from_env()?;
//!     let collector = Collector::from_config(config)?;
//!     let response = collector.handle().await?;
//!     println!("{}", response.status_code);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod client;
pub mod collector;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod store;
pub mod types;

/// Re-export the main entry points at crate root for convenience.
pub use collector::Collector;
pub use config::CollectorConfig;
/// Re-export the error type and Result alias.
pub use error::{CollectorError, Result};
