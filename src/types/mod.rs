//! Request, response and record types used by the collector.
//!
//! ## Organization
//!
//! - [`enums`]: asset class and date granularity
//! - [`quote`]: quote request payload and chain response
//! - [`log`]: daily-log and open-interest records
//! - [`handler`]: per-ticker outcomes and the handler envelope
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod handler;
pub mod log;
pub mod quote;

pub use enums::*;
