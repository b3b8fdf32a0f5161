//! Log record types written to the daily and open-interest logs.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Entry identity
// ---------------------------------------------------------------------------

/// Identity of a log record.
///
/// Records are built with a provisional [`EntryId::Token`] and receive their
/// persisted [`EntryId::Seq`] from
/// [`JsonLogStore::append`](crate::store::JsonLogStore::append).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// Sequential id assigned by the log store.
    Seq(u64),
    /// Provisional pseudo-unique token assigned at creation.
    Token(String),
}

impl EntryId {
    /// Generate a provisional token: base-36 milliseconds followed by a
    /// base-36 random suffix.
    pub fn generate() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let suffix: u64 = rand::thread_rng().r#gen();
        Self::Token(format!("{}{}", to_base36(millis), to_base36(suffix)))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seq(n) => write!(f, "{n}"),
            Self::Token(t) => f.write_str(t),
        }
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One volume observation for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: EntryId,
    pub timestamp: String,
    pub call_volume: i64,
    pub put_volume: i64,
    pub selected_ticker: String,
    pub lst_price: f64,
}

/// One open-interest snapshot for a ticker, taken once per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestEntry {
    pub id: EntryId,
    pub timestamp: String,
    pub call_open_interest: i64,
    pub put_open_interest: i64,
    pub selected_ticker: String,
    pub lst_price: f64,
}

/// A record as persisted: sequential id, append timestamp, then the
/// remaining caller fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    /// Sequential id within the log.
    pub id: u64,
    /// ISO-8601 instant of the append.
    pub timestamp: String,
    /// Full JSON object as written.
    pub fields: Map<String, Value>,
}

impl StoredEntry {
    /// Look up a persisted field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
