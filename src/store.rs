//! Append-only JSON-array logs on top of a whole-object store.
//!
//! Each log is one object holding a JSON array. Appending is a
//! read-modify-write: GET the array, push a record with the next sequential
//! id, PUT the whole array back. Writes are unconditional, so two writers
//! appending to the same key at the same time can lose one record.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::JSON_CONTENT_TYPE;
use crate::error::{CollectorError, Result};
use crate::types::log::StoredEntry;

/// Result of a best-effort append.
#[must_use]
#[derive(Debug)]
pub enum AppendOutcome {
    /// The record was written.
    Persisted(StoredEntry),
    /// The read-modify-write failed; nothing was written.
    Failed(CollectorError),
}

impl AppendOutcome {
    /// Convert into a `Result`, for callers that want to propagate.
    pub fn into_result(self) -> Result<StoredEntry> {
        match self {
            Self::Persisted(entry) => Ok(entry),
            Self::Failed(err) => Err(err),
        }
    }
}

/// JSON-array log store over an [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct JsonLogStore {
    store: Arc<dyn ObjectStore>,
}

impl JsonLogStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Underlying object store.
    pub fn inner(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Whether an object exists at `key`.
    ///
    /// "Not found" is `false`; every other failure is returned as an error.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        tracing::debug!(%key, "HEAD");
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Write an empty array to `key`, replacing anything already there.
    pub async fn create_empty(&self, key: &str) -> Result<()> {
        self.write_array(key, &[]).await?;
        tracing::info!(%key, "created empty log");
        Ok(())
    }

    /// Read the array at `key`.
    pub async fn read(&self, key: &str) -> Result<Vec<Value>> {
        tracing::debug!(%key, "GET");
        let bytes = self.store.get(&Path::from(key)).await?.bytes().await?;
        match serde_json::from_slice(&bytes)? {
            Value::Array(items) => Ok(items),
            other => Err(CollectorError::InvalidLog {
                key: key.to_owned(),
                reason: format!("expected a JSON array, found {}", json_kind(&other)),
            }),
        }
    }

    /// Append `entry` to the array at `key`.
    ///
    /// The stored record is `{id, timestamp, ...entry}` where `id` is one
    /// more than the last record's numeric id and `timestamp` is the current
    /// instant. Any `id` or `timestamp` inside `entry` is replaced. The log
    /// must already exist.
    pub async fn append<T: Serialize>(&self, key: &str, entry: &T) -> AppendOutcome {
        match self.try_append(key, entry).await {
            Ok(stored) => {
                tracing::info!(%key, id = stored.id, "appended log entry");
                AppendOutcome::Persisted(stored)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "append failed");
                AppendOutcome::Failed(e)
            }
        }
    }

    async fn try_append<T: Serialize>(&self, key: &str, entry: &T) -> Result<StoredEntry> {
        let mut items = self.read(key).await?;

        let id = next_id(key, &items)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut fields = Map::new();
        fields.insert("id".to_owned(), Value::from(id));
        fields.insert("timestamp".to_owned(), Value::from(timestamp.clone()));
        match serde_json::to_value(entry)? {
            Value::Object(extra) => {
                for (k, v) in extra {
                    if k != "id" && k != "timestamp" {
                        fields.insert(k, v);
                    }
                }
            }
            other => {
                return Err(CollectorError::InvalidLog {
                    key: key.to_owned(),
                    reason: format!("entry must be an object, got {}", json_kind(&other)),
                });
            }
        }

        items.push(Value::Object(fields.clone()));
        self.write_array(key, &items).await?;

        Ok(StoredEntry {
            id,
            timestamp,
            fields,
        })
    }

    async fn write_array(&self, key: &str, items: &[Value]) -> Result<()> {
        let body = serde_json::to_vec_pretty(items)?;
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, JSON_CONTENT_TYPE.into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        tracing::debug!(%key, bytes = body.len(), "PUT");
        self.store
            .put_opts(&Path::from(key), PutPayload::from(body), opts)
            .await?;
        Ok(())
    }
}

/// Next sequential id: the last numeric id in the log plus one.
///
/// Records whose id is not a non-negative integer (or a string holding one)
/// are skipped when looking for the last id; an empty log starts at 1. A
/// last id of `u64::MAX` has no successor and is reported as an invalid log.
pub(crate) fn next_id(key: &str, items: &[Value]) -> Result<u64> {
    let last = items
        .iter()
        .rev()
        .find_map(|item| match item.get("id") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        })
        .unwrap_or(0);
    last.checked_add(1).ok_or_else(|| CollectorError::InvalidLog {
        key: key.to_owned(),
        reason: format!("last id {last} has no successor"),
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use serde_json::json;

    fn store() -> JsonLogStore {
        JsonLogStore::new(Arc::new(InMemory::new()))
    }

    #[tokio::test]
    async fn exists_after_create() {
        let logs = store();
        assert!(!logs.exists("2025-06-13.json").await.unwrap());
        logs.create_empty("2025-06-13.json").await.unwrap();
        assert!(logs.exists("2025-06-13.json").await.unwrap());
        assert!(logs.read("2025-06-13.json").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_append_gets_id_one() {
        let logs = store();
        logs.create_empty("log.json").await.unwrap();
        let stored = logs
            .append("log.json", &json!({"selectedTicker": "SPY"}))
            .await
            .into_result()
            .unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.get("selectedTicker"), Some(&json!("SPY")));
    }

    #[tokio::test]
    async fn append_continues_from_last_id() {
        let logs = store();
        let seeded = serde_json::to_vec(&json!([{"id": 4}, {"id": 5, "x": 1}])).unwrap();
        logs.inner()
            .put(&Path::from("log.json"), PutPayload::from(seeded))
            .await
            .unwrap();

        let stored = logs
            .append("log.json", &json!({"x": 2}))
            .await
            .into_result()
            .unwrap();
        assert_eq!(stored.id, 6);
        assert_eq!(logs.read("log.json").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn append_overrides_caller_id_and_timestamp() {
        let logs = store();
        logs.create_empty("log.json").await.unwrap();
        let stored = logs
            .append(
                "log.json",
                &json!({"id": "abc123", "timestamp": "yesterday", "callVolume": 7}),
            )
            .await
            .into_result()
            .unwrap();

        let items = logs.read("log.json").await.unwrap();
        assert_eq!(items[0]["id"], 1);
        assert_ne!(items[0]["timestamp"], "yesterday");
        assert_eq!(items[0]["timestamp"], json!(stored.timestamp));
        assert!(stored.timestamp.ends_with('Z'));
        assert_eq!(items[0]["callVolume"], 7);
    }

    #[tokio::test]
    async fn append_to_missing_log_fails() {
        let logs = store();
        let outcome = logs.append("missing.json", &json!({})).await;
        assert!(matches!(
            outcome,
            AppendOutcome::Failed(CollectorError::Store(_))
        ));
    }

    #[tokio::test]
    async fn append_to_non_array_fails_without_writing() {
        let logs = store();
        logs.inner()
            .put(&Path::from("log.json"), PutPayload::from_static(b"{}"))
            .await
            .unwrap();
        let outcome = logs.append("log.json", &json!({"a": 1})).await;
        assert!(matches!(
            outcome,
            AppendOutcome::Failed(CollectorError::InvalidLog { .. })
        ));
        let raw = logs
            .inner()
            .get(&Path::from("log.json"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(&raw[..], b"{}");
    }

    #[test]
    fn next_id_rules() {
        assert_eq!(next_id("k", &[]).unwrap(), 1);
        assert_eq!(next_id("k", &[json!({"id": 5})]).unwrap(), 6);
        assert_eq!(next_id("k", &[json!({"id": "7"})]).unwrap(), 8);
        assert_eq!(
            next_id("k", &[json!({"id": 2}), json!({"id": "m0x1abc"})]).unwrap(),
            3
        );
        assert_eq!(next_id("k", &[json!({"id": "m0x1abc"})]).unwrap(), 1);
    }

    #[test]
    fn next_id_rejects_exhausted_ids() {
        assert!(matches!(
            next_id("log.json", &[json!({"id": u64::MAX})]),
            Err(CollectorError::InvalidLog { .. })
        ));
    }

    #[tokio::test]
    async fn append_after_max_id_fails_without_writing() {
        let logs = store();
        let seeded = serde_json::to_vec(&json!([{"id": u64::MAX}])).unwrap();
        logs.inner()
            .put(&Path::from("log.json"), PutPayload::from(seeded))
            .await
            .unwrap();
        let outcome = logs.append("log.json", &json!({"x": 1})).await;
        assert!(matches!(
            outcome,
            AppendOutcome::Failed(CollectorError::InvalidLog { .. })
        ));
        assert_eq!(logs.read("log.json").await.unwrap().len(), 1);
    }
}
