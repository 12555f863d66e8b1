//! JSON load/save helpers that absorb failures at the I/O boundary

use encore_core::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load and parse a persisted document
///
/// Returns `None` when the key is absent, the read fails, or the payload does
/// not parse into `T`. Failures are logged, never propagated.
pub async fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed payload under {}: {}", key, e);
            None
        }
    }
}

/// Serialize a document for persistence
///
/// Returns `None` (and logs) if serialization fails.
pub fn to_json<T: Serialize>(key: &str, value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!("Failed to serialize {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn load_missing_key_is_none() {
        let store = MemoryStore::new();
        let doc: Option<Doc> = load_json(&store, "missing").await;
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn load_valid_document() {
        let store = MemoryStore::with_entries([("doc", r#"{"name":"a","count":2}"#)]);
        let doc: Option<Doc> = load_json(&store, "doc").await;
        assert_eq!(
            doc,
            Some(Doc {
                name: "a".to_string(),
                count: 2
            })
        );
    }

    #[tokio::test]
    async fn malformed_and_mismatched_payloads_are_none() {
        let store = MemoryStore::with_entries([
            ("broken", "{\"name\":"),
            ("wrong_shape", r#"{"name":5}"#),
            ("null", "null"),
            ("empty", ""),
        ]);

        for key in ["broken", "wrong_shape", "null", "empty"] {
            let doc: Option<Doc> = load_json(&store, key).await;
            assert!(doc.is_none(), "{key} should not load");
        }
    }

    #[tokio::test]
    async fn read_failure_is_none() {
        let store = MemoryStore::with_entries([("doc", r#"{"name":"a","count":2}"#)]);
        store.set_fail_reads(true);
        let doc: Option<Doc> = load_json(&store, "doc").await;
        assert!(doc.is_none());
    }
}
