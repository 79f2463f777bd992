use super::{child_keys, RecordStore};
use crate::error::DtrResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// In-memory implementation of the record store (for testing)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    root: RwLock<Value>,
}

impl InMemoryStore {
    /// Create a store holding the given tree
    pub fn new(root: Value) -> Self {
        Self {
            root: RwLock::new(root),
        }
    }

    /// Replace the value at a path, creating parents as needed
    pub async fn set(&self, path: &str, value: Value) {
        let mut root = self.root.write().await;
        let mut node = &mut *root;

        for segment in segments(path) {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = match node {
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                _ => return,
            };
        }

        *node = value;
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path)
        .try_fold(root, |node, segment| node.get(segment))
        .filter(|value| !value.is_null())
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_entity_ids(&self, collection_path: &str) -> DtrResult<Vec<String>> {
        let root = self.root.read().await;
        Ok(lookup(&root, collection_path)
            .map(child_keys)
            .unwrap_or_default())
    }

    async fn read_record(&self, path: &str) -> DtrResult<Option<Value>> {
        let root = self.root.read().await;
        Ok(lookup(&root, path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_and_list() {
        let store = InMemoryStore::new(json!({
            "embeddings": { "Ana Reyes": [0.1, 0.2], "Ben": [0.3] },
            "logs": { "Ben": { "2025-02": { "01": { "AM_IN": "08:00 AM" } } } }
        }));

        let mut ids = store.list_entity_ids("embeddings").await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["Ana Reyes", "Ben"]);

        let record = store.read_record("logs/Ben/2025-02/01").await.unwrap();
        assert_eq!(record, Some(json!({ "AM_IN": "08:00 AM" })));

        assert_eq!(store.read_record("logs/Ana Reyes/2025-02").await.unwrap(), None);
        assert!(store.list_entity_ids("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_creates_parents() {
        let store = InMemoryStore::default();
        store.set("logs/Ana/2025-03", json!({ "02": { "PM_IN": "01:00 PM" } })).await;
        store.set("/embeddings/Ana/", json!(true)).await;

        assert_eq!(store.list_entity_ids("embeddings").await.unwrap(), vec!["Ana"]);
        assert_eq!(
            store.read_record("logs/Ana/2025-03/02/PM_IN").await.unwrap(),
            Some(json!("01:00 PM"))
        );
    }
}
