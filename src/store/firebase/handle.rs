use super::actor::{FirebaseActor, FirebaseActorHandle};
use crate::config::Config;
use crate::error::{config_error, DtrResult};
use crate::store::RecordStore;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Record store backed by a Firebase Realtime Database REST endpoint
#[derive(Clone)]
pub struct FirebaseStore {
    actor_handle: FirebaseActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl FirebaseStore {
    /// Create a new store and spawn its actor
    pub fn new(config: &Config) -> DtrResult<Self> {
        let base_url = Url::parse(&config.database_url)
            .map_err(|e| config_error(&format!("Invalid FIREBASE_DATABASE_URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let (mut actor, handle) = FirebaseActor::new(client, base_url, config.database_auth.clone());

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Ok(Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        })
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DtrResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl RecordStore for FirebaseStore {
    async fn list_entity_ids(&self, collection_path: &str) -> DtrResult<Vec<String>> {
        self.actor_handle.list_keys(collection_path).await
    }

    async fn read_record(&self, path: &str) -> DtrResult<Option<Value>> {
        self.actor_handle.read_record(path).await
    }
}
