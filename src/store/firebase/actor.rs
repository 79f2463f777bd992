use crate::error::{store_error, DtrResult};
use crate::store::child_keys;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

/// The realtime database actor that performs REST reads
pub struct FirebaseActor {
    rest: RestReader,
    command_rx: mpsc::Receiver<FirebaseCommand>,
}

/// Pooled REST client and the database it reads from
#[derive(Clone)]
struct RestReader {
    client: Client,
    base_url: Url,
    auth: Option<String>,
}

/// Commands that can be sent to the realtime database actor
pub enum FirebaseCommand {
    ListKeys(String, mpsc::Sender<DtrResult<Vec<String>>>),
    ReadRecord(String, mpsc::Sender<DtrResult<Option<Value>>>),
    Shutdown,
}

/// Handle for communicating with the realtime database actor
#[derive(Clone)]
pub struct FirebaseActorHandle {
    command_tx: mpsc::Sender<FirebaseCommand>,
}

impl FirebaseActorHandle {
    /// List the child keys of a collection
    pub async fn list_keys(&self, path: &str) -> DtrResult<Vec<String>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(FirebaseCommand::ListKeys(path.to_string(), response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Read the value stored at a path
    pub async fn read_record(&self, path: &str) -> DtrResult<Option<Value>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(FirebaseCommand::ReadRecord(path.to_string(), response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DtrResult<()> {
        let _ = self.command_tx.send(FirebaseCommand::Shutdown).await;
        Ok(())
    }
}

impl FirebaseActor {
    /// Create a new actor and return its handle
    pub fn new(client: Client, base_url: Url, auth: Option<String>) -> (Self, FirebaseActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            rest: RestReader {
                client,
                base_url,
                auth,
            },
            command_rx,
        };

        let handle = FirebaseActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Realtime database actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                // Reads run in their own task so a slow one doesn't block the mailbox
                FirebaseCommand::ListKeys(path, response_tx) => {
                    let rest = self.rest.clone();
                    tokio::spawn(async move {
                        let result = rest.list_keys(&path).await;
                        let _ = response_tx.send(result).await;
                    });
                }
                FirebaseCommand::ReadRecord(path, response_tx) => {
                    let rest = self.rest.clone();
                    tokio::spawn(async move {
                        let result = rest.read_record(&path).await;
                        let _ = response_tx.send(result).await;
                    });
                }
                FirebaseCommand::Shutdown => {
                    info!("Realtime database actor shutting down");
                    break;
                }
            }
        }

        info!("Realtime database actor shut down");
    }
}

impl RestReader {
    async fn list_keys(&self, path: &str) -> DtrResult<Vec<String>> {
        let url = rest_url(&self.base_url, path, true, self.auth.as_deref())?;
        let value = self.get_json(url).await?;

        if !(value.is_null() || value.is_object() || value.is_array()) {
            warn!("Expected a collection at '{}', found a scalar", path);
        }

        Ok(child_keys(&value))
    }

    async fn read_record(&self, path: &str) -> DtrResult<Option<Value>> {
        let url = rest_url(&self.base_url, path, false, self.auth.as_deref())?;
        let value = self.get_json(url).await?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn get_json(&self, url: Url) -> DtrResult<Value> {
        // The query string may carry a credential, only log the path
        debug!("GET {}", url.path());

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(store_error(&format!(
                "Database request failed with status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// REST URL of a database path, e.g. `<base>/logs/Ana%20Reyes/2025-02.json`
pub fn rest_url(base: &Url, path: &str, shallow: bool, auth: Option<&str>) -> DtrResult<Url> {
    let mut url = base.clone();
    url.set_query(None);

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    {
        let mut parts = url
            .path_segments_mut()
            .map_err(|_| store_error(&format!("Database URL cannot be a base: {}", base)))?;
        parts.pop_if_empty();
        match segments.split_last() {
            Some((last, rest)) => {
                parts.extend(rest);
                parts.push(&format!("{}.json", last));
            }
            None => {
                parts.push(".json");
            }
        }
    }

    if shallow || auth.is_some() {
        let mut query = url.query_pairs_mut();
        if shallow {
            query.append_pair("shallow", "true");
        }
        if let Some(auth) = auth {
            query.append_pair("auth", auth);
        }
    }

    Ok(url)
}
