use super::events::UploadEvent;
use crate::error::{Result, UploadError};
use crate::utils::server_config::ServerConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Bounds how long a batch waits on the listing before it can finish.
const REFRESH_TIMEOUT: Duration = Duration::from_secs(5);

/// Reloads whatever listing depends on freshly ingested documents.
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

#[derive(Deserialize)]
struct DocumentsResponse {
    #[serde(default)]
    statuses: HashMap<String, Vec<serde_json::Value>>,
}

/// Document counts per processing status, as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub counts: BTreeMap<String, usize>,
}

impl DocumentSummary {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl From<DocumentsResponse> for DocumentSummary {
    fn from(response: DocumentsResponse) -> Self {
        Self {
            counts: response
                .statuses
                .into_iter()
                .map(|(status, docs)| (status.to_lowercase(), docs.len()))
                .collect(),
        }
    }
}

/// Fetches `GET /documents` and publishes the summary to the dialog.
pub struct DocumentsRefresher {
    client: Client,
    config: ServerConfig,
    sender: Sender<UploadEvent>,
}

impl DocumentsRefresher {
    pub fn new(config: ServerConfig, sender: Sender<UploadEvent>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(config.headers()?)
            .timeout(REFRESH_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            config,
            sender,
        })
    }

    pub async fn fetch(&self) -> Result<DocumentSummary> {
        let response = self
            .client
            .get(self.config.endpoint("/documents"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::from_response(status, body));
        }

        let body: DocumentsResponse = response.json().await?;
        Ok(body.into())
    }
}

#[async_trait]
impl Refresher for DocumentsRefresher {
    async fn refresh(&self) -> Result<()> {
        let summary = self.fetch().await?;
        log::info!("Document list refreshed: {} documents", summary.total());
        self.sender
            .send(UploadEvent::DocumentsRefreshed(summary))
            .map_err(|_| UploadError::ChannelClosed)
    }
}
