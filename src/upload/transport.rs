use crate::error::{Result, UploadError};
use crate::upload::types::{SelectedFile, UploadResponse, UploadResult};
use crate::utils::server_config::ServerConfig;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

const CHUNK_SIZE: usize = 64 * 1024;
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Receives upload progress for one file, 0..=100.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Performs the network upload of a single file.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload(
        &self,
        file: &SelectedFile,
        on_progress: ProgressCallback,
        multimodal: bool,
    ) -> Result<UploadResult>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ServerConfig,
}

impl HttpTransport {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(config.headers()?)
            .timeout(UPLOAD_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }
}

fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent as u128 * 100) / total as u128).min(100) as u8
}

/// Reads `reader` in chunks, reporting the progress reached once each chunk
/// has been handed to the connection.
fn progress_stream<R>(
    reader: R,
    total: u64,
    reporter: ProgressCallback,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static
where
    R: AsyncRead + Send + Sync + 'static,
{
    let mut sent = 0u64;
    ReaderStream::with_capacity(reader, CHUNK_SIZE).map(move |chunk| {
        let chunk = chunk?;
        sent += chunk.len() as u64;
        reporter(percent(sent, total));
        Ok(chunk)
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(
        &self,
        file: &SelectedFile,
        on_progress: ProgressCallback,
        multimodal: bool,
    ) -> Result<UploadResult> {
        let handle = tokio::fs::File::open(&file.path).await?;
        let length = handle.metadata().await?.len();
        let stream = progress_stream(handle, length, on_progress.clone());

        let part = Part::stream_with_length(Body::wrap_stream(stream), length)
            .file_name(file.name.clone())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", part)
            .text("enable_multimodal", multimodal.to_string());

        let response = self
            .client
            .post(self.config.endpoint("/documents/upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::from_response(status, body));
        }

        if length == 0 {
            on_progress(100);
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.into())
    }
}
