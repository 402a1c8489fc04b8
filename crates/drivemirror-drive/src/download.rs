//! Chunked downloads from Drive
//!
//! Raw media is fetched with ranged `GET /files/{id}?alt=media` requests,
//! one chunk per call. Exports use `GET /files/{id}/export`, which the API
//! answers with the whole converted body in one response.
//!
//! ## Response Handling
//!
//! - `206 Partial Content`: one chunk; the `Content-Range` total drives progress.
//! - `200 OK`: the server ignored the range and sent the whole body; done.
//! - `416 Range Not Satisfiable` on the first chunk: the file is empty; done.
//!   Without a known total, a later 416 means the previous chunk ended
//!   exactly at the end of the file; done.
//! - Anything else is an error for this file.

use anyhow::{bail, Context, Result};
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::{Method, StatusCode};
use tracing::debug;

use drivemirror_core::domain::RemoteId;
use drivemirror_core::ports::{DownloadChunk, DownloadKind, IChunkedDownload};

use crate::client::DriveClient;
use crate::DriveError;

/// Parses the total size out of a `Content-Range` header value
///
/// Returns None for an unknown total (`bytes 0-9/*`) or a malformed value.
pub fn parse_content_range(value: &str) -> Option<u64> {
    let rest = value.trim().strip_prefix("bytes")?.trim_start();
    let (_, total) = rest.split_once('/')?;
    total.trim().parse().ok()
}

/// A download in progress for one file
pub struct ChunkedDownload {
    client: DriveClient,
    file_id: RemoteId,
    kind: DownloadKind,
    position: u64,
    total: Option<u64>,
    done: bool,
}

impl ChunkedDownload {
    /// Prepares a download; no request is made until the first chunk
    pub fn new(client: DriveClient, file_id: RemoteId, kind: DownloadKind) -> Self {
        Self {
            client,
            file_id,
            kind,
            position: 0,
            total: None,
            done: false,
        }
    }

    fn request(&self) -> reqwest::RequestBuilder {
        match &self.kind {
            DownloadKind::Media => {
                let end = self
                    .position
                    .saturating_add(self.client.chunk_size() - 1);
                self.client
                    .request(Method::GET, &format!("/files/{}", self.file_id))
                    .query(&[("alt", "media")])
                    .query(&self.shared_drive_params())
                    .header(RANGE, format!("bytes={}-{}", self.position, end))
            }
            DownloadKind::Export { mime_type } => self
                .client
                .request(Method::GET, &format!("/files/{}/export", self.file_id))
                .query(&[("mimeType", mime_type.as_str())]),
        }
    }

    fn shared_drive_params(&self) -> Vec<(&'static str, &'static str)> {
        if self.client.include_shared_drives() {
            vec![("supportsAllDrives", "true")]
        } else {
            Vec::new()
        }
    }

    fn finish(&mut self, data: Vec<u8>) -> DownloadChunk {
        self.position += data.len() as u64;
        self.done = true;
        DownloadChunk {
            data,
            progress: 1.0,
            done: true,
        }
    }
}

#[async_trait::async_trait]
impl IChunkedDownload for ChunkedDownload {
    async fn next_chunk(&mut self) -> Result<DownloadChunk> {
        if self.done {
            bail!("download of {} already complete", self.file_id);
        }

        let response = self
            .request()
            .send()
            .await
            .map_err(DriveError::from)
            .context("Failed to send download request")?;
        let status = response.status();

        match status {
            StatusCode::RANGE_NOT_SATISFIABLE if self.position == 0 => {
                debug!(file_id = %self.file_id, "Empty file");
                Ok(self.finish(Vec::new()))
            }
            StatusCode::RANGE_NOT_SATISFIABLE if self.total.is_none() => {
                debug!(
                    file_id = %self.file_id,
                    position = self.position,
                    "Range past end of file"
                );
                Ok(self.finish(Vec::new()))
            }
            StatusCode::OK if self.position > 0 => bail!(DriveError::InvalidResponse(format!(
                "range ignored after offset {}",
                self.position
            ))),
            StatusCode::OK => {
                let data = response
                    .bytes()
                    .await
                    .context("Failed to read download body")?
                    .to_vec();
                debug!(file_id = %self.file_id, bytes = data.len(), "Received whole body");
                Ok(self.finish(data))
            }
            StatusCode::PARTIAL_CONTENT => {
                let total = response
                    .headers()
                    .get(CONTENT_RANGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_content_range);
                let data = response
                    .bytes()
                    .await
                    .context("Failed to read download chunk")?
                    .to_vec();

                if data.is_empty() {
                    bail!(DriveError::InvalidResponse(format!(
                        "empty chunk at offset {}",
                        self.position
                    )));
                }

                self.position += data.len() as u64;
                if total.is_some() {
                    self.total = total;
                }

                let done = match self.total {
                    Some(total) => self.position >= total,
                    None => (data.len() as u64) < self.client.chunk_size(),
                };
                let progress = match self.total {
                    _ if done => 1.0,
                    Some(total) if total > 0 => self.position as f64 / total as f64,
                    _ => 0.0,
                };
                self.done = done;

                debug!(
                    file_id = %self.file_id,
                    position = self.position,
                    total = ?self.total,
                    progress,
                    "Received chunk"
                );

                Ok(DownloadChunk {
                    data,
                    progress,
                    done,
                })
            }
            _ => {
                let err = DriveError::from_response(response).await;
                Err(err).with_context(|| format!("Download returned status {}", status.as_u16()))
            }
        }
    }
}
