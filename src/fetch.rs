use std::path::Path;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::config::Settings;
use crate::error::{Result, ScrapeError};

/// HTTP access for the pipeline. One request at a time, no retries.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        // Connect and per-read limits only: a slow but steady download is never cut off.
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Fetcher { client })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// Fetch the whole body of a page. An empty body counts as a failure.
    pub async fn fetch_page(&self, url: &Url) -> Result<Vec<u8>> {
        let start = Instant::now();
        let body = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        if body.is_empty() {
            return Err(ScrapeError::EmptyBody {
                url: url.to_string(),
            });
        }
        debug!(
            "Fetched {} bytes from {} in {}ms",
            body.len(),
            url,
            start.elapsed().as_millis()
        );
        Ok(body.to_vec())
    }

    /// Stream `url` into `path` chunk by chunk and return the number of bytes written.
    /// The file is only created once the server has answered with a success status,
    /// and is removed again if the transfer breaks off.
    pub async fn download(&self, url: &Url, path: &Path) -> Result<u64> {
        let response = self.get(url).await?;
        let pb = progress_bar(response.content_length());

        let written = match write_body(response, url, path, &pb).await {
            Ok(n) => n,
            Err(e) => {
                pb.abandon();
                let _ = tokio::fs::remove_file(path).await;
                return Err(e);
            }
        };

        pb.finish_and_clear();
        info!("Downloaded {:?} ({} bytes)", path, written);
        Ok(written)
    }
}

async fn write_body(
    mut response: reqwest::Response,
    url: &Url,
    path: &Path,
    pb: &ProgressBar,
) -> Result<u64> {
    let mut file = File::create(path)
        .await
        .map_err(|e| ScrapeError::io(path, e))?;
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await.map_err(|source| ScrapeError::Http {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk)
            .await
            .map_err(|e| ScrapeError::io(path, e))?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }

    file.flush().await.map_err(|e| ScrapeError::io(path, e))?;
    Ok(written)
}

fn progress_bar(len: Option<u64>) -> ProgressBar {
    match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {bytes}/{total_bytes} ({bytes_per_sec})")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    }
}
