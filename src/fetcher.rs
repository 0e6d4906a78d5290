use std::path::Path;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::error::ScopeError;
use crate::program::ProgramHandle;

/// What came back for the scope export. The body is saved regardless of
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub url: String,
    pub status: u16,
    pub bytes: u64,
    pub content_type: Option<String>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ScopeSource: Send + Sync {
    async fn fetch_scope_export(
        &self,
        program: &ProgramHandle,
        dest: &Path,
    ) -> Result<ExportReport, ScopeError>;

    /// Returns the number of bytes written.
    async fn fetch_proxy_config(
        &self,
        program: &ProgramHandle,
        dest: &Path,
    ) -> Result<u64, ScopeError>;

    fn profile_url(&self, program: &ProgramHandle) -> String;
}

pub struct HackerOneClient {
    base_url: String,
    export: Client,
    download: Client,
}

impl HackerOneClient {
    pub fn new(config: &HttpConfig) -> Result<Self, ScopeError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ScopeError::Config(format!("header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ScopeError::Config(format!("header value for {name}: {e}")))?;
            headers.insert(name, value);
        }
        let export = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;
        let download = Client::builder().build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            export,
            download,
        })
    }

    pub fn export_url(&self, program: &ProgramHandle) -> String {
        format!(
            "{}/teams/{program}/assets/download_csv.csv",
            self.base_url
        )
    }

    pub fn proxy_config_url(&self, program: &ProgramHandle) -> String {
        format!(
            "{}/teams/{program}/assets/download_burp_project_file.json",
            self.base_url
        )
    }
}

fn map_export_error(url: &str, err: reqwest::Error) -> ScopeError {
    if err.is_timeout() {
        ScopeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScopeError::Http(err)
    }
}

#[async_trait]
impl ScopeSource for HackerOneClient {
    async fn fetch_scope_export(
        &self,
        program: &ProgramHandle,
        dest: &Path,
    ) -> Result<ExportReport, ScopeError> {
        let url = self.export_url(program);
        debug!("GET {url}");
        let response = self
            .export
            .get(&url)
            .send()
            .await
            .map_err(|e| map_export_error(&url, e))?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !status.is_success() {
            warn!("GET {url} returned {status}, saving body anyway");
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| map_export_error(&url, e))?;
        tokio::fs::write(dest, &body)
            .await
            .map_err(|e| ScopeError::io(dest, e))?;
        info!("saved scope export ({} bytes) to {}", body.len(), dest.display());
        Ok(ExportReport {
            url,
            status: status.as_u16(),
            bytes: body.len() as u64,
            content_type,
        })
    }

    async fn fetch_proxy_config(
        &self,
        program: &ProgramHandle,
        dest: &Path,
    ) -> Result<u64, ScopeError> {
        let url = self.proxy_config_url(program);
        debug!("GET {url}");
        let mut response = self.download.get(&url).send().await?.error_for_status()?;
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ScopeError::io(dest, e))?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| ScopeError::io(dest, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| ScopeError::io(dest, e))?;
        info!("saved proxy config ({written} bytes) to {}", dest.display());
        Ok(written)
    }

    fn profile_url(&self, program: &ProgramHandle) -> String {
        program.profile_url(&self.base_url)
    }
}
