use std::time::Duration;

use crate::models::WhitePaper;

use super::ExportError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches documents from a running THPU API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ExportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_whitepaper(&self) -> Result<WhitePaper, ExportError> {
        let url = format!("{}/whitepaper", self.base_url);
        tracing::debug!("Fetching white paper from {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<WhitePaper>().await?)
    }
}
