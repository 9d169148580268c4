use async_trait::async_trait;
use serde_json::Value;

use crate::config::{NotionConfig, NotionCredentials};
use crate::error::RelayError;

use super::page::NewPage;
use super::{CreatedPage, PageSink};

pub struct NotionClient {
    client: reqwest::Client,
    pages_url: String,
    version: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            pages_url: format!("{}/v1/pages", config.api_base.trim_end_matches('/')),
            version: config.version.clone(),
        })
    }
}

#[async_trait]
impl PageSink for NotionClient {
    async fn create_page(
        &self,
        credentials: &NotionCredentials,
        page: &NewPage,
    ) -> Result<CreatedPage, RelayError> {
        let resp = self
            .client
            .post(&self.pages_url)
            .bearer_auth(&credentials.token)
            .header("Notion-Version", &self.version)
            .json(page)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            // Non-JSON error bodies are relayed as a plain string.
            let payload = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            return Err(RelayError::Remote { status, payload });
        }

        let created: CreatedPage = serde_json::from_str(&text).map_err(|e| {
            RelayError::Transport(format!("Unexpected response from Notion: {e}"))
        })?;

        if created.id.is_empty() {
            return Err(RelayError::Transport(
                "Notion response did not include a page id".to_string(),
            ));
        }

        Ok(created)
    }
}
