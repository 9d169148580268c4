pub mod client;
pub mod page;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::NotionCredentials;
use crate::error::RelayError;

pub use client::NotionClient;
pub use page::NewPage;

/// The subset of Notion's page object we read back.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}

/// Destination for new reward pages.
#[async_trait]
pub trait PageSink: Send + Sync {
    async fn create_page(
        &self,
        credentials: &NotionCredentials,
        page: &NewPage,
    ) -> Result<CreatedPage, RelayError>;
}
