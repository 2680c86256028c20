//! Page publishing.
//!
//! [`Publisher`] turns a [`PageRequest`] into exactly one `POST /pages` call
//! and maps the response to a [`PublishResult`]. There are no retries: every
//! failure ends the attempt and is returned to the caller.

use std::time::Duration;

use tracing::{info, warn};

use crate::auth::ApiToken;
use crate::client::{Transport, UreqTransport};
use crate::error::{ApiError, NotionError};
use crate::types::{CreatedPage, PageRequest};

/// Outcome of one publish attempt.
pub type PublishResult = Result<CreatedPage, NotionError>;

/// Endpoint and protocol settings for the publisher.
#[derive(Debug, Clone)]
pub struct PublisherSettings {
    /// API base URL without trailing slash, e.g. `https://api.notion.com/v1`.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub api_version: String,
}

/// Creates Notion pages through a [`Transport`].
pub struct Publisher<T> {
    transport: T,
    token: ApiToken,
    settings: PublisherSettings,
}

impl Publisher<UreqTransport> {
    /// Create a publisher over HTTP from config values.
    ///
    /// # Arguments
    /// * `base_url` - Notion API base URL
    /// * `api_version` - pinned `Notion-Version` header value
    /// * `token` - integration token
    /// * `timeout` - bound for the whole request
    pub fn from_config(
        base_url: &str,
        api_version: &str,
        token: ApiToken,
        timeout: Duration,
    ) -> Self {
        Self::new(
            UreqTransport::new(timeout),
            token,
            PublisherSettings {
                base_url: base_url.to_owned(),
                api_version: api_version.to_owned(),
            },
        )
    }
}

impl<T: Transport> Publisher<T> {
    /// Create a publisher with an explicit transport.
    pub fn new(transport: T, token: ApiToken, mut settings: PublisherSettings) -> Self {
        settings.base_url = settings.base_url.trim_end_matches('/').to_owned();
        Self {
            transport,
            token,
            settings,
        }
    }

    /// Create the page described by `request` in its parent database.
    ///
    /// The request is validated first; an invalid request never reaches the
    /// network.
    ///
    /// # Errors
    ///
    /// - [`NotionError::InvalidRequest`] if the payload violates API limits
    /// - [`NotionError::Transport`] if no response was received
    /// - [`NotionError::Rejected`] for any status other than 200
    /// - [`NotionError::Decode`] if a 200 body is not a JSON object
    ///
    /// A 200 always means the page was created, so missing `id` or `url`
    /// fields still yield `Ok`.
    pub fn publish(&self, request: &PageRequest) -> PublishResult {
        request.validate()?;

        let url = self.pages_url();
        let payload = serde_json::to_vec(request)?;
        let authorization = self.token.bearer();
        let headers = [
            ("Authorization", authorization.as_str()),
            ("Content-Type", "application/json"),
            ("Notion-Version", self.settings.api_version.as_str()),
        ];

        info!(
            "Creating page in database {} ({} blocks, {} bytes)",
            request.database_id(),
            request.children.len(),
            payload.len()
        );

        let response = self.transport.post(&url, &headers, &payload)?;

        if response.status != 200 {
            warn!("Page creation rejected with status {}", response.status);
            let api = ApiError::parse(&response.body);
            return Err(NotionError::Rejected {
                status: response.status,
                body: response.body,
                api,
            });
        }

        let page: CreatedPage = serde_json::from_str(&response.body).map_err(|source| {
            NotionError::Decode {
                body: response.body.clone(),
                source,
            }
        })?;
        match &page.id {
            Some(id) => info!("Created page {id}"),
            None => warn!("Page created but the response carried no id"),
        }
        Ok(page)
    }

    /// Full URL of the create-page endpoint.
    fn pages_url(&self) -> String {
        format!("{}/pages", self.settings.base_url)
    }
}
