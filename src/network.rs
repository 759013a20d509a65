use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::models::{ArtworksResponse, FetchEvent, Page};
use crate::pagination::FetchRequest;

pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Thin client for the artworks listing endpoint.
#[derive(Debug, Clone)]
pub struct ArtworksClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArtworksClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("artic-table/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/artworks", self.base_url)
    }

    /// Fetches one page: `GET /artworks?page=<index + 1>&limit=<size>`.
    pub async fn fetch_page(&self, request: FetchRequest) -> Result<Page, FetchError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&request.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), body));
        }

        let parsed: ArtworksResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

/// Runs a fetch on the runtime and reports the outcome on `events`.
/// There is no cancellation: every spawned fetch reports back.
pub fn spawn_fetch(
    handle: &Handle,
    client: ArtworksClient,
    request: FetchRequest,
    events: UnboundedSender<FetchEvent>,
) {
    debug!(page = request.page_index, size = request.page_size, "fetch started");
    handle.spawn(async move {
        let event = match client.fetch_page(request).await {
            Ok(page) => {
                info!(
                    page = request.page_index,
                    size = request.page_size,
                    rows = page.records.len(),
                    total = page.total,
                    "page loaded"
                );
                FetchEvent::Loaded { request, page }
            }
            Err(e) => {
                warn!(
                    page = request.page_index,
                    size = request.page_size,
                    error = %e,
                    "Error fetching data"
                );
                FetchEvent::Failed {
                    request,
                    error: e.to_string(),
                }
            }
        };
        // The receiver is gone only while shutting down.
        let _ = events.send(event);
    });
}
