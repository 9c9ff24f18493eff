//! Search and scroll requests

use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};
use crate::network::{
    HttpClient, HttpRequest, HttpResponse, Transport, CONTENT_TYPE_JSON, CONTENT_TYPE_JSON_UTF8,
};
use crate::response::Page;
use crate::{PING_TIMEOUT, SCROLL_KEEP_ALIVE};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body of a scroll continuation request
#[derive(Serialize)]
struct ScrollRequest<'a> {
    scroll: &'a str,
    scroll_id: &'a str,
}

/// Client for one logical search against one endpoint
///
/// The client holds no per-search state: every page carries its own cursor, so a
/// single client may drive several independent scrolls at once.
pub struct ScrollClient {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    query_body: Option<String>,
}

impl ScrollClient {
    /// Create a client with its own reqwest transport
    pub fn new(query_url: &str, query_body: Option<&str>) -> Result<Self> {
        let transport = Arc::new(HttpClient::new()?);
        Self::with_transport(query_url, query_body, transport)
    }

    /// Create a client on a shared transport
    ///
    /// A blank query body is treated as no body.
    pub fn with_transport(
        query_url: &str,
        query_body: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            endpoint: Endpoint::parse(query_url)?,
            query_body: query_body
                .filter(|body| !body.trim().is_empty())
                .map(|body| body.to_string()),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn query_body(&self) -> Option<&str> {
        self.query_body.as_deref()
    }

    /// Check that the resource answers a HEAD request within three seconds
    pub async fn ping(&self) -> Result<()> {
        let request = HttpRequest::head(self.endpoint.base()).timeout(PING_TIMEOUT);
        self.send(request).await?;
        Ok(())
    }

    /// Run the query once, without allocating a scroll cursor
    pub async fn search(&self) -> Result<Page> {
        self.initial_search(false).await
    }

    /// Run the query and ask the service for a scroll cursor
    pub async fn search_with_cursor(&self) -> Result<Page> {
        self.initial_search(true).await
    }

    /// Fetch the page following `page`
    ///
    /// Fails with [`ClientError::CursorRequired`] before any request when `page`
    /// carries no scroll token. Each advance re-arms the cursor for another minute.
    pub async fn advance(&self, page: &Page) -> Result<Page> {
        self.scroll(page.cursor()).await
    }

    async fn initial_search(&self, with_cursor: bool) -> Result<Page> {
        let mut request = HttpRequest::get(self.endpoint.search_url(with_cursor));
        if let Some(body) = &self.query_body {
            request = request.body(CONTENT_TYPE_JSON, body.as_str());
        }

        let response = self.send(request).await?;
        Page::parse(&response.text)
    }

    pub(crate) async fn scroll(&self, scroll_id: Option<&str>) -> Result<Page> {
        let scroll_id = scroll_id
            .filter(|token| !token.trim().is_empty())
            .ok_or(ClientError::CursorRequired)?;

        let body = serde_json::to_string(&ScrollRequest {
            scroll: SCROLL_KEEP_ALIVE,
            scroll_id,
        })?;
        let request =
            HttpRequest::post(self.endpoint.scroll_url()).body(CONTENT_TYPE_JSON_UTF8, body);

        let response = self.send(request).await?;
        Page::parse(&response.text)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        debug!("Sending {:?} {}", request.method, url);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            warn!("HTTP error {} from {}", response.status, url);
            return Err(ClientError::Status {
                status: response.status,
                url,
            });
        }

        Ok(response)
    }
}
