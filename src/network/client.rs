//! reqwest-backed transport

use super::request::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::OutgoingSettings;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper shared by every scroll client of a process
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    ///
    /// No client-wide timeout is set; only requests carrying their own timeout
    /// are bounded.
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(settings.gzip);

        if let Some(idle) = settings.pool_idle_timeout {
            builder = builder.pool_idle_timeout(Duration::from_secs_f64(idle));
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings.user_agent(),
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut req_builder = self
            .client
            .request(method, &request.url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }
}
