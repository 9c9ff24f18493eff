//! Scripted transport for client tests

use crate::error::Result;
use crate::network::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request it sees
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Transport answering 200 with each body in turn
    pub fn new(bodies: Vec<String>) -> Arc<Self> {
        Self::with_responses(bodies.into_iter().map(|b| Self::response(200, &b)).collect())
    }

    pub fn with_responses(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn response(status: u16, text: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            text: text.to_string(),
            url: String::new(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        let mut response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::response(500, "script exhausted"));
        response.url = url;
        Ok(response)
    }
}

/// Wire body of a page with `hits` documents, ids prefixed by the token
pub(crate) fn page_body(scroll_id: Option<&str>, hits: usize) -> String {
    let prefix = scroll_id.unwrap_or("doc");
    let hits: Vec<_> = (0..hits)
        .map(|i| {
            json!({
                "_index": "companydatabase",
                "_type": "employees",
                "_id": format!("{}-{}", prefix, i),
                "_score": 1.0,
                "_source": {"FirstName": format!("Person {}", i)}
            })
        })
        .collect();

    let mut body = json!({
        "took": 1,
        "timed_out": false,
        "hits": {"total": 3, "hits": hits}
    });
    if let Some(scroll_id) = scroll_id {
        body["_scroll_id"] = json!(scroll_id);
    }
    body.to_string()
}
