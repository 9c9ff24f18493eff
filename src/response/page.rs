//! One page of search results

use super::Hit;
use crate::error::{ClientError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// A decoded response to an initial search or a scroll continuation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WirePage", into = "WirePage")]
pub struct Page {
    /// Scroll cursor token, present only when the service allocated one
    pub scroll_id: Option<String>,
    /// Whether the service timed out while collecting this page
    pub timed_out: bool,
    /// Total number of matching documents
    pub total: u64,
    /// Hits in relevance order as returned by the service
    pub hits: Vec<Hit>,
}

impl Page {
    /// Decode a response body
    ///
    /// A blank body is a protocol violation, not an empty page.
    pub fn parse(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(serde_json::from_str(body)?)
    }

    /// Scroll token, ignoring a blank one
    pub fn cursor(&self) -> Option<&str> {
        self.scroll_id
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// Whether this page can be advanced
    pub fn has_cursor(&self) -> bool {
        self.cursor().is_some()
    }

    /// An empty page marks the end of a scroll
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
    }
}

/// Top-level wire shape
#[derive(Serialize, Deserialize)]
struct WirePage {
    #[serde(rename = "_scroll_id", default, skip_serializing_if = "Option::is_none")]
    scroll_id: Option<String>,
    #[serde(default)]
    timed_out: bool,
    #[serde(default)]
    hits: WireHits,
}

#[derive(Default, Serialize, Deserialize)]
struct WireHits {
    #[serde(default, deserialize_with = "deserialize_total")]
    total: u64,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// Older services report a bare count, newer ones `{"value": n, "relation": "eq"}`
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTotal {
    Count(u64),
    Object { value: u64 },
}

fn deserialize_total<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<WireTotal>::deserialize(deserializer)? {
        Some(WireTotal::Count(count)) | Some(WireTotal::Object { value: count }) => count,
        None => 0,
    })
}

impl From<WirePage> for Page {
    fn from(wire: WirePage) -> Self {
        Self {
            scroll_id: wire.scroll_id,
            timed_out: wire.timed_out,
            total: wire.hits.total,
            hits: wire.hits.hits,
        }
    }
}

impl From<Page> for WirePage {
    fn from(page: Page) -> Self {
        Self {
            scroll_id: page.scroll_id,
            timed_out: page.timed_out,
            hits: WireHits {
                total: page.total,
                hits: page.hits,
            },
        }
    }
}
