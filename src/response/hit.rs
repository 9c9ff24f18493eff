//! A single search hit

use crate::error::SourceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One matching document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Document identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Index the document came from
    #[serde(rename = "_index", default)]
    pub index: String,
    /// Document type, empty on services without mapping types
    #[serde(rename = "_type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Relevance score; a `null` score (sorted queries) reads as zero, a negative one is clamped
    #[serde(rename = "_score", default, deserialize_with = "null_as_zero")]
    pub score: f64,
    /// Raw document source, decoded on demand
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl Hit {
    pub fn new(id: impl Into<String>, index: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            index: index.into(),
            kind: String::new(),
            score: 0.0,
            source,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score.max(0.0);
        self
    }

    /// Decode the raw source into `T`
    ///
    /// A string source is read as embedded JSON text.
    pub fn try_parse_source<T: DeserializeOwned>(&self) -> Result<T, SourceError> {
        match &self.source {
            Value::Null => Err(SourceError::Empty),
            Value::String(text) if text.trim().is_empty() => Err(SourceError::Empty),
            Value::String(text) => Ok(serde_json::from_str(text)?),
            value => Ok(T::deserialize(value)?),
        }
    }

    /// Best-effort variant of [`Hit::try_parse_source`]
    ///
    /// Returns `None` for an empty source and for any source that does not fit `T`.
    pub fn parse_source<T: DeserializeOwned>(&self) -> Option<T> {
        match self.try_parse_source() {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Discarding source of hit {}: {}", self.id, e);
                None
            }
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .unwrap_or(0.0)
        .max(0.0))
}
