//! Settings structures for es-scroll configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching es-scroll's settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (ES_SCROLL_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ES_SCROLL_URL") {
            self.search.url = Some(val);
        }
        if let Ok(val) = std::env::var("ES_SCROLL_BODY") {
            self.search.body = Some(val);
        }
        if let Ok(val) = std::env::var("ES_SCROLL_USER_AGENT") {
            self.outgoing.useragent = Some(val);
        }
        if let Ok(val) = std::env::var("ES_SCROLL_POOL_MAXSIZE") {
            if let Ok(size) = val.parse() {
                self.outgoing.pool_maxsize = size;
            }
        }
    }
}

/// Default query settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Query URL, e.g. `http://localhost:9200/companydatabase/_search`
    pub url: Option<String>,
    /// Raw JSON query body
    pub body: Option<String>,
}

impl SearchSettings {
    /// Query body, ignoring a blank one
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Seconds before an idle connection is closed (none = reqwest default)
    pub pool_idle_timeout: Option<f64>,
    /// User agent string (none = es-scroll/<version>)
    pub useragent: Option<String>,
    /// Accept gzip-compressed responses
    pub gzip: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            pool_maxsize: 20,
            pool_idle_timeout: None,
            useragent: None,
            gzip: true,
        }
    }
}

impl OutgoingSettings {
    pub fn user_agent(&self) -> String {
        self.useragent
            .clone()
            .unwrap_or_else(|| format!("es-scroll/{}", crate::VERSION))
    }
}
