//! Endpoint resolution
//!
//! Turns a single query URL (for example `http://localhost:9200/people/_search?size=100`)
//! into the two request targets the scroll protocol needs: the per-index search URL and
//! the service-wide scroll continuation URL.

use crate::error::Result;
use crate::SCROLL_KEEP_ALIVE;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Path segment of the search route
pub const SEARCH_ROUTE: &str = "_search";

/// Path segment of the scroll continuation route, below [`SEARCH_ROUTE`]
pub const SCROLL_ROUTE: &str = "scroll";

/// A search endpoint split into its resource base and its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Scheme, host and resource path, never ending in the search route
    base: Url,
    /// Original query string without the leading `?`
    query: Option<String>,
}

impl Endpoint {
    /// Parse a query URL, stripping trailing `_search` segments (any case)
    pub fn parse(url: &str) -> Result<Self> {
        let mut base = Url::parse(url)?;
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let query = base
            .query()
            .filter(|q| !q.is_empty())
            .map(|q| q.to_string());
        base.set_query(None);
        base.set_fragment(None);

        if let Ok(mut segments) = base.path_segments_mut() {
            segments.pop_if_empty();
        }

        while ends_with_search(&base) {
            if let Ok(mut segments) = base.path_segments_mut() {
                segments.pop();
            }
        }

        Ok(Self { base, query })
    }

    /// Resource base path, e.g. `http://localhost:9200/people`
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Original query string, if any
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// URL of the initial search request
    ///
    /// With `with_cursor` set, `scroll=1m` is appended to the original query string so
    /// the service allocates a scroll cursor, unless that query already names a scroll
    /// lifetime. The stored query is never modified, so repeated calls produce the
    /// same URL.
    pub fn search_url(&self, with_cursor: bool) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(SEARCH_ROUTE);
        }

        let query = match (self.query(), with_cursor) {
            (Some(query), true) if has_scroll_param(query) => Some(query.to_string()),
            (Some(query), true) => Some(format!("{}&scroll={}", query, SCROLL_KEEP_ALIVE)),
            (Some(query), false) => Some(query.to_string()),
            (None, true) => Some(format!("scroll={}", SCROLL_KEEP_ALIVE)),
            (None, false) => None,
        };
        url.set_query(query.as_deref());

        url.into()
    }

    /// URL of the scroll continuation request
    ///
    /// The scroll route is service-wide, so the last segment of the base path is
    /// dropped: `http://host/root/people` becomes `http://host/root/_search/scroll`.
    /// This assumes that last segment is the index name; a base with extra trailing
    /// segments (e.g. behind a path-prefixed gateway) yields a wrong URL.
    pub fn scroll_url(&self) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .pop()
                .push(SEARCH_ROUTE)
                .push(SCROLL_ROUTE);
        }
        url.into()
    }
}

fn ends_with_search(url: &Url) -> bool {
    url.path_segments()
        .and_then(|segments| segments.last())
        .is_some_and(|last| last.eq_ignore_ascii_case(SEARCH_ROUTE))
}

fn has_scroll_param(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "scroll")
}

impl FromStr for Endpoint {
    type Err = crate::error::ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_search_suffix() {
        let endpoint = Endpoint::parse("http://localhost:9200/companydatabase/_search").unwrap();
        assert_eq!(endpoint.base(), "http://localhost:9200/companydatabase");
        assert_eq!(endpoint.query(), None);
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/_SEARCH/").unwrap();
        assert_eq!(endpoint.base(), "http://localhost:9200/people");
    }

    #[test]
    fn test_base_without_suffix() {
        let endpoint = Endpoint::parse("http://localhost:9200/people?size=5").unwrap();
        assert_eq!(endpoint.base(), "http://localhost:9200/people");
        assert_eq!(endpoint.query(), Some("size=5"));
    }

    #[test]
    fn test_search_url_reappends_suffix_once() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/_search?size=5").unwrap();
        let url = endpoint.search_url(false);
        assert_eq!(url, "http://localhost:9200/people/_search?size=5");

        let again = Endpoint::parse(&url).unwrap().search_url(false);
        assert_eq!(again, url);
    }

    #[test]
    fn test_search_url_single_separator() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/").unwrap();
        assert_eq!(endpoint.search_url(false), "http://localhost:9200/people/_search");
    }

    #[test]
    fn test_search_url_with_cursor() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/_search").unwrap();
        assert_eq!(
            endpoint.search_url(true),
            "http://localhost:9200/people/_search?scroll=1m"
        );

        let endpoint = Endpoint::parse("http://localhost:9200/people/_search?size=5").unwrap();
        assert_eq!(
            endpoint.search_url(true),
            "http://localhost:9200/people/_search?size=5&scroll=1m"
        );
    }

    #[test]
    fn test_cursor_param_never_duplicated() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/_search?size=5").unwrap();
        let first = endpoint.search_url(true);
        let second = endpoint.search_url(true);
        assert_eq!(first, second);
        assert_eq!(second.matches("scroll=").count(), 1);
        assert_eq!(endpoint.search_url(false), "http://localhost:9200/people/_search?size=5");
    }

    #[test]
    fn test_existing_scroll_param_kept() {
        let endpoint = Endpoint::parse("http://localhost:9200/people/_search?scroll=1m").unwrap();
        assert_eq!(
            endpoint.search_url(true),
            "http://localhost:9200/people/_search?scroll=1m"
        );

        let endpoint =
            Endpoint::parse("http://localhost:9200/people/_search?size=5&scroll=5m").unwrap();
        let url = endpoint.search_url(true);
        assert_eq!(url, "http://localhost:9200/people/_search?size=5&scroll=5m");
        assert_eq!(url.matches("scroll=").count(), 1);
    }

    #[test]
    fn test_repeated_suffix_stripped() {
        let endpoint = Endpoint::parse("http://localhost:9200/idx/_search/_Search").unwrap();
        assert_eq!(endpoint.base(), "http://localhost:9200/idx");
        assert_eq!(endpoint.search_url(false), "http://localhost:9200/idx/_search");
        assert_eq!(endpoint.scroll_url(), "http://localhost:9200/_search/scroll");
    }

    #[test]
    fn test_scroll_url() {
        let endpoint = Endpoint::parse("http://host/root/collection/_search").unwrap();
        assert_eq!(endpoint.scroll_url(), "http://host/root/_search/scroll");

        let endpoint = Endpoint::parse("http://localhost:9200/companydatabase/_search?q=x").unwrap();
        assert_eq!(endpoint.scroll_url(), "http://localhost:9200/_search/scroll");
    }

    #[test]
    fn test_scroll_url_without_index() {
        let endpoint = Endpoint::parse("http://localhost:9200/").unwrap();
        assert_eq!(endpoint.scroll_url(), "http://localhost:9200/_search/scroll");
    }

    #[test]
    fn test_fragment_dropped() {
        let endpoint: Endpoint = "http://localhost:9200/people/_search?q=a#frag".parse().unwrap();
        assert_eq!(endpoint.to_string(), "http://localhost:9200/people");
        assert_eq!(endpoint.search_url(false), "http://localhost:9200/people/_search?q=a");
    }

    #[test]
    fn test_invalid_url() {
        assert!(Endpoint::parse("not a url").is_err());
        assert!(Endpoint::parse("mailto:someone@example.com").is_err());
    }
}
