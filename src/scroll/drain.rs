//! Draining a scroll to exhaustion
//!
//! A drain runs one cursor-allocating search, then advances the cursor until the
//! service returns an empty page. Requests are strictly sequential since each scroll
//! token is only known once the previous page has been decoded.

use super::ScrollClient;
use crate::error::{ClientError, Result};
use crate::response::{Hit, Page};
use futures::stream::{self, Stream, TryStreamExt};
use tracing::{debug, info};

/// Position of a drain between two requests
enum Cursor {
    /// Nothing fetched yet
    Initial,
    /// Token carried by the last non-empty page
    Continue(Option<String>),
}

impl ScrollClient {
    /// Lazily fetch every non-empty page of the search
    ///
    /// The first page comes from [`ScrollClient::search_with_cursor`], the following
    /// ones from scroll continuations. The stream ends at the first empty page, or right
    /// after yielding an error. Nothing is requested until the stream is polled, and
    /// dropping it stops the drain. Each call starts a new scroll.
    pub fn pages(&self) -> impl Stream<Item = Result<Page>> + '_ {
        stream::try_unfold(Cursor::Initial, move |cursor| self.next_page(cursor))
    }

    /// Lazily fetch every hit of the search, in page order
    pub fn hits(&self) -> impl Stream<Item = Result<Hit>> + '_ {
        self.pages().map_ok(into_hit_stream).try_flatten()
    }

    /// Collect every hit of the search
    ///
    /// This issues as many requests as the result set needs and holds all hits in
    /// memory. On failure the hits gathered so far are dropped; use
    /// [`ScrollClient::hits`] to keep partial progress.
    pub async fn drain_all(&self) -> Result<Vec<Hit>> {
        let mut pages = 0usize;
        let hits: Vec<Hit> = self
            .pages()
            .inspect_ok(|_| pages += 1)
            .map_ok(into_hit_stream)
            .try_flatten()
            .try_collect()
            .await?;

        info!(
            "Drained {} hits in {} pages from {}",
            hits.len(),
            pages,
            self.endpoint()
        );
        Ok(hits)
    }

    async fn next_page(&self, cursor: Cursor) -> Result<Option<(Page, Cursor)>> {
        let page = match cursor {
            Cursor::Initial => self.search_with_cursor().await?,
            Cursor::Continue(scroll_id) => self.scroll(scroll_id.as_deref()).await?,
        };

        if page.is_empty() {
            debug!("Scroll exhausted after {} total matches", page.total);
            return Ok(None);
        }

        debug!("Fetched page of {} hits ({} total)", page.len(), page.total);
        let next = Cursor::Continue(page.scroll_id.clone());
        Ok(Some((page, next)))
    }
}

fn into_hit_stream(page: Page) -> impl Stream<Item = Result<Hit>> {
    stream::iter(page.into_hits().into_iter().map(Ok::<Hit, ClientError>))
}
