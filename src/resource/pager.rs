//! Lazy cursor-following page walker
//!
//! [`Pages`] presents a paginated collection as one forward-only sequence
//! of domain items. Nothing is fetched until the first [`Pages::next`]; after
//! that exactly one page is buffered at a time and the next page is only
//! requested once the buffer has drained.

use super::envelope::{normalize_item, Envelope};
use crate::api::client::ApiClient;
use crate::api::error::{Error, Result};
use futures::Stream;
use serde_json::Value;
use std::collections::VecDeque;
use url::Url;

/// Where a walker is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Constructed, no request issued yet
    Uninitialized,
    /// A page has been fetched; its items are being handed out
    Buffered,
    /// Last page fully consumed
    Exhausted,
    /// A fetch failed; the walker yields nothing more
    Failed,
}

/// One walk over a paginated collection.
///
/// `next` takes `&mut self`, so a walker can only ever be pulled by one
/// task at a time. Items already returned before a failure stay valid.
pub struct Pages {
    client: ApiClient,
    state: PageState,
    buffer: VecDeque<Value>,
    /// URL of the page to fetch once the buffer drains; `None` after the
    /// last page has been fetched
    next_url: Option<String>,
    page_size: Option<u64>,
    total_items: Option<u64>,
    pages_fetched: usize,
}

impl Pages {
    /// Walker starting at `first_url`. Performs no I/O.
    pub fn new(client: ApiClient, first_url: impl Into<String>) -> Self {
        Self {
            client,
            state: PageState::Uninitialized,
            buffer: VecDeque::new(),
            next_url: Some(first_url.into()),
            page_size: None,
            total_items: None,
            pages_fetched: 0,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// `page_size` reported by the most recent page
    pub fn page_size(&self) -> Option<u64> {
        self.page_size
    }

    /// `total_items` reported by the most recent page
    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Pull the next item.
    ///
    /// Returns `None` at the end of the collection, `Some(Err(_))` exactly
    /// once when the page fetch triggered by this pull fails, and `None` on
    /// every pull after that.
    pub async fn next(&mut self) -> Option<Result<Value>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }

            if matches!(self.state, PageState::Exhausted | PageState::Failed) {
                return None;
            }

            // Cloned rather than taken: a cancelled pull must leave the
            // walker able to retry the same page.
            let Some(url) = self.next_url.clone() else {
                self.state = PageState::Exhausted;
                return None;
            };

            if let Err(err) = self.fetch_page(&url).await {
                self.state = PageState::Failed;
                self.next_url = None;
                return Some(Err(err));
            }
            // An empty page that still links onward is followed in the same pull
        }
    }

    async fn fetch_page(&mut self, url: &str) -> Result<()> {
        let body = self.client.get(url).await?;
        let envelope = Envelope::parse(body)?;

        let items = envelope
            .items
            .iter()
            .map(normalize_item)
            .collect::<Result<VecDeque<_>>>()?;
        let next_url = envelope
            .next_href()
            .map(|href| resolve_href(url, href))
            .transpose()?;

        tracing::debug!(
            url,
            items = items.len(),
            has_next = next_url.is_some(),
            "fetched page"
        );

        self.buffer = items;
        self.next_url = next_url;
        self.page_size = envelope.page_size;
        self.total_items = envelope.total_items;
        self.pages_fetched += 1;
        self.state = PageState::Buffered;
        Ok(())
    }

    /// Drain every remaining item. The first failure aborts the walk.
    pub async fn collect_all(mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Adapt the walker to a [`Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<Value>> + Send {
        futures::stream::unfold(self, |mut pages| async move {
            pages.next().await.map(|item| (item, pages))
        })
    }
}

/// `next` hrefs are used verbatim; relative ones are resolved against the
/// page that carried them.
fn resolve_href(current: &str, href: &str) -> Result<String> {
    let joined = Url::parse(current)
        .and_then(|base| base.join(href))
        .map_err(|e| Error::MalformedEnvelope(format!("unusable `next` href {href:?}: {e}")))?;
    Ok(joined.to_string())
}
