//! Lazily fetched, optionally cached pages over a counted result set.
//!
//! A [`Pages`] session owns its index, its total item count and its cache. Pages are
//! produced on demand by a [`PageSource`] and are opaque to the session. Interactive
//! navigation is layered on top by [`navigation::Navigator`], which serializes requests
//! per session.

pub mod navigation;

use std::{collections::HashMap, fmt, num::NonZeroU64};

use serenity::async_trait;
use thiserror::Error;

pub use navigation::{NavAction, Navigator, PageSurface, PageView};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("items per page must be greater than zero")]
    ZeroPageSize,
}

/// Produces the content of one page.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Page: Clone + Send + Sync;
    type Error: fmt::Display + Send + 'static;

    /// Fetches page `index`, holding at most `per_page` items.
    async fn fetch_page(&self, index: u64, per_page: u64) -> Result<Self::Page, Self::Error>;

    /// Current number of items, if the source can count them.
    ///
    /// Sessions call this before every interactive navigation so the last page index
    /// follows rows added or removed while the session is open.
    async fn count(&self) -> Result<Option<u64>, Self::Error> {
        Ok(None)
    }
}

/// One browsing session over a [`PageSource`].
pub struct Pages<S: PageSource> {
    source: S,
    per_page: NonZeroU64,
    total_items: u64,
    current: u64,
    cache: Option<HashMap<u64, S::Page>>,
}

impl<S: PageSource> Pages<S> {
    pub fn new(source: S, per_page: u64, total_items: u64) -> Result<Self, PaginationError> {
        let per_page = NonZeroU64::new(per_page).ok_or(PaginationError::ZeroPageSize)?;

        Ok(Self {
            source,
            per_page,
            total_items,
            current: 0,
            cache: None,
        })
    }

    /// Enables or disables the per-session page cache.
    ///
    /// Disabling drops every cached page.
    pub fn cache_pages(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(HashMap::new);
        self
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn current_index(&self) -> u64 {
        self.current
    }

    /// Index of the last page. Zero when there are no items.
    pub fn last_page_index(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            (self.total_items - 1) / self.per_page.get()
        }
    }

    /// Replaces the item count and pulls the current index back into range.
    ///
    /// Cached pages past the new last index are kept but can no longer be reached.
    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
        self.current = self.current.min(self.last_page_index());
    }

    /// Re-reads the item count from the source when it provides one.
    pub async fn refresh_total(&mut self) -> Result<(), S::Error> {
        if let Some(total) = self.source.count().await? {
            self.set_total_items(total);
        }

        Ok(())
    }

    /// Resolves the page at the current index.
    pub async fn current_page(&mut self) -> Result<S::Page, S::Error> {
        self.go_to_index(self.current).await
    }

    /// Moves to `index`, clamped into `[0, last_page_index]`, and resolves that page.
    pub async fn go_to(&mut self, index: i64) -> Result<S::Page, S::Error> {
        self.go_to_index(u64::try_from(index).unwrap_or(0)).await
    }

    pub async fn next(&mut self) -> Result<S::Page, S::Error> {
        self.go_to_index(self.current.saturating_add(1)).await
    }

    pub async fn previous(&mut self) -> Result<S::Page, S::Error> {
        self.go_to_index(self.current.saturating_sub(1)).await
    }

    pub async fn first(&mut self) -> Result<S::Page, S::Error> {
        self.go_to_index(0).await
    }

    pub async fn last(&mut self) -> Result<S::Page, S::Error> {
        self.go_to_index(self.last_page_index()).await
    }

    /// Applies a navigation control.
    pub async fn navigate(&mut self, action: NavAction) -> Result<S::Page, S::Error> {
        match action {
            NavAction::First => self.first().await,
            NavAction::Previous => self.previous().await,
            NavAction::Next => self.next().await,
            NavAction::Last => self.last().await,
        }
    }

    /// The index only moves once the page resolved, so a failed fetch leaves the
    /// session where it was.
    async fn go_to_index(&mut self, index: u64) -> Result<S::Page, S::Error> {
        let index = index.min(self.last_page_index());
        let page = self.resolve(index).await?;
        self.current = index;

        Ok(page)
    }

    async fn resolve(&mut self, index: u64) -> Result<S::Page, S::Error> {
        if let Some(page) = self.cache.as_ref().and_then(|cache| cache.get(&index)) {
            return Ok(page.clone());
        }

        let page = self.source.fetch_page(index, self.per_page.get()).await?;

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(index, page.clone());
        }

        Ok(page)
    }
}
