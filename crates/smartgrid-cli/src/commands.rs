//! Command handlers for the CLI.
//!
//! Each handler drives the shared [`BrowserSession`] through the same actions
//! a dashboard would take. Failures are already recorded in the session's
//! diagnostic log; the handlers only add context for the process exit.

use anyhow::Context;
use smartgrid_browser::pagination::MAX_PAGES;
use smartgrid_browser::{BrowserSession, CollectionBrowser, Gateway, Selection};

/// How many product pages `products` should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageLimit {
    /// Load this many pages in total, including the first.
    Pages(u32),
    /// Load until the collection is exhausted.
    All,
}

impl PageLimit {
    pub(crate) fn max_pages(self) -> usize {
        match self {
            Self::Pages(n) => usize::try_from(n).unwrap_or(MAX_PAGES),
            Self::All => MAX_PAGES,
        }
    }
}

pub(crate) async fn run_list<G: Gateway>(
    browser: &CollectionBrowser<G>,
    session: &mut BrowserSession,
) -> anyhow::Result<()> {
    session
        .refresh(browser)
        .await
        .context("failed to list collections")?;
    Ok(())
}

pub(crate) async fn run_search<G: Gateway>(
    browser: &CollectionBrowser<G>,
    session: &mut BrowserSession,
    term: &str,
) -> anyhow::Result<()> {
    session
        .search(browser, term)
        .await
        .with_context(|| format!("failed to search collections for '{}'", term.trim()))?;
    Ok(())
}

/// Opens `collection_id` and keeps loading product pages until `limit` is
/// reached or the collection has no further page.
///
/// # Errors
///
/// Returns an error if the collection cannot be opened or any page fails.
/// Products loaded before a failed page stay in the session.
pub(crate) async fn run_products<G: Gateway>(
    browser: &CollectionBrowser<G>,
    session: &mut BrowserSession,
    collection_id: &str,
    limit: PageLimit,
) -> anyhow::Result<()> {
    session
        .open_collection(browser, collection_id)
        .await
        .with_context(|| format!("failed to open collection {collection_id}"))?;

    let mut pages = 1usize;
    while pages < limit.max_pages() && session.selection().is_some_and(Selection::has_next_page)
    {
        session
            .load_next_page(browser)
            .await
            .with_context(|| format!("failed to load page {} of {collection_id}", pages + 1))?;
        pages += 1;
    }

    if limit == PageLimit::All && session.selection().is_some_and(Selection::has_next_page) {
        tracing::warn!(
            collection_id,
            pages,
            "stopped loading products at the page limit"
        );
    }
    Ok(())
}
