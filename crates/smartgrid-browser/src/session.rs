//! Per-user browsing session: the state a front end renders.
//!
//! A [`BrowserSession`] is owned by exactly one caller and driven one action
//! at a time. Each action moves the session `Idle → Loading → Idle`, clears
//! the busy flag on every exit path, and appends exactly one entry to the
//! diagnostic log. Failed actions leave collections, selection and products
//! at their last good values.

use serde::Serialize;
use smartgrid_core::{Collection, PageCursor, Product};
use uuid::Uuid;

use crate::browser::{CollectionBrowser, ProductPage};
use crate::classify::classify;
use crate::error::BrowserError;
use crate::gateway::Gateway;
use crate::log::DiagnosticLog;
use crate::query::CollectionQuery;

/// The currently opened collection with every product page loaded so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub collection: Collection,
    /// Products in fetch order. Only ever grows while this selection lives.
    pub products: Vec<Product>,
    pub cursor: PageCursor,
}

impl Selection {
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.cursor.next_token().is_some()
    }

    /// Appends `page` after the products already loaded and advances the cursor.
    pub fn append(&mut self, page: ProductPage) {
        self.products.extend(page.products);
        self.cursor = page.cursor;
    }
}

#[derive(Debug, Serialize)]
pub struct BrowserSession {
    id: Uuid,
    pinned: Vec<Collection>,
    other: Vec<Collection>,
    selection: Option<Selection>,
    search_term: String,
    busy: bool,
    last_error: Option<String>,
    log: DiagnosticLog,
}

impl Default for BrowserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserSession {
    #[must_use]
    pub fn new() -> Self {
        let mut log = DiagnosticLog::new();
        log.record("Session started");
        Self {
            id: Uuid::new_v4(),
            pinned: Vec::new(),
            other: Vec::new(),
            selection: None,
            search_term: String::new(),
            busy: false,
            last_error: None,
            log,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn pinned(&self) -> &[Collection] {
        &self.pinned
    }

    #[must_use]
    pub fn other(&self) -> &[Collection] {
        &self.other
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Products of the current selection, empty when nothing is selected.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.selection.as_ref().map_or(&[], |s| s.products.as_slice())
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// `true` while an action is in flight. Front ends check this before
    /// starting another action; the session does not serialize calls itself.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Message of the most recent failed action, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Loads every collection and replaces both partitions. Clears the
    /// selection and the search term.
    ///
    /// Returns the number of collections loaded.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CollectionBrowser::list_all_collections`];
    /// the session's collections are left untouched.
    pub async fn refresh<G: Gateway>(
        &mut self,
        browser: &CollectionBrowser<G>,
    ) -> Result<usize, BrowserError> {
        self.busy = true;
        let result = browser
            .list_all_collections(browser.page_sizes().collections)
            .await;
        self.busy = false;

        match result {
            Ok(collections) => {
                let count = self.replace_collections(collections);
                self.search_term.clear();
                self.succeed(format!(
                    "Loaded {count} collections ({} pinned)",
                    self.pinned.len()
                ));
                Ok(count)
            }
            Err(e) => self.fail("Error loading collections", e),
        }
    }

    /// Searches collections by title prefix and replaces both partitions with
    /// the result. A blank term restores the full listing. Clears the
    /// selection.
    ///
    /// Returns the number of collections found.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CollectionBrowser::search_collections`];
    /// collections, selection and search term are left untouched.
    pub async fn search<G: Gateway>(
        &mut self,
        browser: &CollectionBrowser<G>,
        term: &str,
    ) -> Result<usize, BrowserError> {
        self.busy = true;
        let result = browser
            .search_collections(term, browser.page_sizes().search)
            .await;
        self.busy = false;

        match result {
            Ok(collections) => {
                let count = self.replace_collections(collections);
                self.search_term = term.trim().to_owned();
                let message = match CollectionQuery::from_term(term) {
                    CollectionQuery::All => {
                        format!("Search cleared: restored {count} collections")
                    }
                    CollectionQuery::TitlePrefix(prefix) => {
                        format!("Searching \"{prefix}\": found {count} collections")
                    }
                };
                self.succeed(message);
                Ok(count)
            }
            Err(e) => self.fail(
                &format!("Error searching collections for \"{}\"", term.trim()),
                e,
            ),
        }
    }

    /// Opens a collection, replacing any previous selection together with its
    /// products and cursor.
    ///
    /// Returns the number of products on the first page.
    ///
    /// # Errors
    ///
    /// [`BrowserError::NotFound`] when the collection does not exist, or any
    /// other error from [`CollectionBrowser::open_collection`]. The previous
    /// selection stays in place on failure.
    pub async fn open_collection<G: Gateway>(
        &mut self,
        browser: &CollectionBrowser<G>,
        collection_id: &str,
    ) -> Result<usize, BrowserError> {
        self.busy = true;
        let result = browser
            .open_collection(collection_id, browser.page_sizes().products)
            .await;
        self.busy = false;

        match result {
            Ok(selection) => {
                let count = selection.products.len();
                let title = selection.collection.title.clone();
                self.selection = Some(selection);
                self.succeed(format!("Loaded {count} products from \"{title}\""));
                Ok(count)
            }
            Err(e) => self.fail(
                &format!("Error loading products for collection {collection_id}"),
                e,
            ),
        }
    }

    /// Loads the next page of the selected collection's products and appends
    /// it.
    ///
    /// Without a selection, or when the selection has no further page, this is
    /// a no-op that makes no gateway call and returns `Ok(0)`.
    ///
    /// Returns the number of products appended.
    ///
    /// # Errors
    ///
    /// Any error from [`CollectionBrowser::next_product_page`]. Products and
    /// cursor are unchanged on failure.
    pub async fn load_next_page<G: Gateway>(
        &mut self,
        browser: &CollectionBrowser<G>,
    ) -> Result<usize, BrowserError> {
        let Some(selection) = self.selection.as_ref() else {
            self.log.record("Load more skipped: no collection selected");
            return Ok(0);
        };
        if !selection.has_next_page() {
            self.log.record("Load more skipped: no further pages");
            return Ok(0);
        }

        self.busy = true;
        let result = browser
            .next_product_page(selection, browser.page_sizes().products)
            .await;
        self.busy = false;

        match result {
            Ok(Some(page)) => {
                let count = page.products.len();
                let total = match self.selection.as_mut() {
                    Some(selection) => {
                        selection.append(page);
                        selection.products.len()
                    }
                    None => 0,
                };
                self.succeed(format!("Loaded {count} more products ({total} total)"));
                Ok(count)
            }
            Ok(None) => {
                self.log.record("Load more skipped: no further pages");
                Ok(0)
            }
            Err(e) => self.fail("Error loading next page", e),
        }
    }

    /// Drops the selection, its products and its cursor ("back to collections").
    pub fn clear_selection(&mut self) {
        match self.selection.take() {
            Some(selection) => self.log.record(format!(
                "Closed \"{}\" ({} products discarded)",
                selection.collection.title,
                selection.products.len()
            )),
            None => self.log.record("Back to collections: nothing selected"),
        }
    }

    fn replace_collections(&mut self, collections: Vec<Collection>) -> usize {
        let classified = classify(collections);
        let count = classified.len();
        self.pinned = classified.pinned;
        self.other = classified.other;
        self.selection = None;
        count
    }

    fn succeed(&mut self, message: String) {
        tracing::info!(session_id = %self.id, "{message}");
        self.last_error = None;
        self.log.record(message);
    }

    fn fail<T>(&mut self, context: &str, err: BrowserError) -> Result<T, BrowserError> {
        tracing::warn!(
            session_id = %self.id,
            kind = %err.kind(),
            error = %err,
            "{context}"
        );
        self.last_error = Some(err.to_string());
        self.log.record(format!("{context}: {err}"));
        Err(err)
    }
}
