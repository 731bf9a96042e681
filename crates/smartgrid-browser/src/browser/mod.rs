//! Collection listing, search, and product pagination over a [`Gateway`].

mod products;

use smartgrid_core::{AppConfig, Collection, PageSizes, PinnedMetafield};

use crate::error::BrowserError;
use crate::gateway::{decode, Gateway};
use crate::pagination::{next_page_token, MAX_PAGES};
use crate::query::{CollectionQuery, ListCollectionsVars, LIST_COLLECTIONS};
use crate::types::{CollectionNode, CollectionsData, Connection};

pub use products::ProductPage;

pub(crate) const OP_LIST: &str = "list_collections";
pub(crate) const OP_SEARCH: &str = "search_collections";
pub(crate) const OP_OPEN: &str = "open_collection";
pub(crate) const OP_NEXT_PAGE: &str = "load_next_page";

/// Stateless query layer shared by every front end.
///
/// Holds the gateway, the pinned-metafield coordinates, and default page
/// sizes. All session state lives in [`crate::BrowserSession`].
pub struct CollectionBrowser<G> {
    gateway: G,
    pinned: PinnedMetafield,
    page_sizes: PageSizes,
}

impl<G: Gateway> CollectionBrowser<G> {
    /// Creates a browser with the default pinned metafield (`custom.pinned`)
    /// and default page sizes.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            pinned: PinnedMetafield::default(),
            page_sizes: PageSizes::default(),
        }
    }

    /// Creates a browser using the metafield and page sizes from `config`.
    pub fn from_config(gateway: G, config: &AppConfig) -> Self {
        Self::new(gateway)
            .with_pinned_metafield(config.pinned_metafield.clone())
            .with_page_sizes(config.page_sizes)
    }

    #[must_use]
    pub fn with_pinned_metafield(mut self, pinned: PinnedMetafield) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub fn with_page_sizes(mut self, page_sizes: PageSizes) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn page_sizes(&self) -> PageSizes {
        self.page_sizes
    }

    pub fn pinned_metafield(&self) -> &PinnedMetafield {
        &self.pinned
    }

    /// Fetches every collection by following cursors until the last page.
    ///
    /// **All-or-nothing**: if any page fails, collections from earlier pages
    /// are discarded and the error is returned. Pinned collections can sit on
    /// any page, so a truncated listing would misclassify.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::Gateway`] / [`BrowserError::Graphql`] if any page request fails.
    /// - [`BrowserError::MalformedResponse`] if a page is missing expected fields.
    /// - [`BrowserError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn list_all_collections(
        &self,
        page_size: u32,
    ) -> Result<Vec<Collection>, BrowserError> {
        let mut all_collections: Vec<Collection> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(BrowserError::PaginationLimit {
                    operation: OP_LIST,
                    max_pages: MAX_PAGES,
                });
            }

            let page = self
                .fetch_collections_page(
                    page_size,
                    cursor.as_deref(),
                    &CollectionQuery::All,
                    OP_LIST,
                )
                .await?;

            cursor = next_page_token(&page.page_info, OP_LIST)?;
            tracing::debug!(
                page = page_count,
                count = page.edges.len(),
                has_next_page = cursor.is_some(),
                "fetched collections page"
            );
            all_collections.extend(page.into_nodes().into_iter().map(Collection::from));

            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(
            pages = page_count,
            count = all_collections.len(),
            "listed all collections"
        );
        Ok(all_collections)
    }

    /// Searches collections by title prefix.
    ///
    /// A blank `term` is a full restore: it behaves exactly like
    /// [`Self::list_all_collections`] with the configured listing page size.
    /// Otherwise exactly one page of at most `page_size` collections is
    /// fetched; matches beyond the first page are never retrieved, so search
    /// results are not exhaustive.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::Gateway`] / [`BrowserError::Graphql`] if the request fails.
    /// - [`BrowserError::MalformedResponse`] if the response is missing expected fields.
    pub async fn search_collections(
        &self,
        term: &str,
        page_size: u32,
    ) -> Result<Vec<Collection>, BrowserError> {
        let query = CollectionQuery::from_term(term);
        if query == CollectionQuery::All {
            return self
                .list_all_collections(self.page_sizes.collections)
                .await;
        }

        let page = self
            .fetch_collections_page(page_size, None, &query, OP_SEARCH)
            .await?;

        let mut collections: Vec<Collection> = page
            .into_nodes()
            .into_iter()
            .map(Collection::from)
            .collect();
        collections.truncate(usize::try_from(page_size).unwrap_or(usize::MAX));

        tracing::info!(
            term = term.trim(),
            count = collections.len(),
            "searched collections"
        );
        Ok(collections)
    }

    async fn fetch_collections_page(
        &self,
        page_size: u32,
        after: Option<&str>,
        query: &CollectionQuery,
        operation: &'static str,
    ) -> Result<Connection<CollectionNode>, BrowserError> {
        let variables = ListCollectionsVars {
            first: page_size,
            after,
            query,
            pinned: &self.pinned,
        }
        .to_value();

        let response = self
            .gateway
            .query(LIST_COLLECTIONS, variables)
            .await
            .map_err(|source| BrowserError::Gateway { operation, source })?;

        let data: CollectionsData = decode(response, operation)?;
        Ok(data.collections)
    }
}
