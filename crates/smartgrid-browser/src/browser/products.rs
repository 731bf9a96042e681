//! Opening a collection and paging through its products.

use serde::Serialize;
use smartgrid_core::{Collection, PageCursor, Product};

use super::{CollectionBrowser, OP_NEXT_PAGE, OP_OPEN};
use crate::error::BrowserError;
use crate::gateway::{decode, Gateway};
use crate::pagination::checked_cursor;
use crate::query::{CollectionProductsVars, COLLECTION_PRODUCTS};
use crate::session::Selection;
use crate::types::{CollectionProductsData, CollectionWithProducts};

/// One page of a collection's products and the cursor after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub cursor: PageCursor,
}

impl<G: Gateway> CollectionBrowser<G> {
    /// Fetches a collection's metadata and its first page of products in one
    /// gateway call.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::NotFound`] if no collection has `collection_id`.
    /// - [`BrowserError::Gateway`] / [`BrowserError::Graphql`] if the request fails.
    /// - [`BrowserError::MalformedResponse`] if the response is missing expected fields.
    pub async fn open_collection(
        &self,
        collection_id: &str,
        page_size: u32,
    ) -> Result<Selection, BrowserError> {
        let fetched = self
            .fetch_collection_products(collection_id, page_size, None, OP_OPEN)
            .await?;

        let cursor = checked_cursor(fetched.products.page_info.clone(), OP_OPEN)?;
        let products: Vec<Product> = fetched
            .products
            .into_nodes()
            .into_iter()
            .map(Product::from)
            .collect();

        tracing::info!(
            collection_id,
            count = products.len(),
            has_next_page = cursor.has_next_page,
            "opened collection"
        );

        Ok(Selection {
            collection: Collection::from(fetched.collection),
            products,
            cursor,
        })
    }

    /// Fetches the page of products following `selection`'s cursor.
    ///
    /// Returns `Ok(None)` without calling the gateway when the selection has
    /// no further page. The selection itself is not modified; callers append
    /// the returned page with [`Selection::append`].
    ///
    /// # Errors
    ///
    /// - [`BrowserError::NotFound`] if the collection disappeared since it was opened.
    /// - [`BrowserError::Gateway`] / [`BrowserError::Graphql`] if the request fails.
    /// - [`BrowserError::MalformedResponse`] if the response is missing expected fields.
    pub async fn next_product_page(
        &self,
        selection: &Selection,
        page_size: u32,
    ) -> Result<Option<ProductPage>, BrowserError> {
        let Some(after) = selection.cursor.next_token() else {
            return Ok(None);
        };

        let fetched = self
            .fetch_collection_products(
                &selection.collection.id,
                page_size,
                Some(after),
                OP_NEXT_PAGE,
            )
            .await?;

        let cursor = checked_cursor(fetched.products.page_info.clone(), OP_NEXT_PAGE)?;
        let products: Vec<Product> = fetched
            .products
            .into_nodes()
            .into_iter()
            .map(Product::from)
            .collect();

        tracing::debug!(
            collection_id = %selection.collection.id,
            count = products.len(),
            has_next_page = cursor.has_next_page,
            "fetched next product page"
        );

        Ok(Some(ProductPage { products, cursor }))
    }

    async fn fetch_collection_products(
        &self,
        collection_id: &str,
        page_size: u32,
        after: Option<&str>,
        operation: &'static str,
    ) -> Result<CollectionWithProducts, BrowserError> {
        let variables = CollectionProductsVars {
            id: collection_id,
            first: page_size,
            after,
            pinned: &self.pinned,
        }
        .to_value();

        let response = self
            .gateway
            .query(COLLECTION_PRODUCTS, variables)
            .await
            .map_err(|source| BrowserError::Gateway { operation, source })?;

        let data: CollectionProductsData = decode(response, operation)?;
        data.collection.ok_or_else(|| BrowserError::NotFound {
            collection_id: collection_id.to_owned(),
        })
    }
}
