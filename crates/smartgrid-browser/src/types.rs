//! Response shapes for the documents in [`crate::query`].
//!
//! ## Observed shape from the Admin GraphQL API
//!
//! ### Connections
//! Lists come back as `{ pageInfo { hasNextPage endCursor }, edges [{ node }] }`.
//! `endCursor` is `null` on an empty page; it is otherwise present even when
//! `hasNextPage` is `false`.
//!
//! ### Pinned metafield
//! Aliased as `pinned`. The whole object is `null` when the metafield is not
//! set on the collection; when set, `value` is always a string, even for
//! boolean-typed metafields (`"true"` / `"false"`).
//!
//! ### `collection(id:)`
//! Returns `null` (not an error) when no collection has the given ID.
//!
//! ### Product images
//! Requested as `images(first: 1)`; products without media return an empty
//! `edges` array.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use smartgrid_core::{Collection, PageCursor, Product};

/// A GraphQL connection: one page of edges plus pagination info.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Strips the edge wrappers, preserving order.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl From<PageInfo> for PageCursor {
    fn from(info: PageInfo) -> Self {
        PageCursor {
            end_cursor: info.end_cursor,
            has_next_page: info.has_next_page,
        }
    }
}

/// `data` of [`crate::query::LIST_COLLECTIONS`].
#[derive(Debug, Deserialize)]
pub struct CollectionsData {
    pub collections: Connection<CollectionNode>,
}

/// `data` of [`crate::query::COLLECTION_PRODUCTS`].
#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    /// `null` when the ID resolves to nothing.
    pub collection: Option<CollectionWithProducts>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pinned: Option<MetafieldValue>,
}

impl From<CollectionNode> for Collection {
    fn from(node: CollectionNode) -> Self {
        Collection {
            id: node.id,
            title: node.title,
            handle: node.handle,
            updated_at: node.updated_at,
            pinned_value: node.pinned.and_then(|m| m.value),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MetafieldValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionWithProducts {
    #[serde(flatten)]
    pub collection: CollectionNode,
    pub products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub images: EdgeList<ImageNode>,
}

/// A connection requested without `pageInfo` (the first-image lookup).
#[derive(Debug, Deserialize)]
pub struct EdgeList<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageNode {
    pub url: String,
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        Product {
            id: node.id,
            title: node.title,
            handle: node.handle,
            image_url: node.images.edges.into_iter().next().map(|e| e.node.url),
        }
    }
}
