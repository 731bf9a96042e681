//! GraphQL documents and their typed variables.
//!
//! Search filters are modelled as [`CollectionQuery`] values and rendered to
//! the platform's search syntax in one place, so user input never reaches the
//! query string unescaped.

use serde_json::{json, Value};
use smartgrid_core::PinnedMetafield;

/// One page of collections, optionally filtered by a search query.
pub const LIST_COLLECTIONS: &str = r"
query ListCollections(
  $first: Int!
  $after: String
  $query: String
  $pinnedNamespace: String!
  $pinnedKey: String!
) {
  collections(first: $first, after: $after, query: $query) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        title
        handle
        updatedAt
        pinned: metafield(namespace: $pinnedNamespace, key: $pinnedKey) {
          value
        }
      }
    }
  }
}
";

/// A collection's metadata plus one page of its products.
pub const COLLECTION_PRODUCTS: &str = r"
query CollectionProducts(
  $id: ID!
  $first: Int!
  $after: String
  $pinnedNamespace: String!
  $pinnedKey: String!
) {
  collection(id: $id) {
    id
    title
    handle
    updatedAt
    pinned: metafield(namespace: $pinnedNamespace, key: $pinnedKey) {
      value
    }
    products(first: $first, after: $after) {
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          id
          title
          handle
          images(first: 1) {
            edges {
              node {
                url
              }
            }
          }
        }
      }
    }
  }
}
";

/// Characters with meaning in the platform's search syntax.
const SEARCH_SPECIAL_CHARS: &[char] = &['\\', ':', '(', ')', '"', '\'', '*', '-', '<', '>', '='];

/// Filter applied to a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionQuery {
    /// No filter: every collection.
    All,
    /// Collections whose title starts with the given (trimmed, non-empty) term.
    TitlePrefix(String),
}

impl CollectionQuery {
    /// Builds a filter from raw user input. Blank input means [`CollectionQuery::All`].
    #[must_use]
    pub fn from_term(term: &str) -> Self {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            CollectionQuery::All
        } else {
            CollectionQuery::TitlePrefix(trimmed.to_owned())
        }
    }

    /// Renders the `query:` argument, e.g. `title:summer*`.
    ///
    /// Search-syntax characters and whitespace in the term are backslash
    /// escaped so the whole term is matched as one title prefix.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            CollectionQuery::All => None,
            CollectionQuery::TitlePrefix(term) => {
                let mut rendered = String::with_capacity(term.len() + 8);
                rendered.push_str("title:");
                for c in term.chars() {
                    if SEARCH_SPECIAL_CHARS.contains(&c) || c.is_whitespace() {
                        rendered.push('\\');
                    }
                    rendered.push(c);
                }
                rendered.push('*');
                Some(rendered)
            }
        }
    }
}

/// Variables for [`LIST_COLLECTIONS`].
#[derive(Debug, Clone)]
pub struct ListCollectionsVars<'a> {
    pub first: u32,
    pub after: Option<&'a str>,
    pub query: &'a CollectionQuery,
    pub pinned: &'a PinnedMetafield,
}

impl ListCollectionsVars<'_> {
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "first": self.first,
            "after": self.after,
            "query": self.query.render(),
            "pinnedNamespace": self.pinned.namespace,
            "pinnedKey": self.pinned.key,
        })
    }
}

/// Variables for [`COLLECTION_PRODUCTS`].
#[derive(Debug, Clone)]
pub struct CollectionProductsVars<'a> {
    pub id: &'a str,
    pub first: u32,
    pub after: Option<&'a str>,
    pub pinned: &'a PinnedMetafield,
}

impl CollectionProductsVars<'_> {
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "first": self.first,
            "after": self.after,
            "pinnedNamespace": self.pinned.namespace,
            "pinnedKey": self.pinned.key,
        })
    }
}
