//! Shared fixtures for the browser integration tests.
//!
//! `ScriptedGateway` replays a queue of canned GraphQL responses in order and
//! records every `(document, variables)` pair it receives, so tests can assert
//! both on what the browser produced and on exactly which calls it made.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use smartgrid_browser::{Gateway, GatewayError, GraphqlResponse};

pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<GraphqlResponse, GatewayError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<GraphqlResponse, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues another response behind the ones already scripted.
    pub fn push(&self, response: Result<GraphqlResponse, GatewayError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn query(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphqlResponse, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((document.to_owned(), variables));
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(GatewayError::Transport("script exhausted".to_owned())))
    }
}

pub fn transport_error(message: &str) -> GatewayError {
    GatewayError::Transport(message.to_owned())
}

pub fn collection_gid(n: u32) -> String {
    format!("gid://shopify/Collection/{n}")
}

pub fn product_gid(n: u32) -> String {
    format!("gid://shopify/Product/{n}")
}

/// A collection node; collections listed in `pinned` carry `pinned.value = "true"`.
pub fn collection_node(n: u32, pinned: bool) -> Value {
    json!({
        "id": collection_gid(n),
        "title": format!("Collection {n}"),
        "handle": format!("collection-{n}"),
        "updatedAt": "2024-06-01T10:00:00Z",
        "pinned": if pinned { json!({ "value": "true" }) } else { Value::Null },
    })
}

/// One page of the collections listing.
pub fn collections_page(ids: Range<u32>, pinned: &[u32], next: Option<&str>) -> GraphqlResponse {
    GraphqlResponse::with_data(collections_page_json(ids, pinned, next))
}

pub fn collections_page_json(ids: Range<u32>, pinned: &[u32], next: Option<&str>) -> Value {
    let edges: Vec<Value> = ids
        .map(|n| json!({ "node": collection_node(n, pinned.contains(&n)) }))
        .collect();
    json!({
        "collections": {
            "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next },
            "edges": edges,
        }
    })
}

pub fn product_node(n: u32) -> Value {
    json!({
        "id": product_gid(n),
        "title": format!("Product {n}"),
        "handle": format!("product-{n}"),
        "images": { "edges": [
            { "node": { "url": format!("https://cdn.shopify.com/p{n}.jpg") } }
        ] },
    })
}

/// A collection with one page of its products.
pub fn collection_products(
    id: u32,
    products: Range<u32>,
    next: Option<&str>,
) -> GraphqlResponse {
    let mut collection = collection_node(id, false);
    let edges: Vec<Value> = products
        .map(|n| json!({ "node": product_node(n) }))
        .collect();
    collection["products"] = json!({
        "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next },
        "edges": edges,
    });
    GraphqlResponse::with_data(json!({ "collection": collection }))
}

pub fn missing_collection() -> GraphqlResponse {
    GraphqlResponse::with_data(json!({ "collection": null }))
}
