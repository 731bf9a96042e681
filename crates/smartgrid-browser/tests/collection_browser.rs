//! `CollectionBrowser` query-layer tests against a scripted gateway.
//!
//! These check the exact call pattern each operation produces (documents,
//! variables, number of calls) and how gateway, GraphQL and shape failures are
//! classified.

mod common;

use chrono::{TimeZone, Utc};
use serde_json::json;

use common::{
    collection_gid, collection_products, collections_page, missing_collection, product_gid,
    transport_error, ScriptedGateway,
};
use smartgrid_browser::pagination::MAX_PAGES;
use smartgrid_browser::query::{COLLECTION_PRODUCTS, LIST_COLLECTIONS};
use smartgrid_browser::{
    BrowserError, CollectionBrowser, ErrorKind, GraphqlResponse, Selection,
};
use smartgrid_core::{Collection, PageCursor, PinnedMetafield};

fn browser(gateway: ScriptedGateway) -> CollectionBrowser<ScriptedGateway> {
    CollectionBrowser::new(gateway)
}

// ---------------------------------------------------------------------------
// Full listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_all_returns_single_page() {
    let browser = browser(ScriptedGateway::new(vec![Ok(collections_page(
        0..3,
        &[],
        None,
    ))]));

    let collections = browser.list_all_collections(50).await.unwrap();

    assert_eq!(collections.len(), 3);
    assert_eq!(browser.gateway().call_count(), 1);
}

#[tokio::test]
async fn list_all_follows_end_cursor() {
    let browser = browser(ScriptedGateway::new(vec![
        Ok(collections_page(0..2, &[], Some("cursor-a"))),
        Ok(collections_page(2..4, &[], Some("cursor-b"))),
        Ok(collections_page(4..5, &[], None)),
    ]));

    let collections = browser.list_all_collections(2).await.unwrap();

    let ids: Vec<String> = collections.iter().map(|c| c.id.clone()).collect();
    let expected: Vec<String> = (0..5).map(collection_gid).collect();
    assert_eq!(ids, expected);

    let calls = browser.gateway().calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].1["after"].is_null());
    assert_eq!(calls[1].1["after"], "cursor-a");
    assert_eq!(calls[2].1["after"], "cursor-b");
    assert!(calls.iter().all(|(doc, vars)| {
        doc == LIST_COLLECTIONS && vars["first"] == 2 && vars["query"].is_null()
    }));
}

#[tokio::test]
async fn list_all_discards_earlier_pages_on_failure() {
    let browser = browser(ScriptedGateway::new(vec![
        Ok(collections_page(0..2, &[], Some("cursor-a"))),
        Err(transport_error("connection reset")),
    ]));

    let err = browser.list_all_collections(2).await.unwrap_err();

    assert!(
        matches!(
            err,
            BrowserError::Gateway {
                operation: "list_collections",
                ..
            }
        ),
        "expected Gateway error, got: {err:?}"
    );
    assert_eq!(browser.gateway().call_count(), 2);
}

#[tokio::test]
async fn list_all_rejects_missing_end_cursor() {
    let response = GraphqlResponse::with_data(json!({
        "collections": {
            "pageInfo": { "hasNextPage": true, "endCursor": null },
            "edges": [],
        }
    }));
    let browser = browser(ScriptedGateway::new(vec![Ok(response)]));

    let err = browser.list_all_collections(50).await.unwrap_err();

    assert!(
        matches!(err, BrowserError::MalformedResponse { .. }),
        "expected MalformedResponse, got: {err:?}"
    );
}

#[tokio::test]
async fn list_all_stops_on_cycling_cursor() {
    let script = (0..=MAX_PAGES)
        .map(|_| Ok(collections_page(0..1, &[], Some("same-cursor"))))
        .collect();
    let browser = browser(ScriptedGateway::new(script));

    let err = browser.list_all_collections(1).await.unwrap_err();

    assert!(
        matches!(
            err,
            BrowserError::PaginationLimit {
                max_pages: MAX_PAGES,
                ..
            }
        ),
        "expected PaginationLimit, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Gateway);
    assert_eq!(browser.gateway().call_count(), MAX_PAGES);
}

#[tokio::test]
async fn list_all_surfaces_graphql_errors() {
    let browser = browser(ScriptedGateway::new(vec![Ok(GraphqlResponse::with_errors(
        ["Access denied for collections field."],
    ))]));

    let err = browser.list_all_collections(50).await.unwrap_err();

    assert!(
        matches!(err, BrowserError::Graphql { ref messages, .. } if messages[0].contains("Access denied")),
        "expected Graphql error, got: {err:?}"
    );
}

#[tokio::test]
async fn pinned_metafield_coordinates_are_sent() {
    let browser = browser(ScriptedGateway::new(vec![Ok(collections_page(
        0..1,
        &[],
        None,
    ))]))
    .with_pinned_metafield(PinnedMetafield {
        namespace: "pos".to_owned(),
        key: "smart_grid_pin".to_owned(),
    });

    browser.list_all_collections(10).await.unwrap();

    let calls = browser.gateway().calls();
    assert_eq!(calls[0].1["pinnedNamespace"], "pos");
    assert_eq!(calls[0].1["pinnedKey"], "smart_grid_pin");
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_fetches_exactly_one_page() {
    // The page claims more results; search must not follow it.
    let browser = browser(ScriptedGateway::new(vec![Ok(collections_page(
        0..5,
        &[],
        Some("more"),
    ))]));

    let collections = browser.search_collections("coll", 5).await.unwrap();

    assert_eq!(collections.len(), 5);
    let calls = browser.gateway().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1["query"], "title:coll*");
    assert_eq!(calls[0].1["first"], 5);
    assert!(calls[0].1["after"].is_null());
}

#[tokio::test]
async fn search_truncates_oversized_page() {
    let browser = browser(ScriptedGateway::new(vec![Ok(collections_page(
        0..8,
        &[],
        None,
    ))]));

    let collections = browser.search_collections("coll", 5).await.unwrap();

    assert_eq!(collections.len(), 5);
    assert_eq!(collections[4].id, collection_gid(4));
}

#[tokio::test]
async fn blank_search_is_a_full_listing() {
    let script = || {
        vec![
            Ok(collections_page(0..50, &[], Some("cursor-a"))),
            Ok(collections_page(50..60, &[], None)),
        ]
    };
    let listing = browser(ScriptedGateway::new(script()));
    let searching = browser(ScriptedGateway::new(script()));

    let listed = listing.list_all_collections(50).await.unwrap();
    let searched = searching.search_collections("   ", 5).await.unwrap();

    assert_eq!(listed, searched);
    assert_eq!(listing.gateway().calls(), searching.gateway().calls());
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_collection_returns_first_page_and_cursor() {
    let browser = browser(ScriptedGateway::new(vec![Ok(collection_products(
        42,
        0..5,
        Some("p4"),
    ))]));

    let selection = browser
        .open_collection(&collection_gid(42), 5)
        .await
        .unwrap();

    assert_eq!(selection.collection.id, collection_gid(42));
    assert_eq!(selection.products.len(), 5);
    assert_eq!(selection.products[0].id, product_gid(0));
    assert_eq!(
        selection.cursor,
        PageCursor {
            end_cursor: Some("p4".to_owned()),
            has_next_page: true
        }
    );

    let calls = browser.gateway().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, COLLECTION_PRODUCTS);
    assert_eq!(calls[0].1["id"], collection_gid(42).as_str());
    assert!(calls[0].1["after"].is_null());
}

#[tokio::test]
async fn open_unknown_collection_is_not_found() {
    let browser = browser(ScriptedGateway::new(vec![Ok(missing_collection())]));

    let err = browser
        .open_collection(&collection_gid(404), 5)
        .await
        .unwrap_err();

    assert!(
        matches!(err, BrowserError::NotFound { ref collection_id } if *collection_id == collection_gid(404)),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn open_collection_transport_failure_is_gateway_error() {
    let browser = browser(ScriptedGateway::new(vec![Err(transport_error("timed out"))]));

    let err = browser
        .open_collection(&collection_gid(1), 5)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Gateway);
}

#[tokio::test]
async fn next_page_is_skipped_when_exhausted() {
    let browser = browser(ScriptedGateway::new(Vec::new()));
    let selection = Selection {
        collection: Collection {
            id: collection_gid(1),
            title: "Collection 1".to_owned(),
            handle: "collection-1".to_owned(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            pinned_value: None,
        },
        products: Vec::new(),
        cursor: PageCursor {
            end_cursor: Some("last".to_owned()),
            has_next_page: false,
        },
    };

    let page = browser.next_product_page(&selection, 5).await.unwrap();

    assert!(page.is_none());
    assert_eq!(browser.gateway().call_count(), 0);
}

#[tokio::test]
async fn next_page_is_keyed_by_cursor_and_collection() {
    let browser = browser(ScriptedGateway::new(vec![
        Ok(collection_products(7, 0..5, Some("p4"))),
        Ok(collection_products(7, 5..8, None)),
    ]));

    let selection = browser
        .open_collection(&collection_gid(7), 5)
        .await
        .unwrap();
    let page = browser
        .next_product_page(&selection, 5)
        .await
        .unwrap()
        .expect("a second page");

    assert_eq!(page.products.len(), 3);
    assert_eq!(page.products[0].id, product_gid(5));
    assert!(!page.cursor.has_next_page);

    let calls = browser.gateway().calls();
    assert_eq!(calls[1].1["id"], collection_gid(7).as_str());
    assert_eq!(calls[1].1["after"], "p4");
}
