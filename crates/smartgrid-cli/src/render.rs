//! Plain-text rendering of a session for the terminal.

use smartgrid_browser::BrowserSession;
use smartgrid_core::Collection;

pub(crate) fn print_collections(session: &BrowserSession) {
    if !session.search_term().is_empty() {
        println!("search: \"{}\"", session.search_term());
    }
    print_section("pinned", session.pinned());
    print_section("collections", session.other());
}

fn print_section(heading: &str, collections: &[Collection]) {
    println!("{heading} ({})", collections.len());
    for collection in collections {
        println!(
            "  {:<40} {:<32} updated {}",
            collection.title,
            collection.id,
            collection.updated_at.format("%Y-%m-%d")
        );
    }
}

pub(crate) fn print_selection(session: &BrowserSession) {
    let Some(selection) = session.selection() else {
        println!("no collection selected");
        return;
    };

    let pin = if selection.collection.is_pinned() {
        " [pinned]"
    } else {
        ""
    };
    println!(
        "{}{pin} ({} products{})",
        selection.collection.title,
        selection.products.len(),
        if selection.has_next_page() {
            ", more available"
        } else {
            ""
        }
    );
    for product in &selection.products {
        match &product.image_url {
            Some(url) => println!("  {:<40} {:<32} {url}", product.title, product.id),
            None => println!("  {:<40} {}", product.title, product.id),
        }
    }
}

pub(crate) fn print_log(session: &BrowserSession) {
    println!("log:");
    for line in session.log().lines() {
        println!("  {line}");
    }
}
