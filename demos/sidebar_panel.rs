//! Sidebar preference shared across two consumers

use std::sync::Arc;

use prefstore::{sidebar_store, MemoryBackend, SidebarView};

fn main() {
    println!("=== Sidebar Panel Example ===\n");

    // The composition root builds one store for the whole process.
    let store = sidebar_store(Arc::new(MemoryBackend::new()));

    // Two independent consumers of the same preference.
    let nav = SidebarView::new(store.clone());
    let header = SidebarView::new(store);

    // Before attaching, both report the fixed default.
    println!("nav pre-hydration: expanded = {}", nav.is_expanded());

    nav.attach(|| println!("  nav: re-render"));
    header.attach(|| println!("  header: re-render"));

    println!("\nCollapsing from the header...");
    header.collapse();
    println!("nav sees: expanded = {}", nav.is_expanded());

    println!("\nToggling from the nav...");
    nav.toggle();
    println!("header sees: expanded = {}", header.is_expanded());

    // Teardown deregisters; no further notifications arrive.
    header.detach();
    println!("\nToggling after header detached...");
    nav.toggle();
    println!("final: expanded = {}", nav.is_expanded());
}
