//! The navigation-sidebar expansion preference.
//!
//! The concrete preference this crate was built around: one persisted
//! boolean, "is the navigation panel expanded," defaulting to expanded.

mod panel;

pub use panel::{sidebar_store, SidebarView, SIDEBAR_DEFAULT, SIDEBAR_KEY};
