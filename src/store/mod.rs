//! The process-wide preference store.
//!
//! A store holds one authoritative value, persists writes through the
//! storage adapter, and notifies every registered observer synchronously
//! before a write returns.

mod store;

pub use store::{PreferenceStore, Subscription};
