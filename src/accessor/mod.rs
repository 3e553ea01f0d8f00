//! Bridging a store into a single consuming render context.
//!
//! An accessor tracks one consumer's lifecycle against the store: a
//! deterministic default before hydration, one load when the context
//! becomes interactive, live tracking afterwards, and clean teardown.

mod accessor;

pub use accessor::{Phase, PreferenceAccessor};
