//! `storefront-composite` — the aggregation engine.

pub mod engine;

pub use engine::CompositeEngine;
