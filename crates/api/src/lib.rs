//! `storefront-api` — composite HTTP surface.

pub mod app;
