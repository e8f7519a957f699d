//! `storefront-core` — shared domain contracts.
//!
//! Entity DTOs, the composite read model, the domain error taxonomy, the
//! shared HTTP error body, and the backing-service traits. No transport
//! or framework concerns live here.

pub mod composite;
pub mod error;
pub mod http;
pub mod product;
pub mod recommendation;
pub mod review;

pub use composite::{ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses};
pub use error::{DomainError, DomainResult};
pub use http::HttpErrorInfo;
pub use product::{Product, ProductService};
pub use recommendation::{Recommendation, RecommendationService};
pub use review::{Review, ReviewService};
