//! Composite orchestration over the three backing services.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::future::join_all;

use storefront_core::{
    DomainResult, Product, ProductAggregate, ProductService, Recommendation,
    RecommendationService, RecommendationSummary, Review, ReviewService, ReviewSummary,
    ServiceAddresses,
};

/// Orchestrates reads, creates and deletes across the backing services.
///
/// Holds no per-request state; every call is an independent fan-out, so
/// concurrent requests never contend on this layer.
pub struct CompositeEngine {
    products: Arc<dyn ProductService>,
    recommendations: Arc<dyn RecommendationService>,
    reviews: Arc<dyn ReviewService>,
    service_address: String,
}

impl CompositeEngine {
    pub fn new(
        products: Arc<dyn ProductService>,
        recommendations: Arc<dyn RecommendationService>,
        reviews: Arc<dyn ReviewService>,
        service_address: impl Into<String>,
    ) -> Self {
        Self {
            products,
            recommendations,
            reviews,
            service_address: service_address.into(),
        }
    }

    /// Merged read over all three services.
    ///
    /// The three lookups run concurrently. Only the product lookup can
    /// fail the request; its error propagates unchanged and the other
    /// results are discarded. Recommendation/review failures were
    /// already absorbed into empty lists by the clients.
    pub async fn get_composite(&self, product_id: i64) -> DomainResult<ProductAggregate> {
        tracing::debug!("getComposite: fan-out reads for productId {product_id}");

        let (product, recommendations, reviews) = tokio::join!(
            self.products.get_product(product_id),
            self.recommendations.get_recommendations(product_id),
            self.reviews.get_reviews(product_id),
        );
        let product = product?;

        Ok(self.build_aggregate(product, recommendations, reviews))
    }

    /// Accept a new composite: the root create plus one create per child
    /// entity, all in flight at once, with the root's `product_id`
    /// injected into every child.
    ///
    /// Completes when every sub-create has finished and fails with the
    /// first error seen; siblings still run to completion and nothing is
    /// rolled back, so a failure can leave sub-entities created.
    pub async fn create_composite(&self, aggregate: ProductAggregate) -> DomainResult<()> {
        let product_id = aggregate.product_id;
        tracing::debug!("createComposite: new composite entity for productId {product_id}");

        let mut operations: Vec<Pin<Box<dyn Future<Output = DomainResult<()>> + Send + '_>>> =
            Vec::new();

        let product = Product {
            product_id,
            name: aggregate.name.clone(),
            weight: aggregate.weight,
            service_address: None,
        };
        operations.push(Box::pin(self.products.create_product(product)));

        if let Some(recommendations) = &aggregate.recommendations {
            for summary in recommendations {
                let recommendation = Recommendation {
                    product_id,
                    recommendation_id: summary.recommendation_id,
                    author: summary.author.clone(),
                    rate: summary.rate,
                    content: summary.content.clone(),
                    service_address: None,
                };
                operations.push(Box::pin(
                    self.recommendations.create_recommendation(recommendation),
                ));
            }
        }

        if let Some(reviews) = &aggregate.reviews {
            for summary in reviews {
                let review = Review {
                    product_id,
                    review_id: summary.review_id,
                    author: summary.author.clone(),
                    subject: summary.subject.clone(),
                    content: summary.content.clone(),
                    service_address: None,
                };
                operations.push(Box::pin(self.reviews.create_review(review)));
            }
        }

        for result in join_all(operations).await {
            result?;
        }

        tracing::debug!("createComposite: composite entities created for productId {product_id}");
        Ok(())
    }

    /// Delete everything known about a product id, across all three
    /// services concurrently.
    ///
    /// Idempotent: deletes are delete-if-present downstream, so deleting
    /// an absent id succeeds.
    pub async fn delete_composite(&self, product_id: i64) -> DomainResult<()> {
        tracing::debug!("deleteComposite: deleting composite entities for productId {product_id}");

        let (product, recommendations, reviews) = tokio::join!(
            self.products.delete_product(product_id),
            self.recommendations.delete_recommendations(product_id),
            self.reviews.delete_reviews(product_id),
        );
        product?;
        recommendations?;
        reviews?;

        tracing::debug!("deleteComposite: composite entities deleted for productId {product_id}");
        Ok(())
    }

    fn build_aggregate(
        &self,
        product: Product,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
    ) -> ProductAggregate {
        // Diagnostic snapshot: the first element's address per list,
        // empty string when the list is empty.
        let recommendation_address = recommendations
            .first()
            .and_then(|r| r.service_address.clone())
            .unwrap_or_default();
        let review_address = reviews
            .first()
            .and_then(|r| r.service_address.clone())
            .unwrap_or_default();
        let product_address = product.service_address.unwrap_or_default();

        let recommendation_summaries = recommendations
            .into_iter()
            .map(|r| RecommendationSummary {
                recommendation_id: r.recommendation_id,
                author: r.author,
                rate: r.rate,
                content: r.content,
            })
            .collect();
        let review_summaries = reviews
            .into_iter()
            .map(|r| ReviewSummary {
                review_id: r.review_id,
                author: r.author,
                subject: r.subject,
                content: r.content,
            })
            .collect();

        ProductAggregate {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendations: Some(recommendation_summaries),
            reviews: Some(review_summaries),
            service_addresses: Some(ServiceAddresses {
                composite: self.service_address.clone(),
                product: product_address,
                review: review_address,
                recommendation: recommendation_address,
            }),
        }
    }
}
