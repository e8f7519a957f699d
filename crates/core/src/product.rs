use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// Product root entity as exchanged over the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub weight: i32,
    /// Address of the backing instance that answered a read; `None` on
    /// the write path.
    #[serde(default)]
    pub service_address: Option<String>,
}

/// Backing product service contract.
///
/// Reads call the product service directly. Writes are accepted for
/// eventual propagation: implementations only wait for the change event
/// to be handed to the transport, not for downstream persistence.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_product(&self, product_id: i64) -> DomainResult<Product>;

    async fn create_product(&self, product: Product) -> DomainResult<()>;

    /// Delete-if-present: unknown ids succeed.
    async fn delete_product(&self, product_id: i64) -> DomainResult<()>;
}
