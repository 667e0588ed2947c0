//! Domain events
use crate::domain::value_objects::{ProductId, ProductStatus};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductEvent {
    Created { product_id: ProductId, name: String, status: ProductStatus },
    Updated { product_id: ProductId, status: ProductStatus },
    Deleted { product_id: ProductId },
    CatalogReset { product_count: usize },
}

impl ProductEvent {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Created { product_id, .. } | Self::Updated { product_id, .. } | Self::Deleted { product_id } => Some(*product_id),
            Self::CatalogReset { .. } => None,
        }
    }
}
