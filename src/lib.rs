//! OpenSASE Inventory
//!
//! Self-hosted inventory and order administration.
//!
//! ## Features
//! - Product catalog with create / update / delete
//! - Filtered, paginated product and order tables
//! - Stock status derived from stock level
//! - Whole-catalog persistence to a key-value store
//! - Dashboard summary figures

pub mod api;
pub mod config;
pub mod domain;
pub mod inventory;
pub mod sample;
pub mod storage;
pub mod summary;
pub mod view;

pub use domain::{Catalog, Category, Money, Order, OrderStatus, Product, ProductForm, ProductId, ProductStatus};
pub use inventory::Inventory;
pub use view::{CatalogQuery, Filter, Page};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Product {0} not found")]
    NotFound(ProductId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot assign a product id: the catalog is empty")]
    EmptyCollection,

    #[error("Cannot assign a product id: {0} is the largest id available")]
    IdSpaceExhausted(ProductId),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
