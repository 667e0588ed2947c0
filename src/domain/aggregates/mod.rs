//! Aggregates module
pub mod catalog;
pub mod order;
pub mod product;

pub use catalog::Catalog;
pub use order::{Order, OrderStatus};
pub use product::{Product, ProductDraft, ProductForm};
