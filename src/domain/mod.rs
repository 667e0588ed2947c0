//! Domain model: value objects, aggregates and the events they raise.
pub mod aggregates;
pub mod events;
pub mod value_objects;

pub use aggregates::{Catalog, Order, OrderStatus, Product, ProductDraft, ProductForm};
pub use events::ProductEvent;
pub use value_objects::{Category, Money, ProductId, ProductStatus};
