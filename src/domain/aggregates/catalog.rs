//! Catalog Aggregate
//!
//! Owns the ordered product list. All product mutations go through here so
//! that id assignment and status derivation stay in one place.

use tracing::{debug, warn};
use crate::domain::aggregates::product::{Product, ProductDraft, ProductForm};
use crate::domain::events::ProductEvent;
use crate::domain::value_objects::ProductId;
use crate::{InventoryError, Result};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    events: Vec<ProductEvent>,
}

impl Catalog {
    pub fn new(mut products: Vec<Product>) -> Self {
        for p in products.iter_mut() {
            if p.normalize() {
                debug!(product_id = %p.id(), "Normalized stored product");
            }
            // Kept as-is; the editor rejects it until the offending field is corrected.
            if let Err(e) = ProductForm::from_product(p).into_draft() {
                warn!(product_id = %p.id(), error = %e, "Stored product fails form validation");
            }
        }
        Self { products, events: vec![] }
    }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }
    pub fn get(&self, id: ProductId) -> Option<&Product> { self.products.iter().find(|p| p.id() == id) }

    /// One past the largest id in the catalog.
    pub fn next_id(&self) -> Result<ProductId> {
        let max = self.products.iter().map(Product::id).max().ok_or(InventoryError::EmptyCollection)?;
        max.next().ok_or(InventoryError::IdSpaceExhausted(max))
    }

    /// Creates when `target` is `None`, otherwise replaces the target's fields.
    pub fn save(&mut self, target: Option<ProductId>, draft: ProductDraft) -> Result<Product> {
        match target {
            Some(id) => self.update(id, draft),
            None => self.create(draft),
        }
    }

    pub fn create(&mut self, draft: ProductDraft) -> Result<Product> {
        let id = self.next_id()?;
        let product = Product::new(id, draft);
        self.products.push(product.clone());
        self.raise_event(ProductEvent::Created { product_id: id, name: product.name().to_string(), status: product.status() });
        Ok(product)
    }

    pub fn update(&mut self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        let product = self.products.iter_mut().find(|p| p.id() == id).ok_or(InventoryError::NotFound(id))?;
        let changed = product.apply(draft);
        let product = product.clone();
        if changed {
            self.raise_event(ProductEvent::Updated { product_id: id, status: product.status() });
        }
        Ok(product)
    }

    pub fn delete(&mut self, id: ProductId) -> Result<Product> {
        let index = self.products.iter().position(|p| p.id() == id).ok_or(InventoryError::NotFound(id))?;
        let removed = self.products.remove(index);
        self.raise_event(ProductEvent::Deleted { product_id: id });
        Ok(removed)
    }

    pub fn reset(&mut self, products: Vec<Product>) {
        let fresh = Self::new(products);
        self.products = fresh.products;
        self.raise_event(ProductEvent::CatalogReset { product_count: self.products.len() });
    }

    pub fn take_events(&mut self) -> Vec<ProductEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: ProductEvent) { self.events.push(e); }
}
