//! Application state: the catalog, the orders and the store they persist to.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::Settings;
use crate::domain::{Catalog, Order, OrderStatus, Product, ProductEvent, ProductForm, ProductId};
use crate::sample::{sample_orders, sample_products};
use crate::storage::{self, KeyValueStore};
use crate::summary::{summarize, Summary};
use crate::view::{build_product_page, filter_orders, CatalogQuery, Filter, Page};
use crate::{InventoryError, Result};

pub struct Inventory {
    catalog: Catalog,
    orders: Vec<Order>,
    store: Arc<dyn KeyValueStore>,
    settings: Settings,
}

impl Inventory {
    /// Reads the persisted catalog once, falling back to the built-in samples.
    pub fn load(store: Arc<dyn KeyValueStore>, settings: Settings) -> Self {
        let products = storage::load_products_or(store.as_ref(), sample_products);
        info!(product_count = products.len(), "Catalog loaded");
        Self { catalog: Catalog::new(products), orders: sample_orders(), store, settings }
    }

    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn orders(&self) -> &[Order] { &self.orders }

    pub fn product(&self, id: ProductId) -> Result<&Product> {
        self.catalog.get(id).ok_or(InventoryError::NotFound(id))
    }

    pub fn products_page(&self, query: &CatalogQuery) -> Page<Product> {
        build_product_page(self.catalog.products(), query, self.settings.page_size)
    }

    pub fn orders_with_status(&self, status: Filter<OrderStatus>) -> Vec<Order> {
        filter_orders(&self.orders, status)
    }

    pub fn summary(&self) -> Summary {
        summarize(self.catalog.products(), &self.orders, self.settings.low_stock_threshold)
    }

    /// Creates a product when `target` is `None`, otherwise updates it.
    #[instrument(skip(self, form))]
    pub fn save_product(&mut self, target: Option<ProductId>, form: ProductForm) -> Result<Product> {
        let draft = form.into_draft()?;
        let product = self.mutate(|catalog| catalog.save(target, draft))?;
        info!(product_id = %product.id(), status = %product.status(), "Product saved");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub fn delete_product(&mut self, id: ProductId) -> Result<Product> {
        let removed = self.mutate(|catalog| catalog.delete(id))?;
        info!(name = %removed.name(), "Product deleted");
        Ok(removed)
    }

    /// Replaces the catalog with the built-in samples.
    pub fn reset(&mut self) -> Result<()> {
        self.mutate(|catalog| {
            catalog.reset(sample_products());
            Ok(())
        })?;
        info!(product_count = self.catalog.len(), "Catalog reset to sample data");
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<ProductEvent> { self.catalog.take_events() }

    // Applies `f` to a copy and swaps it in only once the store write succeeded.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let mut next = self.catalog.clone();
        let out = f(&mut next)?;
        storage::save_products(self.store.as_ref(), next.products())?;
        self.catalog = next;
        Ok(out)
    }
}
