//! Table views over the catalog and the order list.
//!
//! Everything here is a pure function of its inputs: filter, keep the
//! collection's order, slice one page.

use serde::Serialize;
use std::str::FromStr;
use crate::domain::{Category, Order, OrderStatus, Product, ProductStatus};

/// A select-box filter: `all` or one specific value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self { Self::All }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Filter<T> {
    /// `""` and `"all"` mean no filtering.
    pub fn parse(raw: &str) -> Result<Self, T::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

/// Browse state of the products table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: Filter<Category>,
    pub status: Filter<ProductStatus>,
    /// 1-based.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self { search: String::new(), category: Filter::All, status: Filter::All, page: 1 }
    }
}

impl CatalogQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self.search.is_empty() || product.name().to_lowercase().contains(&self.search.to_lowercase());
        name_ok && self.category.matches(&product.category()) && self.status.matches(&product.status())
    }

    // Changing a filter shrinks or grows the result set, so the page goes back to 1.
    pub fn set_search(&mut self, search: impl Into<String>) { self.search = search.into(); self.page = 1; }
    pub fn set_category(&mut self, category: Filter<Category>) { self.category = category; self.page = 1; }
    pub fn set_status(&mut self, status: Filter<ProductStatus>) { self.status = status; self.page = 1; }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages { self.page += 1; true } else { false }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 { self.page -= 1; true } else { false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching records across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Filters `products` with `query` and returns the requested page. A page
/// past the end comes back empty; `page == 0` reads as page 1.
pub fn build_product_page(products: &[Product], query: &CatalogQuery, page_size: usize) -> Page<Product> {
    let page_size = page_size.max(1);
    let page = query.page.max(1);
    let filtered: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    let total = filtered.len();
    let start = (page - 1).saturating_mul(page_size);
    let items = filtered.into_iter().skip(start).take(page_size).cloned().collect();
    Page { items, total, page, page_size, total_pages: total_pages(total, page_size) }
}

pub fn filter_orders(orders: &[Order], status: Filter<OrderStatus>) -> Vec<Order> {
    orders.iter().filter(|o| status.matches(&o.status())).cloned().collect()
}
