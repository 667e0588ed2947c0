//! Product Aggregate

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::value_objects::{Category, Money, ProductId, ProductStatus};
use crate::{InventoryError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    price: Money,
    stock: u32,
    status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Validated field values for creating or replacing a product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub stock: u32,
    pub description: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id, name: draft.name, category: draft.category, price: draft.price,
            stock: draft.stock, status: ProductStatus::from_stock(draft.stock), description: draft.description,
        }
    }

    pub fn id(&self) -> ProductId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn category(&self) -> Category { self.category }
    pub fn price(&self) -> Money { self.price }
    pub fn stock(&self) -> u32 { self.stock }
    pub fn status(&self) -> ProductStatus { self.status }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn is_in_stock(&self) -> bool { self.stock > 0 }
    pub fn stock_value(&self) -> Money { self.price.multiply(self.stock) }

    /// Replaces every mutable field. Returns whether anything changed.
    pub(crate) fn apply(&mut self, draft: ProductDraft) -> bool {
        let before = self.clone();
        self.name = draft.name;
        self.category = draft.category;
        self.price = draft.price;
        self.stock = draft.stock;
        self.description = draft.description;
        self.status = ProductStatus::from_stock(self.stock);
        *self != before
    }

    /// Re-derives status from stock and trims text fields the way the editor
    /// would; records loaded from storage may disagree. Returns whether
    /// anything changed.
    pub(crate) fn normalize(&mut self) -> bool {
        let before = self.clone();
        self.name = self.name.trim().to_string();
        self.description = self.description.take().map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        self.status = ProductStatus::from_stock(self.stock);
        *self != before
    }
}

/// Raw form input, as submitted by the product editor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 120, message = "name must be between 1 and 120 characters"))]
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
}

impl ProductForm {
    /// Pre-fills the editor from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.to_string(),
            price: product.price.minor().to_string(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
        }
    }

    pub fn into_draft(self) -> Result<ProductDraft> {
        let form = Self {
            name: self.name.trim().to_string(),
            description: self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            ..self
        };
        form.validate().map_err(|e| InventoryError::Validation(e.to_string()))?;

        let category = form.category.parse::<Category>()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;
        let price = parse_integer("price", &form.price)?;
        if price < 0 { return Err(InventoryError::Validation("price must not be negative".into())); }
        let stock = parse_integer("stock", &form.stock)?;
        let stock = u32::try_from(stock)
            .map_err(|_| InventoryError::Validation(format!("stock must be between 0 and {}", u32::MAX)))?;

        Ok(ProductDraft { name: form.name, category, price: Money::from_minor(price), stock, description: form.description })
    }
}

fn parse_integer(field: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InventoryError::Validation(format!("{field} must be a whole number, got '{}'", raw.trim())))
}
