//! Dashboard headline figures.

use std::collections::BTreeMap;

use serde::Serialize;
use crate::domain::{Money, Order, OrderStatus, Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_products: usize,
    pub active_products: usize,
    pub out_of_stock: usize,
    pub total_units: u64,
    pub inventory_value: Money,
    /// In stock, but at or below the low-stock threshold.
    pub low_stock: Vec<ProductId>,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    /// Sum over every order that was not cancelled.
    pub revenue: Money,
}

pub fn summarize(products: &[Product], orders: &[Order], low_stock_threshold: u32) -> Summary {
    let active_products = products.iter().filter(|p| p.is_in_stock()).count();
    let mut orders_by_status: BTreeMap<OrderStatus, usize> = OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for order in orders {
        *orders_by_status.entry(order.status()).or_default() += 1;
    }
    Summary {
        total_products: products.len(),
        active_products,
        out_of_stock: products.len() - active_products,
        total_units: products.iter().map(|p| u64::from(p.stock())).sum(),
        inventory_value: products.iter().map(Product::stock_value).sum(),
        low_stock: products
            .iter()
            .filter(|p| p.is_in_stock() && p.stock() <= low_stock_threshold)
            .map(Product::id)
            .collect(),
        orders_by_status,
        revenue: orders.iter().filter(|o| o.is_billable()).map(Order::amount).sum(),
    }
}
