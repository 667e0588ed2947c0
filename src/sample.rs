//! Built-in sample data, used when no catalog has been persisted yet.

use chrono::NaiveDate;
use crate::domain::{Category, Money, Order, OrderStatus, Product, ProductDraft, ProductId};

pub fn sample_products() -> Vec<Product> {
    [
        (1, "Wireless Earbuds Pro", Category::Electronics, 1999, 5),
        (2, "Smart Fitness Watch", Category::Wearables, 12999, 0),
        (3, "Phone Case - Blue", Category::Accessories, 199, 3),
        (4, "Bluetooth Speaker", Category::Electronics, 14999, 42),
        (5, "USB-C Charging Cable", Category::Accessories, 1499, 7),
        (6, "Wireless Mouse", Category::Electronics, 899, 15),
        (7, "Laptop Stand", Category::Accessories, 2499, 8),
        (8, "Noise Cancelling Headphones", Category::Electronics, 8999, 0),
    ]
    .into_iter()
    .map(|(id, name, category, price, stock)| {
        Product::new(
            ProductId::new(id),
            ProductDraft { name: name.to_string(), category, price: Money::from_minor(price), stock, description: None },
        )
    })
    .collect()
}

pub fn sample_orders() -> Vec<Order> {
    [
        ("ORD-2456", "John Doe", 15, 3498, OrderStatus::Pending),
        ("ORD-2455", "Jane Smith", 14, 12999, OrderStatus::Shipped),
        ("ORD-2454", "Bob Johnson", 13, 16998, OrderStatus::Delivered),
        ("ORD-2453", "Alice Brown", 12, 199, OrderStatus::Cancelled),
        ("ORD-2452", "Charlie Wilson", 11, 8999, OrderStatus::Delivered),
    ]
    .into_iter()
    .filter_map(|(id, customer, day, amount, status)| {
        let date = NaiveDate::from_ymd_opt(2023, 10, day)?;
        Some(Order::new(id, customer, date, Money::from_minor(amount), status))
    })
    .collect()
}
