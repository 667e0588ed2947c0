//! Order Aggregate
//!
//! Orders are sample data shown in the admin tables. Nothing mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::domain::value_objects::{Money, UnknownVariant};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    customer: String,
    date: NaiveDate,
    amount: Money,
    status: OrderStatus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus { #[default] Pending, Shipped, Delivered, Cancelled }

impl Order {
    pub fn new(id: impl Into<String>, customer: impl Into<String>, date: NaiveDate, amount: Money, status: OrderStatus) -> Self {
        Self { id: id.into(), customer: customer.into(), date, amount, status }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer(&self) -> &str { &self.customer }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn amount(&self) -> Money { self.amount }
    pub fn status(&self) -> OrderStatus { self.status }
    /// Cancelled orders never count toward revenue.
    pub fn is_billable(&self) -> bool { self.status != OrderStatus::Cancelled }
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [Self::Pending, Self::Shipped, Self::Delivered, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant { kind: "order status", value: s.to_string() })
    }
}
