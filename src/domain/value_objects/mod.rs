//! Value Objects for the inventory catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product identifier, assigned as one past the current maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self { Self(value) }
    pub fn value(&self) -> u64 { self.0 }
    /// `None` once the id space is used up.
    pub fn next(&self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self { Self(value) }
}

/// Money value object, held in minor currency units (cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub fn from_minor(amount: i64) -> Self { Self(amount) }
    pub fn zero() -> Self { Self(0) }
    pub fn minor(&self) -> i64 { self.0 }
    /// Amount in major units, e.g. `1999` -> `19.99`.
    pub fn amount(&self) -> Decimal { Decimal::new(self.0, 2) }
    pub fn add(&self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
    pub fn multiply(&self, qty: u32) -> Money { Money(self.0.saturating_mul(i64::from(qty))) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "${}", self.amount()) }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self { iter.fold(Money::zero(), |acc, m| acc.add(m)) }
}

/// Product category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Wearables,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Wearables, Category::Accessories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Wearables => "wearables",
            Self::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Category {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant { kind: "category", value: s.to_string() })
    }
}

/// Stock status, derived from the stock level and never set directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    #[default]
    Active,
    OutOfStock,
}

impl ProductStatus {
    pub fn from_stock(stock: u32) -> Self {
        if stock > 0 { Self::Active } else { Self::OutOfStock }
    }

    pub fn as_str(&self) -> &'static str {
        match self { Self::Active => "active", Self::OutOfStock => "out-of-stock" }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "out-of-stock" => Ok(Self::OutOfStock),
            other => Err(UnknownVariant { kind: "status", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant { pub kind: &'static str, pub value: String }
impl std::error::Error for UnknownVariant {}
impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "unknown {} '{}'", self.kind, self.value) }
}
