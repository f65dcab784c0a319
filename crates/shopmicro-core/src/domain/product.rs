//! Product entity.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A catalog product as stored in the `products` table.
///
/// Products are owned by the catalog store and never mutated by this system.
/// `price` keeps the store's exact decimal value and serializes as a decimal
/// string (`"9.99"`), the same text the store returns for `NUMERIC` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier; listings are ordered by it.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: BigDecimal,
}

impl Product {
    /// Creates a product value.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>, price: BigDecimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
