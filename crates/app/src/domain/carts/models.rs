//! Cart Models

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Course identifier as used by the catalog: numeric ids from the course
/// platform, or string ids from the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    /// Course platform id.
    Numeric(u64),

    /// Content store id.
    Text(String),
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Numeric(id) => Display::fmt(id, f),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for CourseId {
    type Err = Infallible;

    /// All-digit input is a numeric id; anything else is a string id.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(value
            .parse::<u64>()
            .map_or_else(|_| Self::from(value), Self::Numeric))
    }
}

impl From<u64> for CourseId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// CartItem Model
///
/// Everything but `course_id` is display and checkout metadata that the
/// store carries without interpreting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique key within the cart.
    pub course_id: CourseId,

    /// Course title.
    pub title: String,

    /// List price in pence/cents.
    pub price: u64,

    /// Discounted price in pence/cents, when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<u64>,

    /// Catalog URL slug.
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Featured image URL.
    pub featured_image: Option<String>,
}

impl CartItem {
    /// Price charged at checkout: the sale price when present.
    #[must_use]
    pub fn effective_price(&self) -> u64 {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Point-in-time copy of the cart handed to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Items in insertion order.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of effective prices in pence/cents.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .map(CartItem::effective_price)
            .fold(0, u64::saturating_add)
    }
}
