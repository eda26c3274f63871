//! Purchase Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::purchases::errors::EntitlementsError,
    ids::{EmptyIdentifier, TypedId},
};

/// Marker for purchaser identifiers.
#[derive(Debug)]
pub enum Purchaser {}

/// Marker for content identifiers.
#[derive(Debug)]
pub enum Content {}

/// Purchaser identifier.
pub type UserId = TypedId<Purchaser>;

/// Purchased content identifier (post or course).
pub type ContentId = TypedId<Content>;

impl UserId {
    /// Parse a user id from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdentifier`] for empty or whitespace-only input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmptyIdentifier> {
        Self::parse(value, "user id")
    }
}

impl ContentId {
    /// Parse a content id from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdentifier`] for empty or whitespace-only input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmptyIdentifier> {
        Self::parse(value, "content id")
    }
}

/// The kind of paid content a purchase unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    /// A paid article.
    Post,

    /// A course.
    Course,
}

impl ContentKind {
    /// Name of the purchase document field that references this kind of content.
    #[must_use]
    pub const fn store_field(self) -> &'static str {
        match self {
            Self::Post => "postId",
            Self::Course => "courseId",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Post => f.write_str("post"),
            Self::Course => f.write_str("course"),
        }
    }
}

/// A reference to a single purchasable content unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentRef {
    /// Which purchase field the id is matched against.
    pub kind: ContentKind,

    /// Content identifier within its kind.
    pub id: ContentId,
}

impl ContentRef {
    /// Parse caller input into a reference of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`EntitlementsError::InvalidInput`] for an empty id.
    pub fn parse(kind: ContentKind, id: impl AsRef<str>) -> Result<Self, EntitlementsError> {
        Ok(Self {
            kind,
            id: ContentId::new(id)?,
        })
    }

    /// Reference to a post.
    #[must_use]
    pub fn post(id: ContentId) -> Self {
        Self {
            kind: ContentKind::Post,
            id,
        }
    }

    /// Reference to a course.
    #[must_use]
    pub fn course(id: ContentId) -> Self {
        Self {
            kind: ContentKind::Course,
            id,
        }
    }
}

impl Display for ContentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Purchase lifecycle status as recorded by the payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Checkout started, payment not yet confirmed.
    Pending,

    /// Payment confirmed.
    Completed,

    /// Payment failed.
    Failed,

    /// Payment returned to the purchaser.
    Refunded,
}

impl PurchaseStatus {
    /// Stored representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Only completed purchases entitle the purchaser to the content.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Purchase Record
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Store document id.
    pub id: Option<String>,

    /// Purchaser.
    pub user_id: UserId,

    /// Purchased content unit.
    pub content: ContentRef,

    /// Current purchase status.
    pub status: PurchaseStatus,

    /// Amount charged, as recorded by the store.
    pub amount: Option<f64>,

    /// When the purchase was made.
    pub purchased_at: Option<Timestamp>,

    /// Payment processor reference (checkout session or payment intent).
    pub external_payment_reference: Option<String>,
}
