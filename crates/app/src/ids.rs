//! Typed Identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use thiserror::Error;

/// Raised when an identifier is empty or whitespace-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} must not be empty")]
pub struct EmptyIdentifier(pub &'static str);

/// A non-empty, trimmed, opaque string identifier tagged with the kind of thing it names.
pub struct TypedId<T>(String, PhantomData<T>);

impl<T> TypedId<T> {
    /// Build an identifier from raw input, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdentifier`] when `value` is empty after trimming.
    pub fn parse(value: impl AsRef<str>, label: &'static str) -> Result<Self, EmptyIdentifier> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return Err(EmptyIdentifier(label));
        }

        Ok(Self(trimmed.to_string(), PhantomData))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> AsRef<str> for TypedId<T> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
