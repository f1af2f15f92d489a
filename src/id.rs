//! Identifier module.
//!
//! Provides the `Id` type, an interned string identifier shared by catalog
//! entries, features and heroes. Uses `Arc<str>` so cloning an id while
//! flattening feature trees never copies the text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::sync::Arc;

/// Interned string identifier.
///
/// Catalog content refers to other content by `Id` (a kit grant names kit
/// ids, a choice answer names option feature ids). Ids serialize as plain
/// strings so hero documents stay readable.
///
/// # Examples
///
/// ```rust
/// use herostat::Id;
///
/// let dwarf = Id::new("ancestry-dwarf");
/// let same: Id = "ancestry-dwarf".into();
///
/// assert_eq!(dwarf, same);
/// assert_eq!(dwarf.as_str(), "ancestry-dwarf");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(Arc<str>);

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Id::from(s))
    }
}

impl Id {
    /// Create a new `Id` from a string slice.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this `Id`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&String> for Id {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
