//! Error types for feature resolution.
//!
//! The resolution engine and the derived-stat queries never fail. These
//! variants describe what was dropped or left open along the way; they are
//! logged, returned by [`MemoryCatalog::audit`](crate::MemoryCatalog::audit),
//! and surfaced by loaders.

use crate::id::Id;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[Id]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur while loading or resolving hero content.
///
/// # Examples
///
/// ```rust
/// use herostat::{HeroError, Id};
///
/// let err = HeroError::MissingReference { kind: "kit", id: Id::new("kit-old") };
/// assert_eq!(err.to_string(), "Missing kit: kit-old");
/// ```
#[derive(Debug, Error)]
pub enum HeroError {
    /// A stored selection no longer resolves in the catalog.
    #[error("Missing {kind}: {id}")]
    MissingReference { kind: &'static str, id: Id },

    /// A choice has fewer selections than it requires.
    #[error("Choice {feature} has {selected} of {count} selections")]
    IncompleteChoice {
        feature: Id,
        selected: usize,
        count: usize,
    },

    /// A choice chain refers back to itself.
    ///
    /// Contains the ids on the chain, closed by repeating the first one.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<Id> },

    /// Any other inconsistency that ends resolution of one branch.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A catalog or hero document could not be parsed.
    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HeroError>;
