//! Stacking rules.
//!
//! The resolved feature set may grant the same field or damage type more
//! than once. Contributions are collected per key, in resolution order, and
//! combined by a [`StackRule`]. Collection order never changes a sum or a
//! maximum, so concatenation order of the resolved set cannot leak into a
//! stat.

use crate::id::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How contributions for the same key combine.
///
/// # Examples
///
/// ```rust
/// use herostat::stack::StackRule;
///
/// assert_eq!(StackRule::Additive.combine([2, 3]), 5);
/// assert_eq!(StackRule::Max.combine([2, 5]), 5);
/// assert_eq!(StackRule::Max.combine(std::iter::empty::<i32>()), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackRule {
    /// Contributions are summed.
    Additive,
    /// The largest contribution wins.
    Max,
}

impl StackRule {
    /// Combine amounts. An empty input combines to 0.
    pub fn combine(self, amounts: impl IntoIterator<Item = i32>) -> i32 {
        let amounts = amounts.into_iter();
        match self {
            StackRule::Additive => amounts.fold(0, i32::saturating_add),
            StackRule::Max => amounts.max().unwrap_or(0),
        }
    }
}

/// One feature's share of a keyed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub feature: Id,
    pub source: String,
    pub amount: i32,
}

/// Contribution lists keyed by field, damage type, or any ordered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributions<K: Ord> {
    entries: BTreeMap<K, Vec<Contribution>>,
}

impl<K: Ord> Contributions<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, key: K, contribution: Contribution) {
        self.entries.entry(key).or_default().push(contribution);
    }

    /// Contributions for `key`, in the order they were pushed.
    pub fn get(&self, key: &K) -> &[Contribution] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Combined total for `key`; 0 when nothing contributed.
    pub fn total(&self, key: &K, rule: StackRule) -> i32 {
        rule.combine(self.get(key).iter().map(|c| c.amount))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K: Ord> Default for Contributions<K> {
    fn default() -> Self {
        Self::new()
    }
}
