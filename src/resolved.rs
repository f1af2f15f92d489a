//! Resolved results module.
//!
//! Contains [`ResolvedFeatures`], the flattened feature set of one hero,
//! and [`StatBreakdown`], a derived value with every part that went into
//! it. Both are recomputed on demand and never stored.

use crate::error::HeroError;
use crate::feature::{Feature, FeatureField, FeatureKind};
use crate::stack::{Contribution, Contributions};
use serde::{Deserialize, Serialize};

/// Which building block granted a resolved feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureOrigin {
    Ancestry,
    Culture,
    Career,
    Class,
    Complication,
    Kit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFeature {
    pub feature: Feature,
    pub origin: FeatureOrigin,
}

/// The features currently in effect for a hero, in display order.
///
/// Complete choices have already been replaced by their selected options.
/// Incomplete ones stay in the set, with whatever was validly selected, so
/// a caller can prompt for the rest; they contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFeatures {
    features: Vec<ResolvedFeature>,
}

impl ResolvedFeatures {
    pub fn new(features: Vec<ResolvedFeature>) -> Self {
        Self { features }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features that may contribute to derived stats.
    pub fn complete(&self) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .map(|rf| &rf.feature)
            .filter(|f| f.is_complete())
    }

    /// Choices still waiting for answers.
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedFeature> {
        self.features.iter().filter(|rf| !rf.feature.is_complete())
    }

    /// One `IncompleteChoice` per unresolved choice, for prompting.
    pub fn prompts(&self) -> Vec<HeroError> {
        self.unresolved()
            .map(|rf| {
                let missing = rf.feature.missing_selections();
                let count = required_count(&rf.feature);
                HeroError::IncompleteChoice {
                    feature: rf.feature.id.clone(),
                    selected: count.saturating_sub(missing),
                    count,
                }
            })
            .collect()
    }

    pub fn by_origin(&self, origin: FeatureOrigin) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(move |rf| rf.origin == origin)
            .map(|rf| &rf.feature)
    }

    /// Bonus contributions of complete features, keyed by target field.
    ///
    /// Each amount is evaluated at `level`.
    pub fn contributions(&self, level: u32) -> Contributions<FeatureField> {
        let mut contributions = Contributions::new();
        for feature in self.complete() {
            if let FeatureKind::Bonus(bonus) = &feature.kind {
                contributions.push(
                    bonus.field,
                    Contribution {
                        feature: feature.id.clone(),
                        source: feature.name.clone(),
                        amount: bonus.amount(level),
                    },
                );
            }
        }
        contributions
    }
}

fn required_count(feature: &Feature) -> usize {
    match &feature.kind {
        FeatureKind::Choice(data) => data.count,
        FeatureKind::ClassAbility(data) => data.count,
        FeatureKind::Kit(data) => data.count,
        FeatureKind::Language(data) => data.count,
        FeatureKind::Skill(data) => data.count,
        FeatureKind::Text
        | FeatureKind::Ability(_)
        | FeatureKind::Bonus(_)
        | FeatureKind::DamageModifier(_) => 0,
    }
}

impl<'a> IntoIterator for &'a ResolvedFeatures {
    type Item = &'a ResolvedFeature;
    type IntoIter = std::slice::Iter<'a, ResolvedFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// A derived value with full breakdown information.
///
/// `sources` are the additive parts in the order they were collected;
/// `adjustments` record floors applied afterwards, with the value after
/// each one.
///
/// # Examples
///
/// ```rust
/// use herostat::feature::FeatureField;
/// use herostat::StatBreakdown;
///
/// let mut stamina = StatBreakdown::new(FeatureField::Stamina);
/// stamina.add_source("Class: Fury", 21.0);
/// stamina.add_source("Curse", -30.0);
/// stamina.floor_at("Minimum", 1.0);
///
/// assert_eq!(stamina.value, 1.0);
/// assert_eq!(stamina.adjustments.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBreakdown {
    pub field: FeatureField,
    pub value: f64,
    pub sources: Vec<(String, f64)>,
    pub adjustments: Vec<(String, f64)>,
}

impl StatBreakdown {
    pub fn new(field: FeatureField) -> Self {
        Self {
            field,
            value: 0.0,
            sources: Vec::new(),
            adjustments: Vec::new(),
        }
    }

    /// Add a part and update the running value.
    pub fn add_source(&mut self, description: impl Into<String>, value: f64) {
        self.value += value;
        self.sources.push((description.into(), value));
    }

    /// Raise the value to `floor` if it is below it, recording the change.
    pub fn floor_at(&mut self, description: impl Into<String>, floor: f64) {
        if self.value < floor {
            self.value = floor;
            self.adjustments.push((description.into(), floor));
        }
    }
}
