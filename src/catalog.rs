//! Catalog store module.
//!
//! The catalog is the read-only source of canonical game content. The
//! engine only ever queries it by id through the [`Catalog`] trait, so tests
//! and applications can substitute their own store. [`MemoryCatalog`] is the
//! stock implementation, loaded once from a JSON document.

use crate::content::{Ability, Ancestry, Career, Complication, Culture, HeroClass, Kit, Skill};
use crate::error::{HeroError, Result};
use crate::feature::{Feature, FeatureKind};
use crate::graph::ChoiceGraph;
use crate::id::Id;
use crate::rules::Rules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only lookup of catalog content by id.
///
/// Every lookup returns `None` for an unknown id; callers treat that as
/// "content unavailable", never as a failure. Implementations must be
/// shareable across threads since resolution may run in parallel.
///
/// # Examples
///
/// ```rust
/// use herostat::{Catalog, MemoryCatalog};
///
/// let catalog = MemoryCatalog::empty();
/// assert!(catalog.ancestry("ancestry-dwarf").is_none());
/// assert_eq!(catalog.rules().base_speed, 5);
/// ```
pub trait Catalog: Send + Sync {
    fn ancestry(&self, id: &str) -> Option<&Ancestry>;
    fn culture(&self, id: &str) -> Option<&Culture>;
    fn career(&self, id: &str) -> Option<&Career>;
    fn class(&self, id: &str) -> Option<&HeroClass>;
    fn kit(&self, id: &str) -> Option<&Kit>;
    fn complication(&self, id: &str) -> Option<&Complication>;
    fn ability(&self, id: &str) -> Option<&Ability>;

    /// Look up a skill by name.
    fn skill(&self, name: &str) -> Option<&Skill>;

    /// Numeric tables for the derived-stat formulas.
    fn rules(&self) -> &Rules;
}

/// Turn a lookup into a `Result` so misses carry what was missing.
pub(crate) fn require<T>(value: Option<T>, kind: &'static str, id: &Id) -> Result<T> {
    value.ok_or_else(|| HeroError::MissingReference {
        kind,
        id: id.clone(),
    })
}

/// Serialized form of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub ancestries: Vec<Ancestry>,
    pub cultures: Vec<Culture>,
    pub careers: Vec<Career>,
    pub classes: Vec<HeroClass>,
    pub kits: Vec<Kit>,
    pub complications: Vec<Complication>,
    pub abilities: Vec<Ability>,
    pub skills: Vec<Skill>,
    pub rules: Rules,
}

/// An immutable in-memory catalog.
///
/// Entries are keyed by id; loading a document with a repeated id keeps
/// the last entry.
///
/// # Examples
///
/// ```rust
/// use herostat::{Catalog, MemoryCatalog};
///
/// let catalog = MemoryCatalog::from_json(r#"{
///     "careers": [ { "id": "career-sage", "name": "Sage" } ],
///     "rules": { "base_speed": 6 }
/// }"#).unwrap();
///
/// assert_eq!(catalog.career("career-sage").unwrap().name, "Sage");
/// assert_eq!(catalog.rules().base_speed, 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    ancestries: BTreeMap<Id, Ancestry>,
    cultures: BTreeMap<Id, Culture>,
    careers: BTreeMap<Id, Career>,
    classes: BTreeMap<Id, HeroClass>,
    kits: BTreeMap<Id, Kit>,
    complications: BTreeMap<Id, Complication>,
    abilities: BTreeMap<Id, Ability>,
    skills: BTreeMap<String, Skill>,
    rules: Rules,
}

fn index<T>(kind: &'static str, entries: Vec<T>, key: impl Fn(&T) -> Id) -> BTreeMap<Id, T> {
    let mut map = BTreeMap::new();
    for entry in entries {
        let id = key(&entry);
        if map.insert(id.clone(), entry).is_some() {
            tracing::warn!(kind, %id, "duplicate catalog id, keeping the last entry");
        }
    }
    map
}

impl MemoryCatalog {
    /// Create an empty catalog with default rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from its serialized form.
    pub fn from_data(data: CatalogData) -> Self {
        let catalog = Self {
            ancestries: index("ancestry", data.ancestries, |a| a.id.clone()),
            cultures: index("culture", data.cultures, |c| c.id.clone()),
            careers: index("career", data.careers, |c| c.id.clone()),
            classes: index("class", data.classes, |c| c.id.clone()),
            kits: index("kit", data.kits, |k| k.id.clone()),
            complications: index("complication", data.complications, |c| c.id.clone()),
            abilities: index("ability", data.abilities, |a| a.id.clone()),
            skills: data
                .skills
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
            rules: data.rules,
        };
        tracing::debug!(
            ancestries = catalog.ancestries.len(),
            classes = catalog.classes.len(),
            kits = catalog.kits.len(),
            abilities = catalog.abilities.len(),
            "catalog loaded"
        );
        catalog
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn insert_ancestry(&mut self, ancestry: Ancestry) {
        self.ancestries.insert(ancestry.id.clone(), ancestry);
    }

    pub fn insert_culture(&mut self, culture: Culture) {
        self.cultures.insert(culture.id.clone(), culture);
    }

    pub fn insert_career(&mut self, career: Career) {
        self.careers.insert(career.id.clone(), career);
    }

    pub fn insert_class(&mut self, class: HeroClass) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn insert_kit(&mut self, kit: Kit) {
        self.kits.insert(kit.id.clone(), kit);
    }

    pub fn insert_complication(&mut self, complication: Complication) {
        self.complications.insert(complication.id.clone(), complication);
    }

    pub fn insert_ability(&mut self, ability: Ability) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    pub fn insert_skill(&mut self, skill: Skill) {
        self.skills.insert(skill.name.clone(), skill);
    }

    /// Every top-level feature list in the catalog, in a stable order.
    fn feature_lists(&self) -> Vec<&[Feature]> {
        let mut lists: Vec<&[Feature]> = Vec::new();
        lists.extend(self.ancestries.values().map(|a| a.features.as_slice()));
        for culture in self.cultures.values() {
            lists.push(&culture.features);
            lists.extend(
                [&culture.environment, &culture.organization, &culture.upbringing]
                    .into_iter()
                    .flatten()
                    .map(std::slice::from_ref),
            );
        }
        lists.extend(self.careers.values().map(|c| c.features.as_slice()));
        for class in self.classes.values() {
            lists.extend(class.features_by_level.iter().map(|l| l.features.as_slice()));
            for subclass in &class.subclasses {
                lists.extend(subclass.features_by_level.iter().map(|l| l.features.as_slice()));
            }
        }
        lists.extend(self.complications.values().map(|c| c.features.as_slice()));
        lists.extend(self.kits.values().map(|k| k.features.as_slice()));
        lists
    }

    /// Check the catalog for content the engine will have to skip.
    ///
    /// Reports self-referential choice chains and references to abilities,
    /// kits or free strikes that do not exist. An empty result means every
    /// reference resolves. The engine copes with all of these at resolution
    /// time; this is for content authors.
    pub fn audit(&self) -> Vec<HeroError> {
        let mut problems = Vec::new();
        let mut graph = ChoiceGraph::new();

        let mut stack: Vec<&Feature> = self.feature_lists().into_iter().flatten().collect();
        while let Some(feature) = stack.pop() {
            graph.add_feature(feature.id.clone());
            match &feature.kind {
                FeatureKind::Choice(data) => {
                    for option in &data.options {
                        graph.add_option(feature.id.clone(), option.feature.id.clone());
                        stack.push(&option.feature);
                    }
                }
                FeatureKind::Ability(data) => {
                    if let Err(err) = require(self.ability(data.ability.as_str()), "ability", &data.ability) {
                        problems.push(err);
                    }
                }
                FeatureKind::Kit(data) => {
                    for id in &data.selected {
                        if let Err(err) = require(self.kit(id.as_str()), "kit", id) {
                            problems.push(err);
                        }
                    }
                }
                FeatureKind::Text
                | FeatureKind::Bonus(_)
                | FeatureKind::DamageModifier(_)
                | FeatureKind::ClassAbility(_)
                | FeatureKind::Language(_)
                | FeatureKind::Skill(_) => {}
            }
        }

        for kit in self.kits.values() {
            for id in &kit.components {
                if let Err(err) = require(self.kit(id.as_str()), "kit", id) {
                    problems.push(err);
                }
            }
            if kit.components.len() > 2 {
                problems.push(HeroError::InvalidState(format!(
                    "kit {} combines {} kits, at most 2 are allowed",
                    kit.id,
                    kit.components.len()
                )));
            }
        }
        for class in self.classes.values() {
            for id in &class.abilities {
                if let Err(err) = require(self.ability(id.as_str()), "ability", id) {
                    problems.push(err);
                }
            }
        }
        for id in &self.rules.free_strikes {
            if let Err(err) = require(self.ability(id.as_str()), "ability", id) {
                problems.push(err);
            }
        }

        problems.extend(graph.cycles());
        problems
    }
}

impl Catalog for MemoryCatalog {
    fn ancestry(&self, id: &str) -> Option<&Ancestry> {
        self.ancestries.get(id)
    }

    fn culture(&self, id: &str) -> Option<&Culture> {
        self.cultures.get(id)
    }

    fn career(&self, id: &str) -> Option<&Career> {
        self.careers.get(id)
    }

    fn class(&self, id: &str) -> Option<&HeroClass> {
        self.classes.get(id)
    }

    fn kit(&self, id: &str) -> Option<&Kit> {
        self.kits.get(id)
    }

    fn complication(&self, id: &str) -> Option<&Complication> {
        self.complications.get(id)
    }

    fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.get(id)
    }

    fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }
}
