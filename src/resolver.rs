//! Feature resolution engine.
//!
//! Provides [`FeatureResolver`], which walks a hero's selections against a
//! catalog and flattens everything they grant into a [`ResolvedFeatures`]
//! set. Choices are expanded from the hero's stored answers, recursively.
//!
//! Resolution never fails:
//! - a selection or answer that no longer exists in the catalog is dropped,
//! - a choice without a full answer stays in the set unresolved,
//! - a choice chain that leads back to a feature already on the current
//!   path is cut at that point, and its siblings carry on.

use crate::catalog::{require, Catalog};
use crate::content::{features_up_to, HeroClass, Kit};
use crate::error::{HeroError, Result};
use crate::feature::{ChoiceData, ClassAbilityData, Feature, FeatureKind, KitData};
use crate::hero::Hero;
use crate::id::Id;
use crate::resolved::{FeatureOrigin, ResolvedFeature, ResolvedFeatures};
use std::collections::HashSet;

/// A combination kit draws on at most this many sub-kits.
pub const MAX_KIT_COMPONENTS: usize = 2;

/// Resolve every feature a hero currently has.
///
/// # Examples
///
/// ```rust
/// use herostat::{resolve_features, Hero, MemoryCatalog};
///
/// let catalog = MemoryCatalog::empty();
/// let hero = Hero::new("hero-1");
///
/// assert!(resolve_features(&hero, &catalog).is_empty());
/// ```
pub fn resolve_features(hero: &Hero, catalog: &dyn Catalog) -> ResolvedFeatures {
    FeatureResolver::new(hero, catalog).resolve()
}

/// Log a lookup miss and turn it into `None`.
fn found<T>(lookup: Result<T>) -> Option<T> {
    match lookup {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(%err, "dropping unavailable content");
            None
        }
    }
}

/// A kit's constituent sub-kits, followed by the kit itself.
///
/// A plain kit expands to itself. Components that are missing, that name
/// the combination itself, or that go past [`MAX_KIT_COMPONENTS`] are
/// skipped.
pub fn expand_kit<'c>(catalog: &'c dyn Catalog, kit: &'c Kit) -> Vec<&'c Kit> {
    if !kit.is_combination() {
        return vec![kit];
    }
    let mut parts: Vec<&Kit> = Vec::new();
    for id in kit.components.iter().take(MAX_KIT_COMPONENTS) {
        if *id == kit.id {
            tracing::warn!(kit = %kit.id, "kit lists itself as a component");
            continue;
        }
        if let Some(part) = found(require(catalog.kit(id.as_str()), "kit", id)) {
            parts.push(part);
        }
    }
    parts.push(kit);
    parts
}

/// Keep answers that `accept` allows, without repeats, up to `count`.
fn pick(feature: &Id, answers: Vec<&str>, count: usize, accept: impl Fn(&str) -> bool) -> Vec<String> {
    let mut picked: Vec<String> = Vec::new();
    for answer in answers {
        if picked.len() >= count {
            break;
        }
        if picked.iter().any(|p| p == answer) {
            continue;
        }
        if accept(answer) {
            picked.push(answer.to_string());
        } else {
            tracing::debug!(feature = %feature, answer, "answer not allowed here, dropping");
        }
    }
    picked
}

/// Walks one hero's selections against a catalog.
pub struct FeatureResolver<'a> {
    hero: &'a Hero,
    catalog: &'a dyn Catalog,
}

impl<'a> FeatureResolver<'a> {
    pub fn new(hero: &'a Hero, catalog: &'a dyn Catalog) -> Self {
        Self { hero, catalog }
    }

    /// Resolve the hero's features.
    pub fn resolve(&self) -> ResolvedFeatures {
        let mut out = Vec::new();
        for (origin, features) in self.granted() {
            let mut path = HashSet::new();
            for feature in features {
                self.resolve_feature(feature, origin, &mut path, &mut out);
            }
        }
        ResolvedFeatures::new(out)
    }

    /// Raw feature lists granted directly by each selection, in display
    /// order: ancestry, culture, career, class, complication, kit.
    pub fn granted(&self) -> Vec<(FeatureOrigin, Vec<&'a Feature>)> {
        let hero = self.hero;
        let catalog = self.catalog;
        let mut granted: Vec<(FeatureOrigin, Vec<&'a Feature>)> = Vec::new();

        if let Some(id) = &hero.ancestry {
            if let Some(ancestry) = found(require(catalog.ancestry(id.as_str()), "ancestry", id)) {
                granted.push((FeatureOrigin::Ancestry, ancestry.features.iter().collect()));
            }
        }
        if let Some(id) = &hero.culture {
            if let Some(culture) = found(require(catalog.culture(id.as_str()), "culture", id)) {
                granted.push((FeatureOrigin::Culture, culture.all_features().collect()));
            }
        }
        if let Some(id) = &hero.career {
            if let Some(career) = found(require(catalog.career(id.as_str()), "career", id)) {
                granted.push((FeatureOrigin::Career, career.features.iter().collect()));
            }
        }
        if let Some(selection) = &hero.class {
            let id = &selection.id;
            if let Some(class) = found(require(catalog.class(id.as_str()), "class", id)) {
                let mut features: Vec<&'a Feature> =
                    features_up_to(&class.features_by_level, selection.level).collect();
                if let Some(sub_id) = &selection.subclass {
                    let subclass = require(class.subclass(sub_id.as_str()), "subclass", sub_id);
                    if let Some(subclass) = found(subclass) {
                        features.extend(features_up_to(&subclass.features_by_level, selection.level));
                    }
                }
                granted.push((FeatureOrigin::Class, features));
            }
        }
        if let Some(id) = &hero.complication {
            let complication = require(catalog.complication(id.as_str()), "complication", id);
            if let Some(complication) = found(complication) {
                granted.push((FeatureOrigin::Complication, complication.features.iter().collect()));
            }
        }
        if let Some(id) = &hero.kit {
            if let Some(kit) = found(require(catalog.kit(id.as_str()), "kit", id)) {
                let features = expand_kit(catalog, kit)
                    .into_iter()
                    .flat_map(|part| part.features.iter())
                    .collect();
                granted.push((FeatureOrigin::Kit, features));
            }
        }

        granted
    }

    /// The hero's class definition, if it still exists.
    fn class(&self) -> Option<&'a HeroClass> {
        let selection = self.hero.class.as_ref()?;
        self.catalog.class(selection.id.as_str())
    }

    /// Stored answers for a feature, or the catalog's preset selection.
    fn answers(&self, feature: &Feature, preset: Vec<&'a str>) -> Vec<&'a str> {
        let hero = self.hero;
        match hero.answers.get(feature.id.as_str()) {
            Some(answers) => answers.iter().map(String::as_str).collect(),
            None => preset,
        }
    }

    fn resolve_feature(
        &self,
        feature: &'a Feature,
        origin: FeatureOrigin,
        path: &mut HashSet<Id>,
        out: &mut Vec<ResolvedFeature>,
    ) {
        if !path.insert(feature.id.clone()) {
            let err = HeroError::InvalidState(format!(
                "feature {} is reachable from its own choice",
                feature.id
            ));
            tracing::warn!(%err, "cutting self-referential branch");
            return;
        }

        match &feature.kind {
            FeatureKind::Choice(data) => self.resolve_choice(feature, data, origin, path, out),
            FeatureKind::ClassAbility(data) => {
                let selected = self.pick_class_abilities(feature, data);
                let mut resolved = feature.clone();
                if let FeatureKind::ClassAbility(resolved_data) = &mut resolved.kind {
                    resolved_data.selected_ids = selected.into_iter().map(Id::from).collect();
                }
                out.push(ResolvedFeature {
                    feature: resolved,
                    origin,
                });
            }
            FeatureKind::Kit(data) => self.resolve_kit_grant(feature, data, origin, path, out),
            FeatureKind::Language(data) => {
                let preset = data.selected.iter().map(String::as_str).collect();
                let selected = pick(&feature.id, self.answers(feature, preset), data.count, |value| {
                    data.options.is_empty() || data.options.iter().any(|o| o == value)
                });
                let mut resolved = feature.clone();
                if let FeatureKind::Language(resolved_data) = &mut resolved.kind {
                    resolved_data.selected = selected;
                }
                out.push(ResolvedFeature {
                    feature: resolved,
                    origin,
                });
            }
            FeatureKind::Skill(data) => {
                let catalog = self.catalog;
                let preset = data.selected.iter().map(String::as_str).collect();
                let selected = pick(&feature.id, self.answers(feature, preset), data.count, |value| {
                    if data.options.iter().any(|o| o == value) {
                        return true;
                    }
                    if data.options.is_empty() && data.list_options.is_empty() {
                        return true;
                    }
                    catalog
                        .skill(value)
                        .map(|skill| data.list_options.contains(&skill.list))
                        .unwrap_or(false)
                });
                let mut resolved = feature.clone();
                if let FeatureKind::Skill(resolved_data) = &mut resolved.kind {
                    resolved_data.selected = selected;
                }
                out.push(ResolvedFeature {
                    feature: resolved,
                    origin,
                });
            }
            FeatureKind::Ability(data) => {
                let ability = require(self.catalog.ability(data.ability.as_str()), "ability", &data.ability);
                if found(ability).is_some() {
                    out.push(ResolvedFeature {
                        feature: feature.clone(),
                        origin,
                    });
                }
            }
            FeatureKind::Text | FeatureKind::Bonus(_) | FeatureKind::DamageModifier(_) => {
                out.push(ResolvedFeature {
                    feature: feature.clone(),
                    origin,
                });
            }
        }

        path.remove(&feature.id);
    }

    fn resolve_choice(
        &self,
        feature: &'a Feature,
        data: &'a ChoiceData,
        origin: FeatureOrigin,
        path: &mut HashSet<Id>,
        out: &mut Vec<ResolvedFeature>,
    ) {
        let candidates: Vec<(&'a Feature, usize)> = match self.hero.answers.get(feature.id.as_str()) {
            Some(answers) => answers
                .iter()
                .filter_map(|answer| {
                    let option = require(data.option(answer), "option", &Id::from(answer));
                    found(option).map(|option| (&option.feature, option.cost()))
                })
                .collect(),
            None => data
                .selected
                .iter()
                .map(|selected| {
                    let cost = data.option(selected.id.as_str()).map(|o| o.cost()).unwrap_or(1);
                    (selected, cost)
                })
                .collect(),
        };

        let mut picked: Vec<&'a Feature> = Vec::new();
        let mut spent = 0;
        for (candidate, cost) in candidates {
            if picked.iter().any(|p| p.id == candidate.id) {
                continue;
            }
            if spent + cost > data.count {
                tracing::debug!(feature = %feature.id, option = %candidate.id, "option exceeds choice count, dropping");
                continue;
            }
            spent += cost;
            picked.push(candidate);
        }

        if spent >= data.count {
            for option in picked {
                self.resolve_feature(option, origin, path, out);
            }
        } else {
            let mut pending = feature.clone();
            if let FeatureKind::Choice(pending_data) = &mut pending.kind {
                pending_data.selected = picked.into_iter().cloned().collect();
            }
            out.push(ResolvedFeature {
                feature: pending,
                origin,
            });
        }
    }

    fn pick_class_abilities(&self, feature: &Feature, data: &'a ClassAbilityData) -> Vec<String> {
        let catalog = self.catalog;
        let pool = self
            .class()
            .map(|class| class.abilities.as_slice())
            .filter(|pool| !pool.is_empty());
        let preset = data.selected_ids.iter().map(Id::as_str).collect();
        pick(&feature.id, self.answers(feature, preset), data.count, |id| {
            let ability = require(catalog.ability(id), "ability", &Id::new(id));
            match found(ability) {
                Some(ability) => {
                    ability.cost == data.cost
                        && pool.map_or(true, |pool| pool.iter().any(|p| p.as_str() == id))
                }
                None => false,
            }
        })
    }

    fn resolve_kit_grant(
        &self,
        feature: &'a Feature,
        data: &'a KitData,
        origin: FeatureOrigin,
        path: &mut HashSet<Id>,
        out: &mut Vec<ResolvedFeature>,
    ) {
        let catalog = self.catalog;
        let preset = data.selected.iter().map(Id::as_str).collect();
        let selected: Vec<Id> = pick(&feature.id, self.answers(feature, preset), data.count, |id| {
            match found(require(catalog.kit(id), "kit", &Id::new(id))) {
                Some(kit) => data.types.is_empty() || data.types.contains(&kit.kit_type),
                None => false,
            }
        })
        .into_iter()
        .map(Id::from)
        .collect();

        let complete = selected.len() >= data.count;
        let mut resolved = feature.clone();
        if let FeatureKind::Kit(resolved_data) = &mut resolved.kind {
            resolved_data.selected = selected.clone();
        }
        out.push(ResolvedFeature {
            feature: resolved,
            origin,
        });

        if complete {
            for id in &selected {
                let Some(kit) = catalog.kit(id.as_str()) else {
                    continue;
                };
                for part in expand_kit(catalog, kit) {
                    for kit_feature in &part.features {
                        self.resolve_feature(kit_feature, origin, path, out);
                    }
                }
            }
        }
    }
}
