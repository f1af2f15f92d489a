//! Derived-stat calculator.
//!
//! [`DerivedStats`] answers every "what is this hero's X" question from a
//! hero, a catalog and the hero's resolved feature set. Each query is pure
//! and total: missing content is the neutral element of whatever the query
//! accumulates, so a half-built hero still gets a consistent sheet.
//!
//! Numeric fields are computed as a [`StatBreakdown`] first and the plain
//! getters read its value, so a tooltip and the sheet can never disagree.

use crate::catalog::Catalog;
use crate::content::{Ability, AbilityUsage, Ancestry, HeroClass, Kit, Size, SkillList};
use crate::feature::{
    level_factor, Characteristic, DamageModifier, DamageModifierKind, Feature, FeatureField, FeatureKind,
};
use crate::hero::Hero;
use crate::id::Id;
use crate::resolved::{ResolvedFeatures, StatBreakdown};
use crate::resolver::{expand_kit, resolve_features};
use crate::stack::{Contribution, Contributions, StackRule};
use std::collections::{BTreeMap, BTreeSet};

/// Display name used when the hero has no class.
pub const DEFAULT_HEROIC_RESOURCE: &str = "Heroic Resource";

/// Derived values of one hero.
///
/// # Examples
///
/// ```rust
/// use herostat::{DerivedStats, Hero, MemoryCatalog};
///
/// let catalog = MemoryCatalog::empty();
/// let hero = Hero::new("hero-1");
/// let stats = DerivedStats::new(&hero, &catalog);
///
/// assert_eq!(stats.stamina(), 1);
/// assert_eq!(stats.speed(), 5);
/// assert!(stats.languages().is_empty());
/// ```
pub struct DerivedStats<'a> {
    hero: &'a Hero,
    catalog: &'a dyn Catalog,
    features: ResolvedFeatures,
}

impl<'a> DerivedStats<'a> {
    /// Resolve the hero's features and wrap them for querying.
    pub fn new(hero: &'a Hero, catalog: &'a dyn Catalog) -> Self {
        let features = resolve_features(hero, catalog);
        Self::with_features(hero, catalog, features)
    }

    /// Use an already resolved feature set.
    pub fn with_features(hero: &'a Hero, catalog: &'a dyn Catalog, features: ResolvedFeatures) -> Self {
        Self {
            hero,
            catalog,
            features,
        }
    }

    pub fn hero(&self) -> &'a Hero {
        self.hero
    }

    pub fn features(&self) -> &ResolvedFeatures {
        &self.features
    }

    fn ancestry(&self) -> Option<&'a Ancestry> {
        let id = self.hero.ancestry.as_ref()?;
        self.catalog.ancestry(id.as_str())
    }

    fn class(&self) -> Option<&'a HeroClass> {
        let selection = self.hero.class.as_ref()?;
        self.catalog.class(selection.id.as_str())
    }

    fn contributions(&self) -> Contributions<FeatureField> {
        self.features.contributions(self.level())
    }

    /// Class level, 0 without a class.
    pub fn level(&self) -> u32 {
        self.hero.level()
    }

    /// Level band: 1 for levels 1-3, 2 for 4-6, 3 for 7-9, 4 for 10.
    pub fn echelon(&self) -> u32 {
        if self.hero.class.is_none() {
            return 0;
        }
        self.level().saturating_add(2) / 3
    }

    pub fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.breakdown(characteristic.field()).value as i32
    }

    pub fn characteristics(&self) -> BTreeMap<Characteristic, i32> {
        Characteristic::ALL
            .into_iter()
            .map(|c| (c, self.characteristic(c)))
            .collect()
    }

    pub fn stamina(&self) -> i32 {
        self.breakdown(FeatureField::Stamina).value as i32
    }

    /// Half of stamina, rounded down.
    pub fn winded(&self) -> i32 {
        self.stamina() / 2
    }

    pub fn recoveries(&self) -> i32 {
        self.breakdown(FeatureField::Recoveries).value as i32
    }

    pub fn recovery_value(&self) -> i32 {
        self.breakdown(FeatureField::RecoveryValue).value as i32
    }

    pub fn speed(&self) -> i32 {
        self.breakdown(FeatureField::Speed).value as i32
    }

    pub fn stability(&self) -> i32 {
        self.breakdown(FeatureField::Stability).value as i32
    }

    pub fn disengage(&self) -> i32 {
        self.breakdown(FeatureField::Disengage).value as i32
    }

    /// Ancestry size, `1M` without an ancestry.
    pub fn size(&self) -> Size {
        self.ancestry().map(|a| a.size).unwrap_or_default()
    }

    /// Numeric size after category scaling and bonuses.
    pub fn size_value(&self) -> f64 {
        self.breakdown(FeatureField::Size).value
    }

    /// Every part that makes up one field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use herostat::feature::FeatureField;
    /// use herostat::{DerivedStats, Hero, MemoryCatalog};
    ///
    /// let catalog = MemoryCatalog::empty();
    /// let hero = Hero::new("hero-1");
    /// let stamina = DerivedStats::new(&hero, &catalog).breakdown(FeatureField::Stamina);
    ///
    /// assert_eq!(stamina.value, 1.0);
    /// assert_eq!(stamina.adjustments, vec![("Minimum".to_string(), 1.0)]);
    /// ```
    pub fn breakdown(&self, field: FeatureField) -> StatBreakdown {
        let rules = self.catalog.rules();
        let mut breakdown = StatBreakdown::new(field);

        match field {
            FeatureField::Might
            | FeatureField::Agility
            | FeatureField::Reason
            | FeatureField::Intuition
            | FeatureField::Presence => {
                if let Some(characteristic) = field.characteristic() {
                    let score = self.hero.characteristics.get(characteristic);
                    breakdown.add_source("Score", score as f64);
                }
            }
            FeatureField::Stamina => {
                if let Some(ancestry) = self.ancestry() {
                    if ancestry.stamina != 0 {
                        breakdown.add_source(format!("Ancestry: {}", ancestry.name), ancestry.stamina as f64);
                    }
                }
                if let Some(class) = self.class() {
                    let levels = level_factor(self.level().saturating_sub(1));
                    breakdown.add_source(format!("Class: {}", class.name), class.starting_stamina as f64);
                    if levels > 0 {
                        let per_level = class.stamina_per_level.saturating_mul(levels);
                        breakdown.add_source("Class levels", per_level as f64);
                    }
                }
                let echelon = level_factor(self.echelon());
                for kit in self.kits() {
                    if kit.stamina != 0 && echelon > 0 {
                        let stamina = kit.stamina.saturating_mul(echelon);
                        breakdown.add_source(format!("Kit: {}", kit.name), stamina as f64);
                    }
                }
                let might = self
                    .characteristic(Characteristic::Might)
                    .saturating_mul(rules.stamina_per_might);
                if might != 0 {
                    breakdown.add_source("Might", might as f64);
                }
            }
            FeatureField::Recoveries => {
                if let Some(class) = self.class() {
                    breakdown.add_source(format!("Class: {}", class.name), class.recoveries as f64);
                }
            }
            FeatureField::RecoveryValue => {
                let divisor = rules.recovery_divisor.max(1);
                breakdown.add_source("Stamina", (self.stamina() / divisor) as f64);
            }
            FeatureField::Speed => {
                breakdown.add_source("Base", rules.base_speed as f64);
                for kit in self.kits() {
                    if kit.speed != 0 {
                        breakdown.add_source(format!("Kit: {}", kit.name), kit.speed as f64);
                    }
                }
            }
            FeatureField::Stability => {
                for kit in self.kits() {
                    if kit.stability != 0 {
                        breakdown.add_source(format!("Kit: {}", kit.name), kit.stability as f64);
                    }
                }
            }
            FeatureField::Disengage => {
                breakdown.add_source("Base", rules.base_disengage as f64);
                for kit in self.kits() {
                    if kit.disengage != 0 {
                        breakdown.add_source(format!("Kit: {}", kit.name), kit.disengage as f64);
                    }
                }
            }
            FeatureField::Size => {
                let size = self.size();
                let base = if size.value == 1 {
                    rules.size_multipliers.get(size.category)
                } else {
                    size.value as f64
                };
                breakdown.add_source(format!("Size {size}"), base);
            }
        }

        let contributions = self.contributions();
        for Contribution { source, amount, .. } in contributions.get(&field) {
            breakdown.add_source(source.clone(), *amount as f64);
        }

        match field {
            FeatureField::Stamina => breakdown.floor_at("Minimum", rules.min_stamina as f64),
            FeatureField::Recoveries
            | FeatureField::RecoveryValue
            | FeatureField::Speed
            | FeatureField::Stability
            | FeatureField::Disengage
            | FeatureField::Size => breakdown.floor_at("Minimum", 0.0),
            FeatureField::Might
            | FeatureField::Agility
            | FeatureField::Reason
            | FeatureField::Intuition
            | FeatureField::Presence => {}
        }

        breakdown
    }

    /// Combined immunities or weaknesses, one entry per damage type.
    ///
    /// Immunities to one type take the largest value; weaknesses add up.
    /// Entries are sorted by damage type and evaluated at the hero's level.
    pub fn damage_modifiers(&self, kind: DamageModifierKind) -> Vec<DamageModifier> {
        let rule = match kind {
            DamageModifierKind::Immunity => StackRule::Max,
            DamageModifierKind::Weakness => StackRule::Additive,
        };
        let level = self.level();
        let mut contributions: Contributions<String> = Contributions::new();
        for feature in self.features.complete() {
            if let FeatureKind::DamageModifier(data) = &feature.kind {
                for modifier in data.modifiers.iter().filter(|m| m.kind == kind) {
                    contributions.push(
                        modifier.damage_type.clone(),
                        Contribution {
                            feature: feature.id.clone(),
                            source: feature.name.clone(),
                            amount: modifier.amount(level),
                        },
                    );
                }
            }
        }
        contributions
            .keys()
            .map(|damage_type| DamageModifier {
                damage_type: damage_type.clone(),
                kind,
                value: contributions.total(damage_type, rule),
                value_per_level: 0,
            })
            .collect()
    }

    pub fn languages(&self) -> BTreeSet<String> {
        let mut languages = BTreeSet::new();
        for feature in self.features.complete() {
            if let FeatureKind::Language(data) = &feature.kind {
                languages.extend(data.selected.iter().cloned());
            }
        }
        languages
    }

    pub fn skills(&self) -> BTreeSet<String> {
        let mut skills = BTreeSet::new();
        for feature in self.features.complete() {
            if let FeatureKind::Skill(data) = &feature.kind {
                skills.extend(data.selected.iter().cloned());
            }
        }
        skills
    }

    /// Skills grouped by their catalog skill list.
    ///
    /// Skills the catalog does not know are left out.
    pub fn skills_by_list(&self) -> BTreeMap<SkillList, BTreeSet<String>> {
        let mut groups: BTreeMap<SkillList, BTreeSet<String>> = BTreeMap::new();
        for name in self.skills() {
            match self.catalog.skill(&name) {
                Some(skill) => {
                    groups.entry(skill.list).or_default().insert(name);
                }
                None => tracing::debug!(skill = %name, "skill not in catalog, leaving it ungrouped"),
            }
        }
        groups
    }

    /// The hero's kit and every kit granted by a complete kit pick, each
    /// expanded into its constituents. Deduplicated by id.
    pub fn kits(&self) -> Vec<&'a Kit> {
        let catalog = self.catalog;
        let mut kits: Vec<&'a Kit> = Vec::new();
        if let Some(kit) = self.hero.kit.as_ref().and_then(|id| catalog.kit(id.as_str())) {
            kits.extend(expand_kit(catalog, kit));
        }
        for feature in self.features.complete() {
            if let FeatureKind::Kit(data) = &feature.kind {
                for kit in data.selected.iter().filter_map(|id| catalog.kit(id.as_str())) {
                    kits.extend(expand_kit(catalog, kit));
                }
            }
        }

        let mut seen: BTreeSet<Id> = BTreeSet::new();
        kits.retain(|kit| seen.insert(kit.id.clone()));
        kits
    }

    fn kit_tags(&self, tags: impl Fn(&'a Kit) -> &'a [String]) -> BTreeSet<String> {
        self.kits()
            .into_iter()
            .flat_map(|kit| tags(kit).iter().cloned())
            .collect()
    }

    pub fn armor(&self) -> BTreeSet<String> {
        self.kit_tags(|kit| kit.armor.as_slice())
    }

    pub fn weapons(&self) -> BTreeSet<String> {
        self.kit_tags(|kit| kit.weapon.as_slice())
    }

    pub fn implements(&self) -> BTreeSet<String> {
        self.kit_tags(|kit| kit.implement.as_slice())
    }

    /// Granted abilities, deduplicated by id.
    ///
    /// With `include_free_strikes`, the rules' baseline free strikes come
    /// first. Abilities missing from the catalog are skipped.
    pub fn abilities(&self, include_free_strikes: bool) -> Vec<&'a Ability> {
        let catalog = self.catalog;
        let mut ids: Vec<Id> = Vec::new();
        if include_free_strikes {
            ids.extend(catalog.rules().free_strikes.iter().cloned());
        }
        for feature in self.features.complete() {
            match &feature.kind {
                FeatureKind::Ability(data) => ids.push(data.ability.clone()),
                FeatureKind::ClassAbility(data) => ids.extend(data.selected_ids.iter().cloned()),
                FeatureKind::Text
                | FeatureKind::Bonus(_)
                | FeatureKind::DamageModifier(_)
                | FeatureKind::Choice(_)
                | FeatureKind::Kit(_)
                | FeatureKind::Language(_)
                | FeatureKind::Skill(_) => {}
            }
        }

        let mut seen: BTreeSet<Id> = BTreeSet::new();
        ids.into_iter()
            .filter(|id| seen.insert(id.clone()))
            .filter_map(|id| {
                let ability = catalog.ability(id.as_str());
                if ability.is_none() {
                    tracing::debug!(ability = %id, "ability not in catalog, skipping");
                }
                ability
            })
            .collect()
    }

    pub fn abilities_by_usage(&self, include_free_strikes: bool) -> BTreeMap<AbilityUsage, Vec<&'a Ability>> {
        let mut groups: BTreeMap<AbilityUsage, Vec<&'a Ability>> = BTreeMap::new();
        for ability in self.abilities(include_free_strikes) {
            groups.entry(ability.usage).or_default().push(ability);
        }
        groups
    }

    /// Text features, sorted by name ignoring case.
    pub fn display_features(&self) -> Vec<&Feature> {
        let mut features: Vec<&Feature> = self
            .features
            .complete()
            .filter(|f| matches!(f.kind, FeatureKind::Text))
            .collect();
        features.sort_by_cached_key(|f| f.name.to_lowercase());
        features
    }

    pub fn heroic_resource_name(&self) -> &'a str {
        self.class()
            .map(|class| class.heroic_resource.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_HEROIC_RESOURCE)
    }
}
