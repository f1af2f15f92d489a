//! Hero sheet.
//!
//! [`HeroSheet`] is the view model presentation code renders: every derived
//! value of one hero, computed in a single pass and serializable as-is.

use crate::calculator::DerivedStats;
use crate::catalog::Catalog;
use crate::content::{Ability, AbilityUsage, Size, SkillList};
use crate::feature::{Characteristic, DamageModifier, DamageModifierKind, Feature};
use crate::hero::{Hero, HeroState};
use crate::id::Id;
use crate::resolved::ResolvedFeature;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Display switches for a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// List the baseline free strikes among the abilities.
    pub include_free_strikes: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            include_free_strikes: true,
        }
    }
}

/// Every derived value of one hero.
///
/// # Examples
///
/// ```rust
/// use herostat::{Hero, HeroSheet, MemoryCatalog, SheetOptions};
///
/// let catalog = MemoryCatalog::empty();
/// let hero = Hero::new("hero-1");
/// let sheet = HeroSheet::compute(&hero, &catalog, SheetOptions::default());
///
/// assert_eq!(sheet.stamina, 1);
/// assert_eq!(sheet.size.to_string(), "1M");
/// assert!(sheet.unresolved.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSheet {
    pub hero: Id,
    pub name: String,
    pub level: u32,
    pub echelon: u32,
    pub characteristics: BTreeMap<Characteristic, i32>,
    pub stamina: i32,
    pub winded: i32,
    pub recoveries: i32,
    pub recovery_value: i32,
    pub speed: i32,
    pub stability: i32,
    pub disengage: i32,
    pub size: Size,
    pub size_value: f64,
    pub immunities: Vec<DamageModifier>,
    pub weaknesses: Vec<DamageModifier>,
    pub languages: BTreeSet<String>,
    /// Every granted skill, including ones the catalog cannot group.
    pub skills: BTreeSet<String>,
    pub skills_by_list: BTreeMap<SkillList, BTreeSet<String>>,
    pub kits: Vec<Id>,
    pub armor: BTreeSet<String>,
    pub weapons: BTreeSet<String>,
    pub implements: BTreeSet<String>,
    pub abilities: BTreeMap<AbilityUsage, Vec<Ability>>,
    pub features: Vec<Feature>,
    /// Choices still waiting for an answer.
    pub unresolved: Vec<ResolvedFeature>,
    pub heroic_resource: String,
    pub state: HeroState,
}

impl HeroSheet {
    /// Resolve the hero once and read every derived value.
    pub fn compute(hero: &Hero, catalog: &dyn Catalog, options: SheetOptions) -> Self {
        let stats = DerivedStats::new(hero, catalog);
        Self::from_stats(&stats, options)
    }

    /// Build a sheet from an existing calculator.
    pub fn from_stats(stats: &DerivedStats<'_>, options: SheetOptions) -> Self {
        let hero = stats.hero();
        let sheet = Self {
            hero: hero.id.clone(),
            name: hero.name.clone(),
            level: stats.level(),
            echelon: stats.echelon(),
            characteristics: stats.characteristics(),
            stamina: stats.stamina(),
            winded: stats.winded(),
            recoveries: stats.recoveries(),
            recovery_value: stats.recovery_value(),
            speed: stats.speed(),
            stability: stats.stability(),
            disengage: stats.disengage(),
            size: stats.size(),
            size_value: stats.size_value(),
            immunities: stats.damage_modifiers(DamageModifierKind::Immunity),
            weaknesses: stats.damage_modifiers(DamageModifierKind::Weakness),
            languages: stats.languages(),
            skills: stats.skills(),
            skills_by_list: stats.skills_by_list(),
            kits: stats.kits().into_iter().map(|kit| kit.id.clone()).collect(),
            armor: stats.armor(),
            weapons: stats.weapons(),
            implements: stats.implements(),
            abilities: stats
                .abilities_by_usage(options.include_free_strikes)
                .into_iter()
                .map(|(usage, abilities)| (usage, abilities.into_iter().cloned().collect()))
                .collect(),
            features: stats.display_features().into_iter().cloned().collect(),
            unresolved: stats.features().unresolved().cloned().collect(),
            heroic_resource: stats.heroic_resource_name().to_string(),
            state: hero.state.clone(),
        };
        tracing::debug!(
            hero = %sheet.hero,
            level = sheet.level,
            unresolved = sheet.unresolved.len(),
            "hero sheet computed"
        );
        sheet
    }

    /// Value of one characteristic, 0 when absent.
    pub fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.characteristics.get(&characteristic).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
