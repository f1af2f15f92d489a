//! Feature model.
//!
//! A [`Feature`] is one atomic grant attached to catalog content. Its
//! [`FeatureKind`] is a closed sum type, so every aggregation in the
//! calculator is an exhaustive `match` and a new kind is a compile error
//! until every query handles it.
//!
//! Choice-like kinds (`Choice`, `ClassAbility`, `Kit`, `Language`, `Skill`)
//! carry a `selected` list. A grant contributes to derived stats only once
//! it is complete.

use crate::content::{KitType, SkillList};
use crate::id::Id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five hero characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    Might,
    Agility,
    Reason,
    Intuition,
    Presence,
}

impl Characteristic {
    /// All characteristics in sheet order.
    pub const ALL: [Characteristic; 5] = [
        Characteristic::Might,
        Characteristic::Agility,
        Characteristic::Reason,
        Characteristic::Intuition,
        Characteristic::Presence,
    ];

    /// The bonus field that targets this characteristic.
    pub fn field(self) -> FeatureField {
        match self {
            Characteristic::Might => FeatureField::Might,
            Characteristic::Agility => FeatureField::Agility,
            Characteristic::Reason => FeatureField::Reason,
            Characteristic::Intuition => FeatureField::Intuition,
            Characteristic::Presence => FeatureField::Presence,
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A characteristic or derived value a bonus can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureField {
    Might,
    Agility,
    Reason,
    Intuition,
    Presence,
    Stamina,
    Recoveries,
    RecoveryValue,
    Speed,
    Stability,
    Size,
    Disengage,
}

impl FeatureField {
    /// The characteristic this field raises, if it is one.
    pub fn characteristic(self) -> Option<Characteristic> {
        Characteristic::ALL.into_iter().find(|c| c.field() == self)
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureField::RecoveryValue => write!(f, "Recovery Value"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// Whether a damage modifier protects against or exposes to a damage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageModifierKind {
    Immunity,
    Weakness,
}

/// A class level as a multiplier, saturating at `i32::MAX`.
pub(crate) fn level_factor(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// One immunity or weakness entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageModifier {
    pub damage_type: String,
    pub kind: DamageModifierKind,
    pub value: i32,
    #[serde(default)]
    pub value_per_level: i32,
}

impl DamageModifier {
    /// Magnitude of this entry at the given class level.
    pub fn amount(&self, level: u32) -> i32 {
        self.value.saturating_add(self.value_per_level.saturating_mul(level_factor(level)))
    }
}

impl fmt::Display for DamageModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.damage_type, self.value)
    }
}

/// Grants one ability by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    pub ability: Id,
}

/// A flat plus per-level bonus to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusData {
    pub field: FeatureField,
    pub value: i32,
    #[serde(default)]
    pub value_per_level: i32,
}

impl BonusData {
    /// Contribution of this bonus at the given class level.
    ///
    /// ```rust
    /// use herostat::feature::{BonusData, FeatureField};
    ///
    /// let bonus = BonusData { field: FeatureField::Stamina, value: 2, value_per_level: 1 };
    /// assert_eq!(bonus.amount(3), 5);
    /// assert_eq!(bonus.amount(0), 2);
    /// ```
    pub fn amount(&self, level: u32) -> i32 {
        self.value.saturating_add(self.value_per_level.saturating_mul(level_factor(level)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageModifierData {
    pub modifiers: Vec<DamageModifier>,
}

fn default_option_cost() -> usize {
    1
}

/// One candidate of a choice, with the cost it takes out of `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub feature: Feature,
    #[serde(default = "default_option_cost")]
    pub value: usize,
}

impl ChoiceOption {
    /// Cost taken out of the choice's count. A stored 0 counts as 1.
    pub fn cost(&self) -> usize {
        self.value.max(1)
    }
}

/// Pick options worth `count` from a list of candidate features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceData {
    pub options: Vec<ChoiceOption>,
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<Feature>,
}

impl ChoiceData {
    /// Find the option whose feature has this id.
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.feature.id.as_str() == id)
    }

    /// Summed cost of the current selection.
    ///
    /// Selected features that are no longer among the options cost 1.
    pub fn selected_cost(&self) -> usize {
        self.selected
            .iter()
            .map(|f| {
                self.option(f.id.as_str())
                    .map(ChoiceOption::cost)
                    .unwrap_or(1)
            })
            .sum()
    }
}

/// Pick `count` abilities of a given cost from the class's ability pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAbilityData {
    pub cost: u32,
    pub count: usize,
    #[serde(default)]
    pub selected_ids: Vec<Id>,
}

/// Pick `count` kits of the allowed types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitData {
    #[serde(default)]
    pub types: Vec<KitType>,
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageData {
    #[serde(default)]
    pub options: Vec<String>,
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub list_options: Vec<SkillList>,
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<String>,
}

/// The payload of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeatureKind {
    /// Rules text with no mechanical payload.
    Text,
    Ability(AbilityData),
    Bonus(BonusData),
    DamageModifier(DamageModifierData),
    Choice(ChoiceData),
    ClassAbility(ClassAbilityData),
    Kit(KitData),
    Language(LanguageData),
    Skill(SkillData),
}

/// A grantable feature.
///
/// # Examples
///
/// ```rust
/// use herostat::feature::{Feature, FeatureField};
///
/// let grit = Feature::bonus("grit", "Grit", FeatureField::Stamina, 6)
///     .per_level(2)
///     .with_description("Your kind shrugs off blows.");
///
/// assert!(grit.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: FeatureKind,
}

impl Feature {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn text(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self::new(id, name, FeatureKind::Text)
    }

    pub fn ability(id: impl Into<Id>, name: impl Into<String>, ability: impl Into<Id>) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Ability(AbilityData {
                ability: ability.into(),
            }),
        )
    }

    pub fn bonus(
        id: impl Into<Id>,
        name: impl Into<String>,
        field: FeatureField,
        value: i32,
    ) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Bonus(BonusData {
                field,
                value,
                value_per_level: 0,
            }),
        )
    }

    /// Set the per-level part of a bonus. No effect on other kinds.
    pub fn per_level(mut self, value_per_level: i32) -> Self {
        if let FeatureKind::Bonus(bonus) = &mut self.kind {
            bonus.value_per_level = value_per_level;
        }
        self
    }

    pub fn damage_modifiers(
        id: impl Into<Id>,
        name: impl Into<String>,
        modifiers: Vec<DamageModifier>,
    ) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::DamageModifier(DamageModifierData { modifiers }),
        )
    }

    /// Start building a choice feature.
    ///
    /// ```rust
    /// use herostat::feature::{Feature, FeatureField};
    ///
    /// let choice = Feature::choice("boon", "Ancestral Boon")
    ///     .option(Feature::bonus("boon-might", "Mighty", FeatureField::Might, 1))
    ///     .option_costing(Feature::bonus("boon-big", "Huge", FeatureField::Stamina, 9), 2)
    ///     .pick(2);
    ///
    /// assert!(!choice.is_complete());
    /// ```
    pub fn choice(id: impl Into<Id>, name: impl Into<String>) -> ChoiceBuilder {
        ChoiceBuilder {
            id: id.into(),
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn class_ability(id: impl Into<Id>, name: impl Into<String>, cost: u32, count: usize) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::ClassAbility(ClassAbilityData {
                cost,
                count,
                selected_ids: Vec::new(),
            }),
        )
    }

    pub fn kit(id: impl Into<Id>, name: impl Into<String>, types: Vec<KitType>, count: usize) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Kit(KitData {
                types,
                count,
                selected: Vec::new(),
            }),
        )
    }

    pub fn language(
        id: impl Into<Id>,
        name: impl Into<String>,
        options: Vec<String>,
        count: usize,
    ) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Language(LanguageData {
                options,
                count,
                selected: Vec::new(),
            }),
        )
    }

    pub fn skill(
        id: impl Into<Id>,
        name: impl Into<String>,
        options: Vec<String>,
        list_options: Vec<SkillList>,
        count: usize,
    ) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Skill(SkillData {
                options,
                list_options,
                count,
                selected: Vec::new(),
            }),
        )
    }

    /// A language or skill grant with its value already chosen.
    pub fn known_language(id: impl Into<Id>, name: impl Into<String>, language: &str) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Language(LanguageData {
                options: vec![language.to_string()],
                count: 1,
                selected: vec![language.to_string()],
            }),
        )
    }

    pub fn known_skill(id: impl Into<Id>, name: impl Into<String>, skill: &str) -> Self {
        Self::new(
            id,
            name,
            FeatureKind::Skill(SkillData {
                options: vec![skill.to_string()],
                list_options: Vec::new(),
                count: 1,
                selected: vec![skill.to_string()],
            }),
        )
    }

    /// Whether this feature asks the user to pick something.
    pub fn is_choice(&self) -> bool {
        matches!(
            self.kind,
            FeatureKind::Choice(_)
                | FeatureKind::ClassAbility(_)
                | FeatureKind::Kit(_)
                | FeatureKind::Language(_)
                | FeatureKind::Skill(_)
        )
    }

    /// Number of selections this feature still needs, 0 when complete.
    pub fn missing_selections(&self) -> usize {
        match &self.kind {
            FeatureKind::Choice(data) => data.count.saturating_sub(data.selected_cost()),
            FeatureKind::ClassAbility(data) => data.count.saturating_sub(data.selected_ids.len()),
            FeatureKind::Kit(data) => data.count.saturating_sub(data.selected.len()),
            FeatureKind::Language(data) => data.count.saturating_sub(data.selected.len()),
            FeatureKind::Skill(data) => data.count.saturating_sub(data.selected.len()),
            FeatureKind::Text
            | FeatureKind::Ability(_)
            | FeatureKind::Bonus(_)
            | FeatureKind::DamageModifier(_) => 0,
        }
    }

    /// Whether this feature is fully answered and may contribute.
    pub fn is_complete(&self) -> bool {
        self.missing_selections() == 0
    }
}

/// Builder for choice features.
pub struct ChoiceBuilder {
    id: Id,
    name: String,
    options: Vec<ChoiceOption>,
}

impl ChoiceBuilder {
    /// Add an option costing 1.
    pub fn option(self, feature: Feature) -> Self {
        self.option_costing(feature, 1)
    }

    /// Add an option with an explicit cost.
    pub fn option_costing(mut self, feature: Feature, value: usize) -> Self {
        self.options.push(ChoiceOption { feature, value });
        self
    }

    /// Finish the choice, requiring options worth `count`.
    pub fn pick(self, count: usize) -> Feature {
        Feature::new(
            self.id,
            self.name,
            FeatureKind::Choice(ChoiceData {
                options: self.options,
                count,
                selected: Vec::new(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn might(id: &str) -> Feature {
        Feature::bonus(id, "Might", FeatureField::Might, 1)
    }

    #[test]
    fn test_bonus_amount_scales_with_level() {
        let feature = Feature::bonus("b", "B", FeatureField::Speed, 2).per_level(1);
        match feature.kind {
            FeatureKind::Bonus(bonus) => assert_eq!(bonus.amount(3), 5),
            _ => panic!("Expected bonus"),
        }
    }

    #[test]
    fn test_field_characteristic_mapping() {
        assert_eq!(FeatureField::Presence.characteristic(), Some(Characteristic::Presence));
        assert_eq!(FeatureField::Speed.characteristic(), None);
    }

    #[test]
    fn test_damage_modifier_display() {
        let modifier = DamageModifier {
            damage_type: "fire".into(),
            kind: DamageModifierKind::Immunity,
            value: 5,
            value_per_level: 0,
        };
        assert_eq!(modifier.to_string(), "fire 5");
    }

    #[test]
    fn test_amounts_saturate_at_huge_levels() {
        let bonus = BonusData {
            field: FeatureField::Stamina,
            value: 2,
            value_per_level: 1000,
        };
        assert_eq!(bonus.amount(3_000_000), i32::MAX);
        assert_eq!(bonus.amount(u32::MAX), i32::MAX);

        let modifier = DamageModifier {
            damage_type: "fire".into(),
            kind: DamageModifierKind::Weakness,
            value: 0,
            value_per_level: -1,
        };
        assert_eq!(modifier.amount(u32::MAX), -i32::MAX);
    }

    #[test]
    fn test_zero_cost_option_counts_as_one() {
        let json = r#"{
            "options": [
                { "feature": { "id": "a", "name": "A", "kind": { "type": "Text" } }, "value": 0 }
            ],
            "count": 2,
            "selected": [ { "id": "a", "name": "A", "kind": { "type": "Text" } } ]
        }"#;
        let data: ChoiceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.options[0].cost(), 1);
        assert_eq!(data.selected_cost(), 1);
    }

    #[test]
    fn test_per_level_ignored_on_other_kinds() {
        let feature = Feature::text("t", "Text").per_level(4);
        assert_eq!(feature.kind, FeatureKind::Text);
    }

    #[test]
    fn test_choice_completeness_uses_cost() {
        let mut choice = Feature::choice("c", "Choice")
            .option(might("a"))
            .option_costing(might("b"), 2)
            .pick(2);
        assert_eq!(choice.missing_selections(), 2);

        if let FeatureKind::Choice(data) = &mut choice.kind {
            data.selected.push(might("b"));
        }
        assert!(choice.is_complete());
    }

    #[test]
    fn test_choice_with_zero_count_is_complete() {
        let choice = Feature::choice("c", "Choice").option(might("a")).pick(0);
        assert!(choice.is_complete());
    }

    #[test]
    fn test_known_language_is_complete() {
        let feature = Feature::known_language("l", "Caelian", "Caelian");
        assert!(feature.is_choice());
        assert!(feature.is_complete());
    }

    #[test]
    fn test_feature_json_shape() {
        let json = r#"{
            "id": "f1",
            "name": "Tough",
            "kind": { "type": "Bonus", "field": "Stamina", "value": 3 }
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.description, "");
        assert_eq!(
            feature.kind,
            FeatureKind::Bonus(BonusData {
                field: FeatureField::Stamina,
                value: 3,
                value_per_level: 0,
            })
        );
    }

    #[test]
    fn test_nested_choice_json() {
        let json = r#"{
            "id": "outer",
            "name": "Outer",
            "kind": {
                "type": "Choice",
                "count": 1,
                "options": [
                    { "feature": { "id": "t", "name": "Text", "kind": { "type": "Text" } } }
                ]
            }
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        match &feature.kind {
            FeatureKind::Choice(data) => {
                assert_eq!(data.options.len(), 1);
                assert_eq!(data.options[0].value, 1);
                assert!(data.selected.is_empty());
            }
            _ => panic!("Expected choice"),
        }
    }
}
