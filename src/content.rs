//! Catalog content.
//!
//! The canonical building blocks a hero is assembled from. Content is
//! immutable once loaded and refers to other content only by [`Id`].

use crate::feature::Feature;
use crate::id::Id;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KitType {
    Standard,
    Stormwight,
}

/// The skill groups shown on a hero sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillList {
    Crafting,
    Exploration,
    Interpersonal,
    Intrigue,
    Lore,
}

/// How an ability is used in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityUsage {
    Action,
    Maneuver,
    Trigger,
    Other,
}

/// Size category letter for size-1 creatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "T")]
    Tiny,
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl SizeCategory {
    fn letter(self) -> char {
        match self {
            SizeCategory::Tiny => 'T',
            SizeCategory::Small => 'S',
            SizeCategory::Medium => 'M',
            SizeCategory::Large => 'L',
        }
    }
}

/// A creature size such as `1M` or `2`.
///
/// Only size 1 carries a category; larger sizes print as the bare number.
///
/// ```rust
/// use herostat::content::{Size, SizeCategory};
///
/// assert_eq!(Size::default().to_string(), "1M");
/// assert_eq!(Size { value: 2, category: SizeCategory::Medium }.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub value: u32,
    pub category: SizeCategory,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            value: 1,
            category: SizeCategory::Medium,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 1 {
            write!(f, "{}{}", self.value, self.category.letter())
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub usage: AbilityUsage,
    /// Heroic resource cost, 0 for signature abilities.
    #[serde(default)]
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub list: SkillList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ancestry {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub size: Size,
    /// Stamina granted on top of the class.
    #[serde(default)]
    pub stamina: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub environment: Option<Feature>,
    #[serde(default)]
    pub organization: Option<Feature>,
    #[serde(default)]
    pub upbringing: Option<Feature>,
}

impl Culture {
    /// The culture's features followed by its aspect features.
    pub fn all_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().chain(
            [&self.environment, &self.organization, &self.upbringing]
                .into_iter()
                .flatten(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complication {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Features unlocked at one class level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFeatures {
    pub level: u32,
    pub features: Vec<Feature>,
}

/// Features of `levels` unlocked at or below `level`, in level order.
pub(crate) fn features_up_to(levels: &[LevelFeatures], level: u32) -> impl Iterator<Item = &Feature> {
    levels
        .iter()
        .filter(move |entry| entry.level <= level)
        .flat_map(|entry| entry.features.iter())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubClass {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features_by_level: Vec<LevelFeatures>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroClass {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display name of the class's heroic resource.
    pub heroic_resource: String,
    /// Display name for this class's subclasses ("Doctrine", "College").
    #[serde(default)]
    pub subclass_name: String,
    #[serde(default)]
    pub subclasses: Vec<SubClass>,
    #[serde(default)]
    pub features_by_level: Vec<LevelFeatures>,
    /// Ability ids class-ability picks may draw from.
    #[serde(default)]
    pub abilities: Vec<Id>,
    pub starting_stamina: i32,
    pub stamina_per_level: i32,
    pub recoveries: i32,
}

impl HeroClass {
    pub fn subclass(&self, id: &str) -> Option<&SubClass> {
        self.subclasses.iter().find(|sc| sc.id.as_str() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_kit_type")]
    pub kit_type: KitType,
    #[serde(default)]
    pub armor: Vec<String>,
    #[serde(default)]
    pub weapon: Vec<String>,
    #[serde(default)]
    pub implement: Vec<String>,
    /// Stamina per echelon.
    #[serde(default)]
    pub stamina: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub stability: i32,
    #[serde(default)]
    pub disengage: i32,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Sub-kits this kit combines, at most two.
    #[serde(default)]
    pub components: Vec<Id>,
}

fn default_kit_type() -> KitType {
    KitType::Standard
}

impl Kit {
    pub fn is_combination(&self) -> bool {
        !self.components.is_empty()
    }
}
