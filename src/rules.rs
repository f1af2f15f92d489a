//! Rules tables.
//!
//! Numeric constants the derived-stat formulas read. They travel with the
//! catalog (under `"rules"` in a catalog document) so a different rules
//! revision is a data change, not a code change. Missing keys fall back to
//! the defaults below.

use crate::content::SizeCategory;
use crate::id::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Speed every hero has before kit and bonuses.
    pub base_speed: i32,
    /// Disengage distance before kit and bonuses.
    pub base_disengage: i32,
    /// Stamina added per point of Might.
    pub stamina_per_might: i32,
    /// Stamina never drops below this.
    pub min_stamina: i32,
    /// Recovery value is stamina divided by this, rounded down.
    pub recovery_divisor: i32,
    /// Numeric size of size-1 creatures by category.
    pub size_multipliers: SizeMultipliers,
    /// Abilities every hero has when free strikes are shown.
    pub free_strikes: Vec<Id>,
}

impl Rules {
    pub const DEFAULT_BASE_SPEED: i32 = 5;
    pub const DEFAULT_BASE_DISENGAGE: i32 = 1;
    pub const DEFAULT_STAMINA_PER_MIGHT: i32 = 1;
    pub const DEFAULT_MIN_STAMINA: i32 = 1;
    pub const DEFAULT_RECOVERY_DIVISOR: i32 = 3;

    pub fn new() -> Self {
        Self {
            base_speed: Self::DEFAULT_BASE_SPEED,
            base_disengage: Self::DEFAULT_BASE_DISENGAGE,
            stamina_per_might: Self::DEFAULT_STAMINA_PER_MIGHT,
            min_stamina: Self::DEFAULT_MIN_STAMINA,
            recovery_divisor: Self::DEFAULT_RECOVERY_DIVISOR,
            size_multipliers: SizeMultipliers::default(),
            free_strikes: vec![Id::new("free-strike-melee"), Id::new("free-strike-ranged")],
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeMultipliers {
    pub tiny: f64,
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl SizeMultipliers {
    pub fn get(&self, category: SizeCategory) -> f64 {
        match category {
            SizeCategory::Tiny => self.tiny,
            SizeCategory::Small => self.small,
            SizeCategory::Medium => self.medium,
            SizeCategory::Large => self.large,
        }
    }
}

impl Default for SizeMultipliers {
    fn default() -> Self {
        Self {
            tiny: 0.25,
            small: 0.5,
            medium: 1.0,
            large: 1.5,
        }
    }
}
