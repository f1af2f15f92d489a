//! Hero aggregate.
//!
//! A [`Hero`] records a user's selections and nothing derived. Everything on
//! a sheet is recomputed from it on demand, so it can never go stale. The
//! aggregate is a plain serde record; storing it is the caller's job.

use crate::error::Result;
use crate::feature::Characteristic;
use crate::id::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw characteristic scores. Not derived; may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Characteristics {
    pub might: i32,
    pub agility: i32,
    pub reason: i32,
    pub intuition: i32,
    pub presence: i32,
}

impl Characteristics {
    pub fn get(&self, characteristic: Characteristic) -> i32 {
        match characteristic {
            Characteristic::Might => self.might,
            Characteristic::Agility => self.agility,
            Characteristic::Reason => self.reason,
            Characteristic::Intuition => self.intuition,
            Characteristic::Presence => self.presence,
        }
    }

    pub fn set(&mut self, characteristic: Characteristic, value: i32) {
        match characteristic {
            Characteristic::Might => self.might = value,
            Characteristic::Agility => self.agility = value,
            Characteristic::Reason => self.reason = value,
            Characteristic::Intuition => self.intuition = value,
            Characteristic::Presence => self.presence = value,
        }
    }
}

/// The hero's class, level and chosen subclass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSelection {
    pub id: Id,
    pub level: u32,
    #[serde(default)]
    pub subclass: Option<Id>,
}

impl ClassSelection {
    pub fn new(id: impl Into<Id>, level: u32) -> Self {
        Self {
            id: id.into(),
            level,
            subclass: None,
        }
    }

    pub fn with_subclass(mut self, subclass: impl Into<Id>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }
}

/// Progression counters tracked during play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroState {
    pub heroic_resource: u32,
    pub victories: u32,
    pub renown: u32,
    pub hero_tokens: u32,
    pub notes: String,
}

/// One character and all of the user's selections.
///
/// # Examples
///
/// ```rust
/// use herostat::{Hero, Characteristic};
///
/// let mut hero = Hero::new("hero-1");
/// hero.name = "Ardent".into();
/// hero.set_characteristic(Characteristic::Might, 2);
/// hero.answer("career-skill", ["Alchemy"]);
///
/// assert_eq!(hero.characteristics.might, 2);
/// assert_eq!(hero.answers_for("career-skill"), ["Alchemy".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub characteristics: Characteristics,
    #[serde(default)]
    pub ancestry: Option<Id>,
    #[serde(default)]
    pub culture: Option<Id>,
    #[serde(default)]
    pub career: Option<Id>,
    #[serde(default)]
    pub class: Option<ClassSelection>,
    #[serde(default)]
    pub complication: Option<Id>,
    #[serde(default)]
    pub kit: Option<Id>,
    #[serde(default)]
    pub state: HeroState,
    /// Stored choice answers keyed by the feature id they answer.
    ///
    /// Values are option feature ids, ability ids, kit ids, or language and
    /// skill names depending on the feature kind.
    #[serde(default)]
    pub answers: BTreeMap<Id, Vec<String>>,
}

impl Hero {
    /// Create a blank hero with no selections.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            characteristics: Characteristics::default(),
            ancestry: None,
            culture: None,
            career: None,
            class: None,
            complication: None,
            kit: None,
            state: HeroState::default(),
            answers: BTreeMap::new(),
        }
    }

    pub fn set_characteristic(&mut self, characteristic: Characteristic, value: i32) {
        self.characteristics.set(characteristic, value);
    }

    /// Class level, or 0 without a class.
    pub fn level(&self) -> u32 {
        self.class.as_ref().map(|c| c.level).unwrap_or(0)
    }

    /// Store the answer for a choice feature, replacing any previous one.
    pub fn answer<I, S>(&mut self, feature: impl Into<Id>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers
            .insert(feature.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn clear_answer(&mut self, feature: &str) {
        self.answers.remove(feature);
    }

    pub fn answers_for(&self, feature: &str) -> &[String] {
        self.answers
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
