//! # herostat - Hero Feature Resolution and Derived-Stat Engine
//!
//! The rules core of a tabletop RPG character builder:
//! - **Resolution** walks a hero's selections and flattens every granted
//!   feature, expanding choices from the hero's stored answers
//! - **Derived stats** are pure queries over the resolved set (stamina,
//!   speed, skills, abilities, immunities and the rest)
//! - **Total** by construction: a half-built hero still yields a valid sheet
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! ```text
//! [Hero] + [Catalog] → resolve_features → [ResolvedFeatures] → [DerivedStats] → [HeroSheet]
//! ```
//!
//! 1. The **catalog** holds immutable game content, looked up by id
//! 2. The **hero** holds the user's selections and choice answers
//! 3. **Resolution** turns both into the features currently in effect
//! 4. **DerivedStats** aggregates them into sheet values
//!
//! Nothing is cached: change the hero and query again.
//!
//! ## Example
//!
//! ```rust
//! use herostat::*;
//! use herostat::content::Career;
//! use herostat::feature::FeatureField;
//!
//! let mut catalog = MemoryCatalog::empty();
//! catalog.insert_career(Career {
//!     id: Id::new("career-soldier"),
//!     name: "Soldier".into(),
//!     description: String::new(),
//!     features: vec![Feature::choice("soldier-drill", "Drill")
//!         .option(Feature::bonus("drill-speed", "Forced March", FeatureField::Speed, 1))
//!         .option(Feature::bonus("drill-stamina", "Conditioning", FeatureField::Stamina, 3))
//!         .pick(1)],
//! });
//!
//! let mut hero = Hero::new("hero-1");
//! hero.career = Some(Id::new("career-soldier"));
//!
//! // Unanswered: the choice is surfaced and grants nothing.
//! let stats = DerivedStats::new(&hero, &catalog);
//! assert_eq!(stats.features().unresolved().count(), 1);
//! assert_eq!(stats.speed(), 5);
//!
//! hero.answer("soldier-drill", ["drill-speed"]);
//! let stats = DerivedStats::new(&hero, &catalog);
//! assert_eq!(stats.speed(), 6);
//! ```
//!
//! ## Modules
//!
//! - [`id`] - Identifier type
//! - [`feature`] - Feature model
//! - [`content`] - Catalog entry types
//! - [`rules`] - Numeric rules tables
//! - [`catalog`] - Catalog store and audit
//! - [`graph`] - Choice graph for cycle detection
//! - [`hero`] - Hero aggregate
//! - [`resolver`] - Feature resolution engine
//! - [`resolved`] - Resolved features and stat breakdowns
//! - [`stack`] - Stacking rules
//! - [`calculator`] - Derived-stat queries
//! - [`sheet`] - Hero sheet view model
//! - [`error`] - Error types

pub mod calculator;
pub mod catalog;
pub mod content;
pub mod error;
pub mod feature;
pub mod graph;
pub mod hero;
pub mod id;
pub mod resolved;
pub mod resolver;
pub mod rules;
pub mod sheet;
pub mod stack;

// Re-export main types for convenience
pub use calculator::DerivedStats;
pub use catalog::{Catalog, CatalogData, MemoryCatalog};
pub use error::HeroError;
pub use hero::{Characteristics, ClassSelection, Hero, HeroState};
pub use id::Id;
pub use resolved::{FeatureOrigin, ResolvedFeature, ResolvedFeatures, StatBreakdown};
pub use resolver::{resolve_features, FeatureResolver};
pub use rules::Rules;
pub use sheet::{HeroSheet, SheetOptions};

// Re-export the feature model
pub use feature::{
    Characteristic, DamageModifier, DamageModifierKind, Feature, FeatureField, FeatureKind,
};
pub use stack::StackRule;
