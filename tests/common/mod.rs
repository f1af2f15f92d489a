#![allow(dead_code)]

use herostat::content::{
    Ability, AbilityUsage, Ancestry, Career, Complication, Culture, HeroClass, Kit, KitType,
    LevelFeatures, Size, Skill, SkillList, SubClass,
};
use herostat::feature::{DamageModifier, DamageModifierKind, Feature, FeatureField};
use herostat::{ClassSelection, Hero, Id, MemoryCatalog};

pub fn ability(id: &str, usage: AbilityUsage, cost: u32) -> Ability {
    Ability {
        id: Id::new(id),
        name: id.replace('-', " "),
        description: String::new(),
        usage,
        cost,
    }
}

pub fn modifier(damage_type: &str, kind: DamageModifierKind, value: i32) -> DamageModifier {
    DamageModifier {
        damage_type: damage_type.to_string(),
        kind,
        value,
        value_per_level: 0,
    }
}

pub fn kit(id: &str, armor: &[&str], stamina: i32, speed: i32) -> Kit {
    Kit {
        id: Id::new(id),
        name: id.to_string(),
        description: String::new(),
        kit_type: KitType::Standard,
        armor: armor.iter().map(|a| a.to_string()).collect(),
        weapon: Vec::new(),
        implement: Vec::new(),
        stamina,
        speed,
        stability: 0,
        disengage: 0,
        features: Vec::new(),
        components: Vec::new(),
    }
}

pub fn combination(id: &str, components: &[&str]) -> Kit {
    let mut combo = kit(id, &[], 0, 0);
    combo.components = components.iter().map(|c| Id::new(c)).collect();
    combo
}

fn dwarf() -> Ancestry {
    Ancestry {
        id: Id::new("dwarf"),
        name: "Dwarf".into(),
        description: String::new(),
        features: vec![
            Feature::damage_modifiers(
                "dwarf-fire",
                "Runic Skin",
                vec![modifier("fire", DamageModifierKind::Immunity, 2)],
            ),
            Feature::bonus("dwarf-spark", "Spark Off Your Skin", FeatureField::Stamina, 6),
            Feature::ability("dwarf-runic", "Runic Carving", "runic-carving"),
            Feature::choice("dwarf-boon", "Dwarf Traits")
                .option(Feature::bonus("boon-grounded", "Grounded", FeatureField::Might, 1))
                .option(Feature::bonus("boon-stable", "Great Fortitude", FeatureField::Stability, 1))
                .option(Feature::bonus("boon-quick", "Quick", FeatureField::Speed, 1))
                .option(Feature::damage_modifiers(
                    "boon-fireproof",
                    "Fireproof",
                    vec![modifier("fire", DamageModifierKind::Immunity, 5)],
                ))
                .pick(2),
        ],
        size: Size::default(),
        stamina: 0,
    }
}

fn nomad() -> Culture {
    Culture {
        id: Id::new("nomad"),
        name: "Nomad".into(),
        description: String::new(),
        features: vec![Feature::known_language("nomad-caelian", "Caelian", "Caelian")],
        environment: Some(Feature::skill(
            "env-skill",
            "Wilderness",
            Vec::new(),
            vec![SkillList::Exploration],
            1,
        )),
        organization: Some(Feature::language(
            "org-language",
            "Trade Tongue",
            vec!["Khelt".into(), "Zaliac".into()],
            1,
        )),
        upbringing: Some(Feature::text("up-wanderer", "Wanderer")),
    }
}

fn soldier() -> Career {
    Career {
        id: Id::new("soldier"),
        name: "Soldier".into(),
        description: String::new(),
        features: vec![
            Feature::known_skill("soldier-climb", "Climb", "Climb"),
            Feature::text("soldier-drill", "drill"),
        ],
    }
}

fn fury() -> HeroClass {
    HeroClass {
        id: Id::new("fury"),
        name: "Fury".into(),
        description: String::new(),
        heroic_resource: "Rage".into(),
        subclass_name: "Aspect".into(),
        subclasses: vec![SubClass {
            id: Id::new("berserker"),
            name: "Berserker".into(),
            description: String::new(),
            features_by_level: vec![
                LevelFeatures {
                    level: 1,
                    features: vec![Feature::text("berserker-1", "Kit Bonuses")],
                },
                LevelFeatures {
                    level: 4,
                    features: vec![Feature::text("berserker-4", "Unstoppable")],
                },
            ],
        }],
        features_by_level: vec![
            LevelFeatures {
                level: 1,
                features: vec![
                    Feature::class_ability("fury-signature", "Signature Ability", 0, 1),
                    Feature::class_ability("fury-heroic", "Heroic Ability", 3, 1),
                ],
            },
            LevelFeatures {
                level: 4,
                features: vec![Feature::bonus(
                    "fury-growing",
                    "Growing Ferocity",
                    FeatureField::Speed,
                    1,
                )],
            },
        ],
        abilities: vec![
            Id::new("gouge"),
            Id::new("grab"),
            Id::new("brutal-slam"),
            Id::new("to-the-death"),
        ],
        starting_stamina: 21,
        stamina_per_level: 9,
        recoveries: 10,
    }
}

fn cursed() -> Complication {
    let inner = Feature::choice("curse-loop", "Endless Curse")
        .option(Feature::bonus("curse-boon", "Boon", FeatureField::Speed, 3))
        .pick(1);
    Complication {
        id: Id::new("cursed"),
        name: "Cursed".into(),
        description: String::new(),
        features: vec![
            Feature::damage_modifiers(
                "cursed-cold",
                "Chilled",
                vec![modifier("cold", DamageModifierKind::Weakness, 2)],
            ),
            Feature::damage_modifiers(
                "cursed-cold-more",
                "Frostbitten",
                vec![modifier("cold", DamageModifierKind::Weakness, 3)],
            ),
            Feature::choice("curse-loop", "Endless Curse").option(inner).pick(1),
        ],
    }
}

/// A small catalog covering every content type.
pub fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::empty();

    catalog.insert_ability(ability("free-strike-melee", AbilityUsage::Action, 0));
    catalog.insert_ability(ability("free-strike-ranged", AbilityUsage::Action, 0));
    catalog.insert_ability(ability("runic-carving", AbilityUsage::Maneuver, 0));
    catalog.insert_ability(ability("gouge", AbilityUsage::Action, 0));
    catalog.insert_ability(ability("grab", AbilityUsage::Maneuver, 0));
    catalog.insert_ability(ability("brutal-slam", AbilityUsage::Action, 3));
    catalog.insert_ability(ability("to-the-death", AbilityUsage::Trigger, 3));
    catalog.insert_ability(ability("not-in-pool", AbilityUsage::Action, 3));

    for (name, list) in [
        ("Alchemy", SkillList::Crafting),
        ("Climb", SkillList::Exploration),
        ("Navigate", SkillList::Exploration),
        ("Lie", SkillList::Interpersonal),
    ] {
        catalog.insert_skill(Skill {
            name: name.to_string(),
            list,
        });
    }

    catalog.insert_ancestry(dwarf());
    catalog.insert_culture(nomad());
    catalog.insert_career(soldier());
    catalog.insert_class(fury());
    catalog.insert_complication(cursed());

    let mut panther = kit("panther", &[], 6, 1);
    panther.weapon = vec!["heavy".into()];
    catalog.insert_kit(panther);
    catalog.insert_kit(kit("mountain", &["plate"], 9, 0));
    catalog.insert_kit(kit("guardian", &["plate", "shield"], 3, 0));
    catalog.insert_kit(kit("shield-bearer", &["shield"], 3, 0));
    catalog.insert_kit(combination("fortress", &["mountain", "shield-bearer"]));
    catalog.insert_kit(combination("fortress-reversed", &["shield-bearer", "mountain"]));

    catalog
}

/// A level 1 dwarf fury with every building block chosen and no answers.
pub fn hero() -> Hero {
    let mut hero = Hero::new("hero-1");
    hero.name = "Grimna".into();
    hero.characteristics.might = 2;
    hero.ancestry = Some(Id::new("dwarf"));
    hero.culture = Some(Id::new("nomad"));
    hero.career = Some(Id::new("soldier"));
    hero.class = Some(ClassSelection::new("fury", 1).with_subclass("berserker"));
    hero.kit = Some(Id::new("panther"));
    hero
}

/// `hero()` with every choice answered.
pub fn answered_hero() -> Hero {
    let mut hero = hero();
    hero.answer("dwarf-boon", ["boon-grounded", "boon-stable"]);
    hero.answer("env-skill", ["Navigate"]);
    hero.answer("org-language", ["Zaliac"]);
    hero.answer("fury-signature", ["gouge"]);
    hero.answer("fury-heroic", ["brutal-slam"]);
    hero
}
