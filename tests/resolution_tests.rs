mod common;

use herostat::feature::{FeatureField, FeatureKind};
use herostat::{
    resolve_features, Characteristic, DerivedStats, FeatureOrigin, Hero, HeroError, Id,
    MemoryCatalog,
};

fn ids(hero: &Hero, catalog: &MemoryCatalog) -> Vec<String> {
    resolve_features(hero, catalog)
        .iter()
        .map(|rf| rf.feature.id.to_string())
        .collect()
}

#[test]
fn test_blank_hero_resolves_to_nothing() {
    let catalog = common::catalog();
    let hero = Hero::new("blank");
    assert!(resolve_features(&hero, &catalog).is_empty());
}

#[test]
fn test_answered_hero_resolution_order() {
    let catalog = common::catalog();
    let hero = common::answered_hero();

    assert_eq!(
        ids(&hero, &catalog),
        vec![
            "dwarf-fire",
            "dwarf-spark",
            "dwarf-runic",
            "boon-grounded",
            "boon-stable",
            "nomad-caelian",
            "env-skill",
            "org-language",
            "up-wanderer",
            "soldier-climb",
            "soldier-drill",
            "fury-signature",
            "fury-heroic",
            "berserker-1",
        ]
    );

    let resolved = resolve_features(&hero, &catalog);
    assert_eq!(resolved.unresolved().count(), 0);
    assert_eq!(resolved.by_origin(FeatureOrigin::Culture).count(), 4);
    assert_eq!(resolved.by_origin(FeatureOrigin::Kit).count(), 0);
}

#[test]
fn test_unanswered_choices_are_surfaced() {
    let catalog = common::catalog();
    let hero = common::hero();
    let resolved = resolve_features(&hero, &catalog);

    let open: Vec<&str> = resolved
        .unresolved()
        .map(|rf| rf.feature.id.as_str())
        .collect();
    assert_eq!(
        open,
        vec!["dwarf-boon", "env-skill", "org-language", "fury-signature", "fury-heroic"]
    );

    let prompts = resolved.prompts();
    assert_eq!(prompts.len(), 5);
    assert!(matches!(
        &prompts[0],
        HeroError::IncompleteChoice { selected: 0, count: 2, .. }
    ));
}

#[test]
fn test_count_two_choice_needs_both_answers() {
    let catalog = common::catalog();
    let mut hero = common::hero();

    hero.answer("dwarf-boon", ["boon-grounded"]);
    let stats = DerivedStats::new(&hero, &catalog);
    assert_eq!(stats.characteristic(Characteristic::Might), 2);
    assert_eq!(stats.stability(), 0);
    let open = stats
        .features()
        .unresolved()
        .find(|rf| rf.feature.id.as_str() == "dwarf-boon")
        .map(|rf| rf.feature.missing_selections());
    assert_eq!(open, Some(1));

    hero.answer("dwarf-boon", ["boon-grounded", "boon-stable"]);
    let stats = DerivedStats::new(&hero, &catalog);
    assert_eq!(stats.characteristic(Characteristic::Might), 3);
    assert_eq!(stats.stability(), 1);
}

#[test]
fn test_unknown_and_repeated_answers_are_dropped() {
    let catalog = common::catalog();
    let mut hero = common::hero();
    hero.answer("dwarf-boon", ["boon-removed", "boon-quick", "boon-quick"]);

    let resolved = resolve_features(&hero, &catalog);
    let boon = resolved
        .iter()
        .find(|rf| rf.feature.id.as_str() == "dwarf-boon")
        .map(|rf| &rf.feature.kind);
    match boon {
        Some(FeatureKind::Choice(data)) => {
            assert_eq!(data.selected.len(), 1);
            assert_eq!(data.selected[0].id, Id::new("boon-quick"));
        }
        other => panic!("Expected open choice, got {other:?}"),
    }
    // Partial selections grant nothing.
    assert_eq!(DerivedStats::new(&hero, &catalog).speed(), 6);
}

#[test]
fn test_level_gating_for_class_and_subclass() {
    let catalog = common::catalog();
    let mut hero = common::answered_hero();
    assert!(!ids(&hero, &catalog).contains(&"fury-growing".to_string()));
    assert!(!ids(&hero, &catalog).contains(&"berserker-4".to_string()));

    if let Some(class) = hero.class.as_mut() {
        class.level = 4;
    }
    let resolved = ids(&hero, &catalog);
    assert!(resolved.contains(&"fury-growing".to_string()));
    assert!(resolved.contains(&"berserker-4".to_string()));
    assert_eq!(DerivedStats::new(&hero, &catalog).speed(), 7);
}

#[test]
fn test_language_and_skill_answers_are_filtered() {
    let catalog = common::catalog();
    let mut hero = common::answered_hero();
    hero.answer("org-language", ["Vaslorian", "Khelt"]);
    hero.answer("env-skill", ["Alchemy"]);

    let stats = DerivedStats::new(&hero, &catalog);
    let languages: Vec<String> = stats.languages().into_iter().collect();
    assert_eq!(languages, vec!["Caelian", "Khelt"]);

    // Alchemy is a crafting skill; the environment only offers exploration.
    let open: Vec<&str> = stats
        .features()
        .unresolved()
        .map(|rf| rf.feature.id.as_str())
        .collect();
    assert_eq!(open, vec!["env-skill"]);
    assert!(!stats.skills().contains("Alchemy"));
}

#[test]
fn test_class_ability_answers_respect_cost_and_pool() {
    let catalog = common::catalog();
    let mut hero = common::answered_hero();

    hero.answer("fury-heroic", ["gouge", "not-in-pool"]);
    let stats = DerivedStats::new(&hero, &catalog);
    assert_eq!(stats.features().unresolved().count(), 1);
    let abilities: Vec<&str> = stats.abilities(false).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(abilities, vec!["runic-carving", "gouge"]);

    hero.answer("fury-heroic", ["to-the-death", "brutal-slam"]);
    let stats = DerivedStats::new(&hero, &catalog);
    let abilities: Vec<&str> = stats.abilities(false).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(abilities, vec!["runic-carving", "gouge", "to-the-death"]);
}

#[test]
fn test_self_referential_choice_terminates() {
    let catalog = common::catalog();
    let mut hero = common::answered_hero();
    hero.complication = Some(Id::new("cursed"));
    hero.answer("curse-loop", ["curse-loop"]);

    let resolved = ids(&hero, &catalog);
    assert!(!resolved.contains(&"curse-loop".to_string()));
    assert!(!resolved.contains(&"curse-boon".to_string()));
    // The cut branch contributes nothing; its siblings still apply.
    assert!(resolved.contains(&"cursed-cold".to_string()));
    assert_eq!(DerivedStats::new(&hero, &catalog).speed(), 6);
}

#[test]
fn test_stale_selections_degrade_to_defaults() {
    let catalog = common::catalog();
    let mut hero = common::answered_hero();
    hero.ancestry = Some(Id::new("retired-ancestry"));
    hero.kit = Some(Id::new("retired-kit"));
    hero.answer("fury-signature", ["retired-ability"]);

    let stats = DerivedStats::new(&hero, &catalog);
    assert!(stats.features().by_origin(FeatureOrigin::Ancestry).next().is_none());
    assert!(stats.kits().is_empty());
    assert_eq!(stats.speed(), 5);
    assert_eq!(stats.features().unresolved().count(), 1);
}

#[test]
fn test_hero_json_round_trip() {
    let hero = common::answered_hero();
    let json = hero.to_json().unwrap();
    let back = Hero::from_json(&json).unwrap();
    assert_eq!(back, hero);

    let catalog = common::catalog();
    assert_eq!(
        resolve_features(&back, &catalog),
        resolve_features(&hero, &catalog)
    );
}

#[test]
fn test_catalog_document_and_audit() {
    let catalog = MemoryCatalog::from_json(
        r#"{
            "abilities": [
                { "id": "free-strike-melee", "name": "Melee Free Strike", "usage": "Action" },
                { "id": "free-strike-ranged", "name": "Ranged Free Strike", "usage": "Action" }
            ],
            "careers": [
                {
                    "id": "sage",
                    "name": "Sage",
                    "features": [
                        { "id": "sage-read", "name": "Read", "kind": { "type": "Ability", "ability": "lost-tome" } },
                        { "id": "sage-mind", "name": "Sharp", "kind": { "type": "Bonus", "field": "Reason", "value": 1 } }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let problems = catalog.audit();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].to_string(), "Missing ability: lost-tome");

    let mut hero = Hero::new("sage-hero");
    hero.career = Some(Id::new("sage"));
    let resolved = resolve_features(&hero, &catalog);
    assert_eq!(resolved.len(), 1);
    let stats = DerivedStats::with_features(&hero, &catalog, resolved);
    assert_eq!(stats.characteristic(Characteristic::Reason), 1);
    assert_eq!(
        stats.breakdown(FeatureField::Reason).sources,
        vec![("Score".to_string(), 0.0), ("Sharp".to_string(), 1.0)]
    );
}
