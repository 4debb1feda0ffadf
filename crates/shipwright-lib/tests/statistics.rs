mod common;

use shipwright_lib::{ModifierChange, Mount, Shipyard};

fn damage_of(yard: &Shipyard, def_id: &str) -> Option<String> {
    let projection = yard.projection();
    let entry = yard.config().entries.iter().find(|e| e.def_id == def_id)?;
    projection.entry_damage(entry)
}

#[test]
fn starfighter_defaults_produce_expected_statistics() {
    let yard = common::new_ship("starfighter");
    let stats = yard.projection().stats();

    // The chassis speed is replaced by the installed engine.
    assert_eq!(stats.speed, Some(2.0));
    assert_eq!(stats.sr, Some(0.0));
    assert_eq!(stats.hp, Some(60.0));
    assert_eq!(stats.armor, Some(4.0));
    assert_eq!(stats.hyperdrive, None);
}

#[test]
fn defenses_follow_ability_scores_and_size() {
    let yard = common::new_ship("starfighter");
    let defenses = yard.projection().defenses();

    assert_eq!(defenses.fortitude, 17.0);
    assert_eq!(defenses.reflex, 17.0);
    assert_eq!(defenses.damage_threshold, 27.0);
}

#[test]
fn template_stats_are_added_to_the_baseline() {
    let mut yard = common::new_ship("starfighter");
    yard.select_template(Some("military"));

    let stats = yard.projection().stats();
    assert_eq!(stats.armor, Some(6.0));
    assert_eq!(stats.weapon_damage_dice, Some(1.0));
    assert_eq!(damage_of(&yard, "laser_cannon").as_deref(), Some("6d10x2"));
}

#[test]
fn armor_parts_add_armor_and_percentage_hit_points() {
    let mut yard = common::new_ship("light_freighter");
    yard.install("armor_plating", "", false).expect("known part");

    let stats = yard.projection().stats();
    assert_eq!(stats.armor, Some(14.0));
    assert_eq!(stats.hp, Some(132.0));
}

#[test]
fn best_hyperdrive_wins_regardless_of_order() {
    for order in [["hyperdrive_x3", "hyperdrive_x1"], ["hyperdrive_x1", "hyperdrive_x3"]] {
        let mut yard = common::bare_ship("light_freighter");
        for part in order {
            yard.install(part, "", false).expect("known part");
        }
        assert_eq!(yard.projection().stats().hyperdrive, Some(1.0), "{order:?}");
    }
}

#[test]
fn last_installed_shield_sets_the_rating() {
    let mut yard = common::bare_ship("light_freighter");
    yard.install("shield_sr25", "", false).expect("known part");
    assert_eq!(yard.projection().stats().sr, Some(25.0));

    // Same exclusive group, so the first shield is evicted.
    yard.install("shield_sr15", "", false).expect("known part");
    assert_eq!(yard.projection().stats().sr, Some(15.0));
}

#[test]
fn mounts_add_damage_dice() {
    let mut yard = common::new_ship("frigate");
    assert_eq!(damage_of(&yard, "heavy_turbolaser").as_deref(), Some("3d10x2"));

    let id = yard
        .config()
        .entries
        .iter()
        .find(|e| e.def_id == "heavy_turbolaser")
        .map(|e| e.instance_id.clone())
        .expect("stock turbolaser");
    yard.apply_change(&id, ModifierChange::Mount(Mount::Quad));
    assert_eq!(damage_of(&yard, "heavy_turbolaser").as_deref(), Some("5d10x2"));
}

#[test]
fn parts_without_damage_have_no_formula() {
    let yard = common::new_ship("starfighter");
    assert_eq!(damage_of(&yard, "ion_engine_2"), None);
}

#[test]
fn report_bundles_every_derived_value() {
    let yard = common::new_ship("starfighter");
    let report = yard.projection().report();

    assert_eq!(report.vehicle_id, "starfighter");
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.capacity.remaining, 6);
    assert_eq!(report.defenses.reflex, 17.0);
    assert_eq!(report.availability, "Military");
    assert_eq!(report.incompatible().count(), 0);
    assert_eq!(report.unresolved().count(), 0);

    let laser = report
        .entries
        .iter()
        .find(|e| e.def_id == "laser_cannon")
        .expect("laser entry");
    assert_eq!(laser.damage.as_deref(), Some("5d10x2"));
    assert!(laser.is_stock);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["capacity"]["total"], 11);
}
