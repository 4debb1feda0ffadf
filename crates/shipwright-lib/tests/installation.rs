mod common;

use std::collections::HashMap;

use shipwright_lib::modifiers::DEFAULT_WEAPON_USER;
use shipwright_lib::{ModifierChange, Mount, SizeCheck};

#[test]
fn installing_into_an_occupied_exclusive_group_evicts_the_occupant() {
    let mut yard = common::bare_ship("starfighter");

    let first = yard.install("ion_engine_2", "Aft", false).expect("known part");
    assert!(first.evicted.is_empty());

    let second = yard.install("ion_engine_4", "Aft", false).expect("known part");
    assert_eq!(second.evicted, vec![first.instance_id.clone()]);

    let ids: Vec<&str> = yard.config().entries.iter().map(|e| e.def_id.as_str()).collect();
    assert_eq!(ids, vec!["ion_engine_4"]);
}

#[test]
fn at_most_one_entry_per_exclusive_group_after_any_sequence() {
    let mut yard = common::bare_ship("light_freighter");
    let sequence = [
        "shield_sr15",
        "ion_engine_2",
        "shield_sr25",
        "laser_cannon",
        "ion_engine_4",
        "shield_sr15",
        "laser_cannon",
        "ion_engine_2",
    ];
    for part in sequence {
        yard.install(part, "", false);
    }

    let projection = yard.projection();
    let mut per_group: HashMap<String, usize> = HashMap::new();
    for entry in &yard.config().entries {
        if let Some(group) = projection.part(entry).and_then(|p| p.exclusive_group.clone()) {
            *per_group.entry(group).or_default() += 1;
        }
    }
    assert_eq!(per_group.get("shield"), Some(&1));
    assert_eq!(per_group.get("sublight"), Some(&1));
    // Parts without a group stack freely.
    assert_eq!(
        yard.config().entries.iter().filter(|e| e.def_id == "laser_cannon").count(),
        2
    );
}

#[test]
fn unknown_parts_are_ignored() {
    let mut yard = common::bare_ship("starfighter");
    assert!(yard.install("does_not_exist", "", false).is_none());
    assert!(yard.config().entries.is_empty());
}

#[test]
fn new_entries_get_default_modifiers_and_weapons_get_a_pilot() {
    let mut yard = common::bare_ship("starfighter");
    let gun = yard.install("laser_cannon", "Nose", false).expect("known part");
    let decoy = yard.install("sensor_decoy", "Tail", true).expect("known part");
    let shield = yard.install("shield_sr15", "Core", false).expect("known part");

    let config = yard.config();
    let gun = config.entry(&gun.instance_id).expect("gun installed");
    assert_eq!(gun.modifiers.weapon_user.as_deref(), Some(DEFAULT_WEAPON_USER));
    assert_eq!(gun.modifiers.quantity, 1);
    assert_eq!(gun.modifiers.battery_count, 1);
    assert_eq!(gun.modifiers.payload_count, 0);
    assert_eq!(gun.location, "Nose");
    assert!(!gun.is_stock);

    let decoy = config.entry(&decoy.instance_id).expect("decoy installed");
    assert_eq!(decoy.modifiers.weapon_user.as_deref(), Some(DEFAULT_WEAPON_USER));
    assert!(decoy.is_non_standard);

    let shield = config.entry(&shield.instance_id).expect("shield installed");
    assert_eq!(shield.modifiers.weapon_user, None);
}

#[test]
fn removal_is_by_instance_id() {
    let mut yard = common::bare_ship("starfighter");
    let first = yard.install("laser_cannon", "", false).expect("known part");
    let second = yard.install("laser_cannon", "", false).expect("known part");

    assert!(yard.remove(&first.instance_id));
    assert!(!yard.remove(&first.instance_id));
    assert_eq!(yard.config().entries.len(), 1);
    assert_eq!(yard.config().entries[0].instance_id, second.instance_id);
}

#[test]
fn install_defaults_seeds_stock_entries_with_their_values() {
    let yard = common::new_ship("starfighter");
    let entries = &yard.config().entries;

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.is_stock));
    assert_eq!(entries[0].def_id, "ion_engine_2");
    assert_eq!(entries[1].def_id, "laser_cannon");
    assert_eq!(entries[1].modifiers.mount, Mount::Twin);
    assert_eq!(entries[1].modifiers.weapon_user.as_deref(), Some(DEFAULT_WEAPON_USER));
}

#[test]
fn install_defaults_resets_previous_choices() {
    let mut yard = common::new_ship("starfighter");
    yard.install("shield_sr15", "", false);
    yard.select_template(Some("military"));
    yard.set_cargo_conversion(5.0);
    yard.set_name("Red Five");

    yard.install_defaults("light_freighter");

    let config = yard.config();
    assert_eq!(config.chassis_id, "light_freighter");
    assert_eq!(config.template_id, None);
    assert_eq!(config.cargo_to_ep_amount, 0.0);
    assert!(config.name.is_empty());
    let ids: Vec<&str> = config.entries.iter().map(|e| e.def_id.as_str()).collect();
    assert_eq!(ids, vec!["ion_engine_2", "hyperdrive_x3", "laser_cannon"]);
}

#[test]
fn size_bounds_are_advisory() {
    let mut yard = common::bare_ship("starfighter");
    let outcome = yard.install("heavy_turbolaser", "", false).expect("known part");
    assert_eq!(
        outcome.size,
        SizeCheck::ChassisTooSmall {
            min: "Colossal".to_string()
        }
    );
    assert_eq!(yard.config().entries.len(), 1);
    assert!(!yard.projection().is_size_compatible("heavy_turbolaser"));
    assert!(yard.projection().is_size_compatible("ion_engine_4"));

    let mut freighter = common::bare_ship("light_freighter");
    let outcome = freighter.install("ion_engine_4", "", false).expect("known part");
    assert_eq!(
        outcome.size,
        SizeCheck::ChassisTooLarge {
            max: "Gargantuan".to_string()
        }
    );
    assert_eq!(freighter.projection().incompatible_entries().len(), 1);
}

#[test]
fn fire_link_resets_battery_and_enables_selective_fire_on_payload_parts() {
    let mut yard = common::bare_ship("starfighter");
    let missile = yard.install("missile_launcher", "", false).expect("known part");
    let laser = yard.install("laser_cannon", "", false).expect("known part");

    for id in [&missile.instance_id, &laser.instance_id] {
        assert!(yard.apply_change(id, ModifierChange::BatteryCount(3)));
        assert!(yard.apply_change(id, ModifierChange::FireLink(2)));
    }

    let config = yard.config();
    let missile = config.entry(&missile.instance_id).expect("missile installed");
    assert_eq!(missile.modifiers.battery_count, 1);
    assert!(missile.modifiers.fire_link_option);

    let laser = config.entry(&laser.instance_id).expect("laser installed");
    assert_eq!(laser.modifiers.battery_count, 1);
    assert!(!laser.modifiers.fire_link_option);
}

#[test]
fn changes_to_unknown_entries_are_reported() {
    let mut yard = common::bare_ship("starfighter");
    assert!(!yard.apply_change("nope", ModifierChange::Quantity(2)));
}

#[test]
fn removing_a_base_part_purges_its_entries() {
    let mut yard = common::new_ship("light_freighter");
    assert!(yard.remove_part("hyperdrive_x3"));
    assert!(!yard.config().entries.iter().any(|e| e.def_id == "hyperdrive_x3"));
    assert!(!yard.remove_part("hyperdrive_x3"));
}
