use std::fs;
use std::path::PathBuf;

use dota_lookup::heroes::{HeroCatalog, hero_icon_id, hero_icon_url, normalize_hero_name};
use dota_lookup::opendota_fetch::parse_heroes_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn normalizes_internal_hero_names() {
    assert_eq!(normalize_hero_name("npc_dota_hero_antimage"), "antimage");
    assert_eq!(normalize_hero_name("npc_dota_hero_void_spirit"), "void-spirit");
    assert_eq!(normalize_hero_name("npc_dota_hero_Queen_Of_Pain"), "queen-of-pain");
}

#[test]
fn icon_id_is_normalized_name_outside_override_table() {
    assert_eq!(hero_icon_id("npc_dota_hero_void_spirit"), "void-spirit");
    assert_eq!(hero_icon_id("npc_dota_hero_pudge"), "pudge");
    assert_eq!(hero_icon_id("npc_dota_hero_winter_wyvern"), "winter-wyvern");
}

#[test]
fn icon_id_uses_underscored_form_for_overrides() {
    let overridden = [
        "chaos_knight",
        "sand_king",
        "phantom_assassin",
        "crystal_maiden",
        "legion_commander",
        "shadow_demon",
        "skywrath_mage",
        "naga_siren",
        "monkey_king",
        "dragon_knight",
        "templar_assassin",
        "earth_spirit",
    ];
    for name in overridden {
        let raw = format!("npc_dota_hero_{name}");
        assert_eq!(hero_icon_id(&raw), name, "override for {raw}");
    }
}

#[test]
fn icon_url_points_at_cdn_png() {
    assert_eq!(
        hero_icon_url("npc_dota_hero_crystal_maiden"),
        "https://cdn.cloudflare.steamstatic.com/apps/dota2/images/dota_react/heroes/crystal_maiden.png"
    );
}

#[test]
fn catalog_from_fixture_maps_ids_to_names_and_icons() {
    let records = parse_heroes_json(&read_fixture("heroes.json")).expect("fixture should parse");
    let catalog = HeroCatalog::from_records(records);
    assert_eq!(catalog.len(), 6);

    let ck = catalog.get(81).expect("chaos knight should be present");
    assert_eq!(ck.display_name, "Chaos Knight");
    assert!(ck.icon_url.ends_with("/chaos_knight.png"));

    let np = catalog.get(53).expect("nature's prophet should be present");
    assert_eq!(np.display_name, "Nature's Prophet");
    assert!(np.icon_url.ends_with("/furion.png"));

    assert!(catalog.get(999).is_none());
}

#[test]
fn empty_heroes_body_is_empty_catalog() {
    assert!(parse_heroes_json("null").expect("null should parse").is_empty());
    assert!(parse_heroes_json("  ").expect("blank should parse").is_empty());
    assert!(HeroCatalog::from_records(Vec::new()).is_empty());
}
