use std::collections::HashMap;

use serde::Deserialize;

const HERO_NAME_PREFIX: &str = "npc_dota_hero_";
const HERO_ICON_BASE: &str =
    "https://cdn.cloudflare.steamstatic.com/apps/dota2/images/dota_react/heroes";

// The CDN keeps underscores for these heroes while every other icon uses the
// hyphenated name.
const ICON_OVERRIDES: [(&str, &str); 12] = [
    ("chaos-knight", "chaos_knight"),
    ("sand-king", "sand_king"),
    ("phantom-assassin", "phantom_assassin"),
    ("crystal-maiden", "crystal_maiden"),
    ("legion-commander", "legion_commander"),
    ("shadow-demon", "shadow_demon"),
    ("skywrath-mage", "skywrath_mage"),
    ("naga-siren", "naga_siren"),
    ("monkey-king", "monkey_king"),
    ("dragon-knight", "dragon_knight"),
    ("templar-assassin", "templar_assassin"),
    ("earth-spirit", "earth_spirit"),
];

/// One record from the upstream heroes endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HeroRecord {
    pub id: u32,
    pub name: String,
    pub localized_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroInfo {
    pub display_name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: HashMap<u32, HeroInfo>,
}

impl HeroCatalog {
    pub fn from_records(records: Vec<HeroRecord>) -> Self {
        let heroes = records
            .into_iter()
            .map(|record| {
                let info = HeroInfo {
                    icon_url: hero_icon_url(&record.name),
                    display_name: record.localized_name,
                };
                (record.id, info)
            })
            .collect();
        Self { heroes }
    }

    pub fn get(&self, hero_id: u32) -> Option<&HeroInfo> {
        self.heroes.get(&hero_id)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

/// `npc_dota_hero_Chaos_Knight` -> `chaos-knight`
pub fn normalize_hero_name(raw: &str) -> String {
    raw.replacen(HERO_NAME_PREFIX, "", 1)
        .replace('_', "-")
        .to_lowercase()
}

pub fn hero_icon_id(raw: &str) -> String {
    let normalized = normalize_hero_name(raw);
    ICON_OVERRIDES
        .iter()
        .find(|(hyphenated, _)| *hyphenated == normalized)
        .map(|(_, underscored)| underscored.to_string())
        .unwrap_or(normalized)
}

pub fn hero_icon_url(raw: &str) -> String {
    format!("{HERO_ICON_BASE}/{}.png", hero_icon_id(raw))
}
