use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const UNRANKED_LABEL: &str = "Unranked";

const GAME_MODES: [(u32, &str); 16] = [
    (0, "None"),
    (1, "All Pick"),
    (2, "Captain's Mode"),
    (3, "Random Draft"),
    (4, "Single Draft"),
    (5, "All Random"),
    (6, "Intro"),
    (7, "Diretide"),
    (8, "Reverse Captain's Mode"),
    (9, "The Greeviling"),
    (10, "Tutorial"),
    (11, "Mid Only"),
    (12, "Least Played"),
    (13, "Limited Heroes"),
    (14, "Custom"),
    (22, "Ranked"),
];

const RANK_TIER_NAMES: [&str; 7] = [
    "Herald", "Guardian", "Crusader", "Archon", "Legend", "Ancient", "Divine",
];

// Top tier has no sub-ranks.
const IMMORTAL_TIER: u32 = 80;

static GAME_MODE_LABELS: Lazy<HashMap<u32, &'static str>> =
    Lazy::new(|| GAME_MODES.iter().copied().collect());

static RANK_TIER_LABELS: Lazy<HashMap<u32, String>> = Lazy::new(|| {
    rank_tier_codes()
        .map(|code| {
            let label = if code == IMMORTAL_TIER {
                "Immortal".to_string()
            } else {
                let name = RANK_TIER_NAMES[(code / 10 - 1) as usize];
                format!("{name} {}", code % 10)
            };
            (code, label)
        })
        .collect()
});

pub fn game_mode_label(code: Option<u32>) -> &'static str {
    code.and_then(|code| GAME_MODE_LABELS.get(&code).copied())
        .unwrap_or(UNKNOWN_LABEL)
}

pub fn rank_tier_label(tier: Option<u32>) -> &'static str {
    match tier {
        None => UNRANKED_LABEL,
        Some(tier) => RANK_TIER_LABELS
            .get(&tier)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL),
    }
}

pub const RANK_TIER_COUNT: usize = RANK_TIER_NAMES.len() * 5 + 1;

/// Every code that has a rank label, ascending.
pub fn rank_tier_codes() -> impl Iterator<Item = u32> {
    (1..=RANK_TIER_NAMES.len() as u32)
        .flat_map(|tier| (1..=5).map(move |star| tier * 10 + star))
        .chain(std::iter::once(IMMORTAL_TIER))
}
