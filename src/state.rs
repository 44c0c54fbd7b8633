use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::config::ResultBasis;
use crate::heroes::{HeroCatalog, HeroInfo};
use crate::lookup_tables::{UNKNOWN_LABEL, game_mode_label, rank_tier_label};

const MAX_LOGS: usize = 200;
// Slots below this belong to the Radiant side.
const RADIANT_SLOT_LIMIT: u32 = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamAccount {
    pub persona_name: String,
    pub avatar_url: String,
    pub steam_id: String,
    pub country_code: Option<String>,
    pub profile_url: String,
    pub plus: bool,
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub account: Option<SteamAccount>,
    pub rank_tier: Option<u32>,
}

impl PlayerProfile {
    pub fn rank_label(&self) -> &'static str {
        rank_tier_label(self.rank_tier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_id: u64,
    pub hero_id: u32,
    pub player_slot: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub duration_secs: u32,
    pub game_mode: Option<u32>,
    pub rank_tier: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Lose,
}

impl MatchResult {
    pub fn label(self) -> &'static str {
        match self {
            MatchResult::Win => "Win",
            MatchResult::Lose => "Lose",
        }
    }
}

impl MatchSummary {
    /// A missing field compares as "not below 128", so it reads as a loss.
    pub fn result(&self, basis: ResultBasis) -> MatchResult {
        let field = match basis {
            ResultBasis::PlayerSlot => self.player_slot,
            ResultBasis::RankTier => self.rank_tier,
        };
        match field {
            Some(value) if value < RADIANT_SLOT_LIMIT => MatchResult::Win,
            _ => MatchResult::Lose,
        }
    }
}

pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Best-effort local rendering of an upstream timestamp; unparseable values
/// are shown as-is.
pub fn format_last_login(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroCell {
    Known(HeroInfo),
    Unknown,
}

impl HeroCell {
    pub fn label(&self) -> &str {
        match self {
            HeroCell::Known(info) => &info.display_name,
            HeroCell::Unknown => UNKNOWN_LABEL,
        }
    }
}

/// One rendered line of the recent matches table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub match_id: u64,
    pub hero: HeroCell,
    pub result: MatchResult,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub duration: String,
    pub game_mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    Lookup { seq: u64, account_id: String },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetHeroes(HeroCatalog),
    ProfileLoaded { seq: u64, profile: PlayerProfile },
    LookupSucceeded { seq: u64, matches: Vec<MatchSummary> },
    LookupFailed { seq: u64, message: String },
    Log(String),
}

/// Lookup fields are private: they only change through `begin_lookup` and
/// `apply_delta`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub input: String,
    pub selected: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub result_basis: ResultBasis,
    profile: Option<PlayerProfile>,
    matches: Vec<MatchSummary>,
    heroes: HeroCatalog,
    loading: bool,
    error: Option<String>,
    lookup_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            selected: 0,
            help_overlay: false,
            logs: VecDeque::new(),
            result_basis: ResultBasis::PlayerSlot,
            profile: None,
            matches: Vec::new(),
            heroes: HeroCatalog::default(),
            loading: false,
            error: None,
            lookup_seq: 0,
        }
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    pub fn heroes(&self) -> &HeroCatalog {
        &self.heroes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn lookup_seq(&self) -> u64 {
        self.lookup_seq
    }

    /// Starts a lookup for the current input. Returns the command to hand to
    /// the provider, or `None` when the input is blank.
    pub fn begin_lookup(&mut self) -> Option<ProviderCommand> {
        if self.input.trim().is_empty() {
            return None;
        }
        self.lookup_seq += 1;
        self.loading = true;
        self.error = None;
        Some(ProviderCommand::Lookup {
            seq: self.lookup_seq,
            account_id: self.input.clone(),
        })
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn select_next(&mut self) {
        if self.matches.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1).min(self.matches.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn hero_cell(&self, hero_id: u32) -> HeroCell {
        match self.heroes.get(hero_id) {
            Some(info) => HeroCell::Known(info.clone()),
            None => HeroCell::Unknown,
        }
    }

    pub fn match_rows(&self) -> Vec<MatchRow> {
        self.matches
            .iter()
            .map(|m| MatchRow {
                match_id: m.match_id,
                hero: self.hero_cell(m.hero_id),
                result: m.result(self.result_basis),
                kills: m.kills,
                deaths: m.deaths,
                assists: m.assists,
                duration: format_duration(m.duration_secs),
                game_mode: game_mode_label(m.game_mode),
            })
            .collect()
    }

    pub fn selected_row(&self) -> Option<MatchRow> {
        self.match_rows().into_iter().nth(self.selected)
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.lookup_seq
    }

    fn clear_lookup(&mut self) {
        self.profile = None;
        self.matches.clear();
        self.selected = 0;
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetHeroes(catalog) => {
            state.push_log(format!("[INFO] Hero catalog loaded ({} heroes)", catalog.len()));
            state.heroes = catalog;
        }
        Delta::ProfileLoaded { seq, profile } => {
            if !state.is_current(seq) {
                state.push_log(format!("[INFO] Dropped stale profile for lookup #{seq}"));
                return;
            }
            // Matches from an earlier lookup must not sit under the new profile.
            state.matches.clear();
            state.selected = 0;
            state.profile = Some(profile);
        }
        Delta::LookupSucceeded { seq, matches } => {
            if !state.is_current(seq) {
                state.push_log(format!("[INFO] Dropped stale matches for lookup #{seq}"));
                return;
            }
            state.push_log(format!(
                "[INFO] Lookup #{seq} loaded {} recent matches",
                matches.len()
            ));
            state.matches = matches;
            state.selected = 0;
            state.loading = false;
        }
        Delta::LookupFailed { seq, message } => {
            if !state.is_current(seq) {
                state.push_log(format!("[INFO] Dropped stale failure for lookup #{seq}"));
                return;
            }
            state.push_log(format!("[WARN] Lookup #{seq} failed: {message}"));
            state.clear_lookup();
            state.error = Some(message);
            state.loading = false;
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
