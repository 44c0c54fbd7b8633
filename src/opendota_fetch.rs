use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::LookupConfig;
use crate::heroes::{HeroCatalog, HeroRecord};
use crate::http_client::{HttpText, build_http_client, fetch_text};
use crate::state::{MatchSummary, PlayerProfile, SteamAccount};

pub const PLAYER_FETCH_ERROR: &str = "Error fetching player data";

/// The three upstream reads the lookup view depends on.
pub trait LookupSource: Send + Sync {
    fn fetch_heroes(&self) -> Result<HeroCatalog>;
    fn fetch_player(&self, account_id: &str) -> Result<PlayerProfile>;
    fn fetch_recent_matches(&self, account_id: &str) -> Result<Vec<MatchSummary>>;
}

pub struct OpenDotaSource {
    client: Client,
    config: LookupConfig,
}

impl OpenDotaSource {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { client, config })
    }
}

impl LookupSource for OpenDotaSource {
    fn fetch_heroes(&self) -> Result<HeroCatalog> {
        let resp = fetch_text(&self.client, &self.config.heroes_url)
            .context("Error fetching heroes")?;
        if !resp.is_success() {
            return Err(anyhow!("Error fetching heroes: http {}", resp.status));
        }
        let records = parse_heroes_json(&resp.body)?;
        Ok(HeroCatalog::from_records(records))
    }

    fn fetch_player(&self, account_id: &str) -> Result<PlayerProfile> {
        let url = self.config.player_url(account_id);
        let resp = fetch_text(&self.client, &url).context(PLAYER_FETCH_ERROR)?;
        player_from_response(&resp)
    }

    fn fetch_recent_matches(&self, account_id: &str) -> Result<Vec<MatchSummary>> {
        let url = self.config.recent_matches_url(account_id);
        let resp = fetch_text(&self.client, &url).context("recent matches request failed")?;
        recent_matches_from_response(&resp)
    }
}

/// Non-success responses surface their body verbatim, or the generic
/// message when the body is blank.
pub fn player_from_response(resp: &HttpText) -> Result<PlayerProfile> {
    if !resp.is_success() {
        if resp.body.trim().is_empty() {
            return Err(anyhow!(PLAYER_FETCH_ERROR));
        }
        return Err(anyhow!(resp.body.clone()));
    }
    parse_player_json(&resp.body)
}

pub fn recent_matches_from_response(resp: &HttpText) -> Result<Vec<MatchSummary>> {
    if !resp.is_success() {
        return Err(anyhow!("http {}: {}", resp.status, resp.body));
    }
    parse_recent_matches_json(&resp.body)
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    #[serde(default)]
    profile: Option<WireProfile>,
    #[serde(default)]
    rank_tier: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    #[serde(default)]
    personaname: Option<String>,
    #[serde(default)]
    avatarfull: Option<String>,
    #[serde(default)]
    steamid: Option<String>,
    #[serde(default)]
    loccountrycode: Option<String>,
    #[serde(default)]
    profileurl: Option<String>,
    #[serde(default)]
    plus: Option<bool>,
    #[serde(default)]
    last_login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    match_id: u64,
    #[serde(default)]
    hero_id: Option<u32>,
    #[serde(default)]
    player_slot: Option<u32>,
    #[serde(default)]
    kills: Option<u32>,
    #[serde(default)]
    deaths: Option<u32>,
    #[serde(default)]
    assists: Option<u32>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    game_mode: Option<u32>,
    #[serde(default)]
    rank_tier: Option<u32>,
}

pub fn parse_heroes_json(raw: &str) -> Result<Vec<HeroRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid heroes json")
}

pub fn parse_player_json(raw: &str) -> Result<PlayerProfile> {
    let data: PlayerResponse =
        serde_json::from_str(raw.trim()).context("invalid player json")?;
    let account = data.profile.map(|p| SteamAccount {
        persona_name: p.personaname.unwrap_or_default(),
        avatar_url: p.avatarfull.unwrap_or_default(),
        steam_id: p.steamid.unwrap_or_default(),
        country_code: p.loccountrycode.filter(|c| !c.trim().is_empty()),
        profile_url: p.profileurl.unwrap_or_default(),
        plus: p.plus.unwrap_or(false),
        last_login: p.last_login.filter(|v| !v.trim().is_empty()),
    });
    Ok(PlayerProfile {
        account,
        rank_tier: data.rank_tier,
    })
}

pub fn parse_recent_matches_json(raw: &str) -> Result<Vec<MatchSummary>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<WireMatch> =
        serde_json::from_str(trimmed).context("invalid recent matches json")?;
    Ok(rows
        .into_iter()
        .map(|m| MatchSummary {
            match_id: m.match_id,
            hero_id: m.hero_id.unwrap_or_default(),
            player_slot: m.player_slot,
            kills: m.kills.unwrap_or_default(),
            deaths: m.deaths.unwrap_or_default(),
            assists: m.assists.unwrap_or_default(),
            duration_secs: m.duration.unwrap_or_default(),
            game_mode: m.game_mode,
            rank_tier: m.rank_tier,
        })
        .collect())
}
