use std::env;
use std::time::Duration;

pub const DEFAULT_HEROES_URL: &str = "https://api.opendota.com/api/heroes";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which match field decides the Win/Lose column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultBasis {
    /// Radiant slots (< 128) win.
    #[default]
    PlayerSlot,
    /// Legacy behaviour seen in one upstream build: compares the match rank
    /// tier against 128, which reports nearly every match as a win.
    RankTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub heroes_url: String,
    pub backend_url: String,
    pub timeout: Duration,
    pub result_basis: ResultBasis,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            heroes_url: DEFAULT_HEROES_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            result_basis: ResultBasis::PlayerSlot,
        }
    }
}

impl LookupConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                let trimmed = val.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let heroes_url =
            opt("OPENDOTA_HEROES_URL").unwrap_or_else(|| DEFAULT_HEROES_URL.to_string());
        let backend_url = opt("LOOKUP_BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let timeout_secs = opt("HTTP_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let result_basis = match opt("MATCH_RESULT_BASIS").map(|v| v.to_lowercase()).as_deref() {
            Some("rank_tier") | Some("rank-tier") => ResultBasis::RankTier,
            _ => ResultBasis::PlayerSlot,
        };

        Self {
            heroes_url,
            backend_url,
            timeout: Duration::from_secs(timeout_secs),
            result_basis,
        }
    }

    pub fn player_url(&self, account_id: &str) -> String {
        format!("{}/players/{account_id}", self.backend_url)
    }

    pub fn recent_matches_url(&self, account_id: &str) -> String {
        format!("{}/api/recent-matches/{account_id}", self.backend_url)
    }
}
