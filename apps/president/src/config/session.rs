use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::RuleSet;
use crate::errors::domain::DomainError;

/// Session-wide settings, passed to the table and session at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Stored on every game record.
    pub game_name: String,
    /// Stop after this many games; `None` defers to the replay policy.
    pub max_games: Option<u32>,
    /// Derives every deal and AI seed; `None` draws fresh entropy.
    pub seed: Option<u64>,
    /// `false` deals the deck in generation order.
    pub shuffle: bool,
    /// Remote seats poll their mailbox this often.
    pub tick_ms: u64,
    /// Extra polls before a remote seat auto-folds.
    pub retries: u32,
    /// Refused answers tolerated per decision before a forced fold.
    pub max_attempts: u32,
    /// Seats at the table; empty ones are filled with AI players.
    pub seats: usize,
    pub results_path: Option<PathBuf>,
    /// JSON rule set; defaults apply when absent.
    pub rules_path: Option<PathBuf>,
    pub log_json: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_name: "president".to_string(),
            max_games: None,
            seed: None,
            shuffle: true,
            tick_ms: 500,
            retries: 120,
            max_attempts: 20,
            seats: 4,
            results_path: None,
            rules_path: None,
            log_json: false,
        }
    }
}

impl SessionConfig {
    /// Read `PRESIDENT_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        Ok(Self {
            game_name: env::var("PRESIDENT_GAME_NAME").unwrap_or(defaults.game_name),
            max_games: parsed_var("PRESIDENT_GAMES")?,
            seed: parsed_var("PRESIDENT_SEED")?,
            shuffle: flag_var("PRESIDENT_SHUFFLE")?.unwrap_or(defaults.shuffle),
            tick_ms: parsed_var("PRESIDENT_TICK_MS")?.unwrap_or(defaults.tick_ms),
            retries: parsed_var("PRESIDENT_RETRIES")?.unwrap_or(defaults.retries),
            max_attempts: parsed_var("PRESIDENT_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
            seats: parsed_var("PRESIDENT_SEATS")?.unwrap_or(defaults.seats),
            results_path: env::var_os("PRESIDENT_RESULTS_PATH").map(PathBuf::from),
            rules_path: env::var_os("PRESIDENT_RULES").map(PathBuf::from),
            log_json: flag_var("PRESIDENT_LOG_JSON")?.unwrap_or(defaults.log_json),
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Rules from `rules_path`, or the defaults.
    pub fn load_rules(&self) -> Result<RuleSet, DomainError> {
        let Some(path) = &self.rules_path else {
            return Ok(RuleSet::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::config(format!("cannot read rules {}: {e}", path.display()))
        })?;
        let json = serde_json::from_str(&raw).map_err(|e| {
            DomainError::config(format!("rules {} are not JSON: {e}", path.display()))
        })?;
        RuleSet::from_json(&json)
    }
}

fn parsed_var<T>(key: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DomainError::config(format!("{key}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn flag_var(key: &str) -> Result<Option<bool>, DomainError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(DomainError::config(format!("{key}: not a flag: {raw:?}"))),
        },
        Err(_) => Ok(None),
    }
}
