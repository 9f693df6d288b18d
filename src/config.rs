use serde::Deserialize;
use std::path::PathBuf;
use config::{Config, Environment, File};
use tracing::debug;
use crate::error::{Error, Result};

pub const DEFAULT_TOP_ACTOR_COUNT: i64 = 4;
pub const DEFAULT_BASE_URL: &str = "https://letterboxd.com";
pub const DEFAULT_REQUEST_DELAY_MS: i64 = 500;

/// Run configuration, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub list_owner: String,
    pub list_slug: String,
    /// Club usernames in configured order, trimmed and deduplicated.
    pub club_users: Vec<String>,
    pub top_actor_count: usize,
    pub output_path: PathBuf,
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub request_delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS as u64,
        }
    }
}

// Shape of the raw sources before validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
    list_owner: String,
    list_slug: String,
    club_users: String,
    output_path: String,
    top_actor_count: i64,
    base_url: String,
    request_delay_ms: i64,
}

impl Settings {
    /// Loads `config/default` when present, then the process environment.
    pub fn new() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::default());

        Self::from_builder(builder)
    }

    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder
            .set_default("top_actor_count", DEFAULT_TOP_ACTOR_COUNT)?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("request_delay_ms", DEFAULT_REQUEST_DELAY_MS)?
            .build()?;

        let raw: RawSettings = config.try_deserialize()?;
        let settings = Self::validate(raw)?;

        debug!(
            list_owner = %settings.list_owner,
            list_slug = %settings.list_slug,
            club_users = ?settings.club_users,
            top_actor_count = settings.top_actor_count,
            output_path = %settings.output_path.display(),
            base_url = %settings.scrape.base_url,
            "Loaded settings"
        );

        Ok(settings)
    }

    fn validate(raw: RawSettings) -> Result<Self> {
        let list_owner = required("LIST_OWNER", raw.list_owner)?;
        let list_slug = required("LIST_SLUG", raw.list_slug)?;
        let output_path = required("OUTPUT_PATH", raw.output_path)?;

        let club_users = parse_club_users(&raw.club_users);
        if club_users.is_empty() {
            return Err(Error::InvalidConfig(
                "CLUB_USERS must name at least one user".to_string(),
            ));
        }

        if raw.top_actor_count < 1 {
            return Err(Error::InvalidConfig(format!(
                "TOP_ACTOR_COUNT must be a positive integer, got {}",
                raw.top_actor_count
            )));
        }

        if raw.request_delay_ms < 0 {
            return Err(Error::InvalidConfig(format!(
                "REQUEST_DELAY_MS must not be negative, got {}",
                raw.request_delay_ms
            )));
        }

        Ok(Self {
            list_owner,
            list_slug,
            club_users,
            top_actor_count: raw.top_actor_count as usize,
            output_path: PathBuf::from(output_path),
            scrape: ScrapeConfig {
                base_url: raw.base_url.trim_end_matches('/').to_string(),
                request_delay_ms: raw.request_delay_ms as u64,
            },
        })
    }
}

fn required(name: &str, value: String) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidConfig(format!("{} is empty", name)));
    }
    Ok(value.to_string())
}

/// Splits a comma separated username list, keeping the first occurrence of each name.
pub fn parse_club_users(raw: &str) -> Vec<String> {
    let mut users: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !users.iter().any(|u| u == name) {
            users.push(name.to_string());
        }
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder()
            .set_override("list_owner", "owner").unwrap()
            .set_override("list_slug", "club-list").unwrap()
            .set_override("club_users", "alice, bob,,alice ,carol").unwrap()
            .set_override("output_path", "out/stats.json").unwrap()
    }

    #[test]
    fn club_users_are_trimmed_and_deduplicated() {
        assert_eq!(
            parse_club_users(" alice,bob , ,alice,carol"),
            vec!["alice", "bob", "carol"]
        );
        assert!(parse_club_users(" , ").is_empty());
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let settings = Settings::from_builder(builder()).unwrap();

        assert_eq!(settings.list_owner, "owner");
        assert_eq!(settings.club_users, vec!["alice", "bob", "carol"]);
        assert_eq!(settings.top_actor_count, 4);
        assert_eq!(settings.output_path, PathBuf::from("out/stats.json"));
        assert_eq!(settings.scrape.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn top_actor_count_is_read_from_strings() {
        let settings = Settings::from_builder(
            builder().set_override("top_actor_count", "2").unwrap(),
        )
        .unwrap();
        assert_eq!(settings.top_actor_count, 2);
    }

    #[test]
    fn non_integer_actor_count_is_a_config_error() {
        let err = Settings::from_builder(
            builder().set_override("top_actor_count", "many").unwrap(),
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn zero_actor_count_is_rejected() {
        let err = Settings::from_builder(
            builder().set_override("top_actor_count", 0).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn missing_required_key_is_a_config_error() {
        let builder = Config::builder()
            .set_override("list_owner", "owner").unwrap()
            .set_override("club_users", "alice").unwrap()
            .set_override("output_path", "stats.json").unwrap();

        let err = Settings::from_builder(builder).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_club_is_rejected() {
        let err = Settings::from_builder(
            builder().set_override("club_users", " , ").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
