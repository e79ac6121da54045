use anyhow::{Context, Result};
use chrono::FixedOffset;
use std::path::PathBuf;
use std::time::Duration;

use crate::modules::roster_lock::use_cases::audit_integrity::handler::AuditOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub league_offset: FixedOffset,
    pub lock_interval: Duration,
    pub backfill_interval: Duration,
    pub audit_prune_stale: bool,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Every variable is optional and falls back to its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let offset_minutes: i32 = parse_or(&lookup, "LEAGUE_UTC_OFFSET_MINUTES", 0)?;
        let league_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("LEAGUE_UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            league_offset,
            lock_interval: Duration::from_secs(parse_or(&lookup, "LOCK_INTERVAL_SECS", 60)?),
            backfill_interval: Duration::from_secs(parse_or(&lookup, "BACKFILL_INTERVAL_SECS", 3600)?),
            audit_prune_stale: parse_or(&lookup, "AUDIT_PRUNE_STALE", true)?,
            seed_path: lookup("SEED_PATH").filter(|path| !path.is_empty()).map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            prune_stale: self.audit_prune_stale,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.lock_interval, Duration::from_secs(60));
        assert_eq!(config.backfill_interval, Duration::from_secs(3600));
        assert_eq!(config.league_offset.local_minus_utc(), 0);
        assert!(config.audit_options().prune_stale);
        assert_eq!(config.seed_path, None);
    }

    #[rstest]
    fn it_should_read_every_variable() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LEAGUE_UTC_OFFSET_MINUTES", "-300"),
            ("LOCK_INTERVAL_SECS", "15"),
            ("BACKFILL_INTERVAL_SECS", "600"),
            ("AUDIT_PRUNE_STALE", "false"),
            ("SEED_PATH", "./seed.json"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.league_offset.local_minus_utc(), -300 * 60);
        assert_eq!(config.lock_interval, Duration::from_secs(15));
        assert!(!config.audit_prune_stale);
        assert_eq!(config.seed_path, Some(PathBuf::from("./seed.json")));
    }

    #[rstest]
    #[case("PORT", "not-a-port")]
    #[case("AUDIT_PRUNE_STALE", "maybe")]
    #[case("LEAGUE_UTC_OFFSET_MINUTES", "100000")]
    #[case("LEAGUE_UTC_OFFSET_MINUTES", "2147483647")]
    #[case("LEAGUE_UTC_OFFSET_MINUTES", "-2147483648")]
    fn it_should_reject_invalid_values(#[case] key: &str, #[case] value: &str) {
        let error = Config::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
        assert!(error.to_string().contains(key));
    }
}
