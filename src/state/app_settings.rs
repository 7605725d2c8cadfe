use crate::state::panels::DEFAULT_POLL_INTERVAL;
use log::LevelFilter;
use nba_api::client::ESPN_NBA_SITE;
use std::time::Duration;

pub const POLL_SECS_VAR: &str = "HOOPBOARD_POLL_SECS";
pub const API_BASE_VAR: &str = "HOOPBOARD_API_BASE";
pub const LOG_VAR: &str = "HOOPBOARD_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub poll_interval: Duration,
    pub api_base: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            api_base: ESPN_NBA_SITE.to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, empty or unparsable values keep their defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(secs) = value(POLL_SECS_VAR).and_then(|v| v.parse::<u64>().ok())
            && secs > 0
        {
            settings.poll_interval = Duration::from_secs(secs);
        }
        if let Some(base) = value(API_BASE_VAR) {
            settings.api_base = base;
        }
        settings.log_level = value(LOG_VAR).and_then(|v| v.parse::<LevelFilter>().ok());

        settings
    }
}
