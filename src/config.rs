//! Application Configuration
//!
//! Defaults are compiled in; a build may override them through environment
//! variables read at compile time (there is no process environment in the
//! browser).

use std::str::FromStr;

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";
pub const DEFAULT_PLACEHOLDER_PASSWORD: &str = "password";
pub const DEFAULT_USER_KEY: &str = "user";
pub const DEFAULT_BOARD_KEY: &str = "kanbanBoard";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the identity endpoint (`/login` and `/register` are appended)
    pub api_base_url: String,
    /// Sent as the `x-api-key` header
    pub api_key: String,
    /// The endpoint wants a password; the app never asks for one
    pub placeholder_password: String,
    /// Storage slot holding the signed-in user
    pub user_storage_key: String,
    /// Storage slot holding the whole board
    pub board_storage_key: String,
    pub log_level: LevelFilter,
    /// Renumber the source list after a task leaves it (delete or cross-list move)
    pub renumber_after_removal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            placeholder_password: DEFAULT_PLACEHOLDER_PASSWORD.to_string(),
            user_storage_key: DEFAULT_USER_KEY.to_string(),
            board_storage_key: DEFAULT_BOARD_KEY.to_string(),
            log_level: LevelFilter::Info,
            renumber_after_removal: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `TASK_BOARD_*` variables present at build time
    pub fn from_build_env() -> Self {
        Self::with_overrides(|name| match name {
            "TASK_BOARD_API_BASE" => option_env!("TASK_BOARD_API_BASE"),
            "TASK_BOARD_API_KEY" => option_env!("TASK_BOARD_API_KEY"),
            "TASK_BOARD_LOG" => option_env!("TASK_BOARD_LOG"),
            "TASK_BOARD_RENUMBER" => option_env!("TASK_BOARD_RENUMBER"),
            _ => None,
        })
    }

    fn with_overrides(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("TASK_BOARD_API_BASE") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("TASK_BOARD_API_KEY") {
            config.api_key = key.to_string();
        }
        if let Some(level) = lookup("TASK_BOARD_LOG").and_then(|l| LevelFilter::from_str(l).ok()) {
            config.log_level = level;
        }
        if let Some(flag) = lookup("TASK_BOARD_RENUMBER") {
            config.renumber_after_removal = matches!(flag, "1" | "true" | "yes");
        }
        config
    }

    /// Full URL for an endpoint path such as `/login`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
