//! Settings for the Gitea todo widget as they appear under `[gitea]` in
//! `config.toml`.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_PAGE_SIZE;

/// Largest page the Gitea search endpoint serves.
pub const MAX_PAGE_SIZE: u32 = 50;

fn default_title() -> String {
    "Gitea Issues".to_string()
}

fn default_true() -> bool {
    true
}

fn default_domain() -> String {
    "https://example.com".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_number_of_todos() -> u32 {
    10
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Resolved widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiteaSettings {
    /// Panel title shown before the first render.
    #[serde(default = "default_title")]
    pub title: String,

    /// Disabled widgets never fetch.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether the panel can take keyboard focus.
    #[serde(default = "default_true")]
    pub focusable: bool,

    /// Base URL of the Gitea instance.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Personal access token. Usually supplied through the environment or
    /// the OS keyring rather than the file.
    #[serde(default)]
    pub api_key: String,

    /// Records requested per refresh.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Accepted for compatibility; the list length is governed by
    /// `page_size`.
    #[serde(default = "default_number_of_todos")]
    pub number_of_todos: u32,

    /// Accepted but not used by the row renderer.
    #[serde(default = "default_true")]
    pub show_project: bool,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Timeout applied to every request to the tracker.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub colors: ColorSettings,
}

impl Default for GiteaSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            enabled: true,
            focusable: true,
            domain: default_domain(),
            api_key: String::new(),
            page_size: default_page_size(),
            number_of_todos: default_number_of_todos(),
            show_project: true,
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            colors: ColorSettings::default(),
        }
    }
}

/// Row color theme. Values are color names or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub highlight_fore: String,
    pub highlight_back: String,
    pub row_even: String,
    /// Background of even rows; `-` leaves the terminal default.
    pub row_even_back: String,
    pub row_odd: String,
    pub row_odd_back: String,
    /// Color of the repository label on every row.
    pub accent: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            highlight_fore: "black".to_string(),
            highlight_back: "orange".to_string(),
            row_even: "white".to_string(),
            row_even_back: "-".to_string(),
            row_odd: "lightblue".to_string(),
            row_odd_back: "-".to_string(),
            accent: "mediumpurple".to_string(),
        }
    }
}
