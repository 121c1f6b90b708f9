use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the knowledge base service, including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value sent in the X-API-Key header for knowledge base calls
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// How the listing estimates the total number of articles.
///
/// The list endpoint returns a bare array with no total, so any page count
/// shown to the user is a guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TotalEstimate {
    /// Total equals the number of items on the last page received
    #[default]
    PageSize,
    /// Items before the current page plus the items received, and one more
    /// page is assumed to exist whenever a full page comes back
    Lookahead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Articles per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
    /// Page-number buttons shown on each side of the current page
    #[serde(default = "default_page_window")]
    pub page_window: u32,
    #[serde(default)]
    pub total_estimate: TotalEstimate,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            page_window: default_page_window(),
            total_estimate: TotalEstimate::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Seconds before a success or error banner disappears
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            status_timeout_secs: default_status_timeout(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub fg0: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    /// Color of "You:" transcript entries
    pub user: Option<String>,
    /// Color of "Bot:" transcript entries
    pub bot: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "G" (Shift+g), "<CR>", "<Esc>", "<Tab>", "<F1>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_help")]
    pub help: String,

    // Navigation between pages
    #[serde(default = "default_key_next_tab")]
    pub next_tab: String,
    #[serde(default = "default_key_chat_tab")]
    pub chat_tab: String,
    #[serde(default = "default_key_knowledge_tab")]
    pub knowledge_tab: String,

    /// Focus the chat input
    #[serde(default = "default_key_focus_input")]
    pub focus_input: String,

    // Rows / transcript
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    // Pagination
    #[serde(default = "default_key_prev_page")]
    pub prev_page: String,
    #[serde(default = "default_key_next_page")]
    pub next_page: String,

    // Knowledge base actions
    #[serde(default = "default_key_search")]
    pub search: String,
    #[serde(default = "default_key_add_article")]
    pub add_article: String,
    #[serde(default = "default_key_delete_article")]
    pub delete_article: String,
    #[serde(default = "default_key_refresh")]
    pub refresh: String,
    #[serde(default = "default_key_open_browser")]
    pub open_browser: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            help: default_key_help(),
            next_tab: default_key_next_tab(),
            chat_tab: default_key_chat_tab(),
            knowledge_tab: default_key_knowledge_tab(),
            focus_input: default_key_focus_input(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            prev_page: default_key_prev_page(),
            next_page: default_key_next_page(),
            search: default_key_search(),
            add_article: default_key_add_article(),
            delete_article: default_key_delete_article(),
            refresh: default_key_refresh(),
            open_browser: default_key_open_browser(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_help() -> String { "?".to_string() }
fn default_key_next_tab() -> String { "<Tab>".to_string() }
fn default_key_chat_tab() -> String { "<F1>".to_string() }
fn default_key_knowledge_tab() -> String { "<F2>".to_string() }
fn default_key_focus_input() -> String { "i".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_prev_page() -> String { "h".to_string() }
fn default_key_next_page() -> String { "l".to_string() }
fn default_key_search() -> String { "/".to_string() }
fn default_key_add_article() -> String { "a".to_string() }
fn default_key_delete_article() -> String { "d".to_string() }
fn default_key_refresh() -> String { "r".to_string() }
fn default_key_open_browser() -> String { "o".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kbdesk")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_api_key() -> String {
    "test".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_items_per_page() -> u32 {
    10
}

fn default_page_window() -> u32 {
    2
}

fn default_tick_rate() -> u64 {
    100
}

fn default_status_timeout() -> u64 {
    5
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    fn validate(&self) -> crate::Result<()> {
        if self.listing.items_per_page == 0 {
            return Err(crate::Error::Config(
                "listing.items_per_page must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| crate::Error::Config(format!("api.base_url: {}", e)))?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/kbdesk/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kbdesk")
            .join("config.toml")
    }

    /// Get the TUI log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("kbdesk.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
