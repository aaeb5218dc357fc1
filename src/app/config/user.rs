use crate::app::keys::KeyConfig;
use crate::player::normalize_locale;
use serde::{Deserialize, Serialize};

/// User-editable configuration, stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_true")]
    pub video_autoplay: bool,
    /// Player UI language. Falls back to `LANG` when unset.
    #[serde(default)]
    pub locale: Option<String>,
    /// Base URL that serves the listed directory, used for deep links and sidecars.
    #[serde(default)]
    pub proxy_base: Option<String>,
    #[serde(default = "default_player_command")]
    pub player_command: String,
    /// Share of the terminal height given to the player panel.
    #[serde(default = "default_pane_height")]
    pub pane_height_percent: u16,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_true() -> bool {
    true
}

fn default_player_command() -> String {
    "mpv".to_string()
}

fn default_pane_height() -> u16 {
    60
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            video_autoplay: true,
            locale: None,
            proxy_base: None,
            player_command: default_player_command(),
            pane_height_percent: default_pane_height(),
            keys: KeyConfig::default(),
        }
    }
}

impl UserConfig {
    /// Locale for the player UI: config value, then `LC_ALL`/`LANG`, then `en`.
    pub fn resolved_locale(&self) -> String {
        if let Some(locale) = self.locale.as_deref().filter(|l| !l.trim().is_empty()) {
            return normalize_locale(locale);
        }
        ["LC_ALL", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
            .map(|v| normalize_locale(&v))
            .unwrap_or_else(|| "en".to_string())
    }

    pub fn pane_height(&self) -> u16 {
        self.pane_height_percent.clamp(20, 90)
    }
}
