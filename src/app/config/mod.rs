use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::UserConfig;

pub struct AppConfig; // Namespace only

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidpane");

        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }

        dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Load `config.toml`, writing the defaults on first run. A broken file is
    /// reported and replaced by defaults for this session only.
    pub fn load() -> UserConfig {
        let path = Self::get_config_path();

        if !path.exists() {
            let config = UserConfig::default();
            if let Err(e) = Self::save_to(&path, &config) {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "could not write default config"
                );
            }
            return config;
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "ignoring invalid config");
                UserConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<UserConfig> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(path: &Path, config: &UserConfig) -> anyhow::Result<()> {
        fs::write(path, Self::to_toml(config)?)?;
        Ok(())
    }

    pub fn to_toml(config: &UserConfig) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "video_autoplay = false\nlocale = \"zh_CN.UTF-8\"\n[keys]\nquit = \"x\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.video_autoplay);
        assert_eq!(config.player_command, "mpv");
        assert_eq!(config.pane_height_percent, 60);
        assert_eq!(config.keys.quit, "x");
        assert_eq!(config.keys.nav_down, "j");
        assert_eq!(config.resolved_locale(), "zh-cn");
    }

    #[test]
    fn test_round_trip_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        AppConfig::save_to(&path, &UserConfig::default()).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), UserConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "video_autoplay = \"sometimes\"").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(crate::error::PreviewError::Config(_))
        ));
    }

    #[test]
    fn test_pane_height_is_clamped() {
        let config = UserConfig {
            pane_height_percent: 100,
            ..UserConfig::default()
        };
        assert_eq!(config.pane_height(), 90);
    }
}
