use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
        }
    }
}

// On-disk shape: a `[theme]` table
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Read `theme.toml` from `dir`, creating it with the default palette if missing.
pub fn load_theme(dir: &Path) -> Theme {
    let path = dir.join("theme.toml");

    if !path.exists() {
        let theme = Theme::default();
        let wrapper = ThemeFile {
            theme: theme.clone(),
        };
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(&path, toml_str);
        }
        return theme;
    }

    let parsed = fs::read_to_string(&path)
        .ok()
        .and_then(|content| toml::from_str::<ThemeFile>(&content).ok());
    match parsed {
        Some(wrapper) => wrapper.theme,
        None => {
            tracing::warn!(path = %path.display(), "invalid theme file, using defaults");
            Theme::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_created_then_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let first = load_theme(dir.path());
        assert!(dir.path().join("theme.toml").exists());
        assert_eq!(load_theme(dir.path()), first);
    }
}
