use crate::app::config::UserConfig;
use clap::Parser;
use std::path::PathBuf;

/// vidpane - preview a folder's videos in mpv, hand off to native players 🎬
#[derive(Parser, Debug)]
#[command(name = "vidpane", version, about)]
pub struct Args {
    /// Video file to open, or a directory (its first video is opened)
    #[arg(required_unless_present = "generate_config")]
    pub path: Option<PathBuf>,

    /// Print player options and deep links as JSON, then exit
    #[arg(long)]
    pub dry_run: bool,

    /// Player UI language (en, zh-cn, zh-tw)
    #[arg(long)]
    pub locale: Option<String>,

    /// Start playing immediately
    #[arg(long, overrides_with = "no_autoplay")]
    pub autoplay: bool,

    /// Open paused
    #[arg(long, overrides_with = "autoplay")]
    pub no_autoplay: bool,

    /// Player binary (default: mpv)
    #[arg(long)]
    pub player: Option<String>,

    /// Base URL serving the listed directory, used in deep links
    #[arg(long)]
    pub proxy_base: Option<String>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Command-line flags win over `config.toml`.
    pub fn apply(&self, config: &mut UserConfig) {
        if self.autoplay {
            config.video_autoplay = true;
        } else if self.no_autoplay {
            config.video_autoplay = false;
        }
        if let Some(locale) = &self.locale {
            config.locale = Some(locale.clone());
        }
        if let Some(player) = &self.player {
            config.player_command = player.clone();
        }
        if let Some(base) = &self.proxy_base {
            config.proxy_base = Some(base.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "vidpane",
            "movie.mkv",
            "--no-autoplay",
            "--locale",
            "ZH-TW",
            "--player",
            "/opt/mpv",
        ]);
        let mut config = UserConfig::default();
        args.apply(&mut config);

        assert_eq!(args.path.as_deref(), Some(std::path::Path::new("movie.mkv")));
        assert!(!config.video_autoplay);
        assert_eq!(config.locale.as_deref(), Some("ZH-TW"));
        assert_eq!(config.player_command, "/opt/mpv");
        assert_eq!(config.proxy_base, None);
    }

    #[test]
    fn test_path_optional_for_generate_config() {
        let args = Args::parse_from(["vidpane", "--generate-config"]);
        assert!(args.generate_config);
        assert!(Args::try_parse_from(["vidpane"]).is_err());
    }
}
