use crate::media::{LinkContext, MediaItem, Sidecars, StreamKind, StreamSetup, SubtitleFormat};
use crate::store::LinkConfig;
use serde::Serialize;

/// Everything the controller reads from the listing store, as one snapshot.
#[derive(Debug, Clone)]
pub struct PreviewInput {
    pub current: MediaItem,
    pub raw_url: String,
    pub objs: Vec<MediaItem>,
    pub related: Vec<MediaItem>,
    pub locale: String,
    pub autoplay: bool,
    pub links: LinkContext,
    pub proxy: LinkConfig,
}

/// Player UI language. Anything outside the allow-list falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlayerLang {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-cn")]
    ZhCn,
    #[serde(rename = "zh-tw")]
    ZhTw,
}

impl PlayerLang {
    pub fn from_locale(locale: &str) -> Self {
        match locale.to_lowercase().as_str() {
            "zh-cn" => PlayerLang::ZhCn,
            "zh-tw" => PlayerLang::ZhTw,
            _ => PlayerLang::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerLang::En => "en",
            PlayerLang::ZhCn => "zh-cn",
            PlayerLang::ZhTw => "zh-tw",
        }
    }
}

/// `zh_TW.UTF-8` -> `zh-tw`, `en_US` -> `en-us`.
pub fn normalize_locale(raw: &str) -> String {
    let base = raw.split(['.', '@']).next().unwrap_or_default();
    base.trim().replace('_', "-").to_lowercase()
}

/// Player feature switches. Values mirror the web pane this replaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub auto_size: bool,
    pub auto_mini: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub flip: bool,
    pub playback_rate: bool,
    pub aspect_ratio: bool,
    pub setting: bool,
    pub hotkey: bool,
    pub pip: bool,
    pub mutex: bool,
    pub fullscreen: bool,
    pub fullscreen_web: bool,
    pub subtitle_offset: bool,
    pub mini_progress_bar: bool,
    pub plays_inline: bool,
    pub lock: bool,
    pub fast_forward: bool,
    pub auto_playback: bool,
    pub auto_orientation: bool,
    pub airplay: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            auto_size: false,
            auto_mini: true,
            looping: false,
            flip: true,
            playback_rate: true,
            aspect_ratio: true,
            setting: true,
            hotkey: true,
            pip: true,
            mutex: true,
            fullscreen: true,
            fullscreen_web: true,
            subtitle_offset: true,
            mini_progress_bar: false,
            plays_inline: true,
            lock: true,
            fast_forward: true,
            auto_playback: true,
            auto_orientation: true,
            airplay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleOption {
    pub url: String,
    #[serde(rename = "type")]
    pub format: SubtitleFormat,
}

/// Overlay comment layer settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanmakuOptions {
    pub source: String,
    pub speed: f32,
    pub opacity: f32,
    pub font_size: u32,
    pub color: String,
    pub mode: u8,
    pub margin: (u32, String),
    pub anti_overlap: bool,
    pub use_worker: bool,
    pub synchronous_playback: bool,
    pub lock_time: u32,
    pub max_length: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub theme: String,
}

impl DanmakuOptions {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            speed: 5.0,
            opacity: 1.0,
            font_size: 25,
            color: "#FFFFFF".to_string(),
            mode: 0,
            margin: (0, "0%".to_string()),
            anti_overlap: false,
            use_worker: true,
            synchronous_playback: false,
            lock_time: 5,
            max_length: 100,
            min_width: 200,
            max_width: 400,
            theme: "dark".to_string(),
        }
    }
}

/// The configuration object handed to a player runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOptions {
    pub url: String,
    pub title: String,
    pub volume: f32,
    pub autoplay: bool,
    pub lang: PlayerLang,
    #[serde(rename = "type")]
    pub stream: StreamKind,
    pub stream_setup: StreamSetup,
    #[serde(flatten)]
    pub controls: Controls,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<SubtitleOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danmaku: Option<DanmakuOptions>,
}

impl PlayerOptions {
    pub fn build(input: &PreviewInput, sidecars: &Sidecars) -> Self {
        let stream = StreamKind::from_name(&input.current.name);
        let stream_setup = stream.setup();

        let subtitle = sidecars.subtitle.as_ref().map(|sub| SubtitleOption {
            url: input.proxy.proxy_link(&sub.item),
            format: sub.format,
        });
        let danmaku = sidecars
            .danmaku
            .as_ref()
            .map(|d| DanmakuOptions::new(input.proxy.proxy_link(d)));

        Self {
            url: input.raw_url.clone(),
            title: input.current.name.clone(),
            volume: 0.5,
            autoplay: input.autoplay,
            lang: PlayerLang::from_locale(&input.locale),
            stream,
            stream_setup,
            controls: Controls::default(),
            subtitle,
            danmaku,
        }
    }
}
