pub mod link;
pub mod playlist;
pub mod sidecar;
pub mod stream;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use link::{external_links, format_link, ExternalLink, LinkContext, PLAYERS};
pub use playlist::Playlist;
pub use sidecar::{Sidecars, Subtitle, SubtitleFormat};
pub use stream::{StreamKind, StreamSetup};

const VIDEO_EXTS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "rmvb", "webm", "flv", "m3u8", "wmv", "ts", "m4v", "3gp",
];
const AUDIO_EXTS: &[&str] = &["mp3", "flac", "ogg", "m4a", "wav", "opus", "aac", "ape", "alac"];
const TEXT_EXTS: &[&str] = &[
    "txt", "htm", "html", "xml", "java", "properties", "sql", "js", "md", "json", "conf", "ini",
    "vue", "php", "py", "bat", "gitignore", "yml", "go", "sh", "c", "cpp", "h", "hpp", "tsx",
    "vtt", "srt", "ass", "rs", "lrc", "toml",
];
const IMAGE_EXTS: &[&str] = &[
    "jpg", "tif", "jpeg", "png", "gif", "bmp", "svg", "ico", "swf", "webp",
];

/// Listing entry kind 🎞️
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjType {
    #[default]
    Unknown,
    Folder,
    Video,
    Audio,
    Text,
    Image,
}

impl ObjType {
    /// Classify a file by its lower-cased extension.
    pub fn from_name(name: &str) -> Self {
        let e = ext(name).to_ascii_lowercase();
        let e = e.as_str();
        if VIDEO_EXTS.contains(&e) {
            ObjType::Video
        } else if AUDIO_EXTS.contains(&e) {
            ObjType::Audio
        } else if TEXT_EXTS.contains(&e) {
            ObjType::Text
        } else if IMAGE_EXTS.contains(&e) {
            ObjType::Image
        } else {
            ObjType::Unknown
        }
    }
}

/// One entry of a directory listing. Snapshots are owned by the store
/// and handed out by reference; nothing here mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    pub kind: ObjType,
    pub raw_url: String,
    pub path: PathBuf,
    pub size: u64,
}

impl MediaItem {
    pub fn new(name: impl Into<String>, kind: ObjType, raw_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            raw_url: raw_url.into(),
            path: PathBuf::new(),
            size: 0,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == ObjType::Video
    }
}

/// Extension after the last dot, without the dot. Empty when there is none.
pub fn ext(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// File name with its last extension removed.
pub fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(ObjType::from_name("movie.MKV"), ObjType::Video);
        assert_eq!(ObjType::from_name("live.m3u8"), ObjType::Video);
        assert_eq!(ObjType::from_name("song.flac"), ObjType::Audio);
        assert_eq!(ObjType::from_name("movie.srt"), ObjType::Text);
        assert_eq!(ObjType::from_name("cover.webp"), ObjType::Image);
        assert_eq!(ObjType::from_name("README"), ObjType::Unknown);
    }

    #[test]
    fn test_ext_and_base_name() {
        assert_eq!(ext("a.b.mp4"), "mp4");
        assert_eq!(ext("noext"), "");
        assert_eq!(base_name("a.b.mp4"), "a.b");
        assert_eq!(base_name("noext"), "noext");
    }
}
