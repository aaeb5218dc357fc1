use super::MediaItem;
use serde::Serialize;

const SUBTITLE_EXTS: [(&str, SubtitleFormat); 3] = [
    (".srt", SubtitleFormat::Srt),
    (".ass", SubtitleFormat::Ass),
    (".vtt", SubtitleFormat::Vtt),
];
const DANMAKU_EXTS: [&str; 1] = [".xml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Ass,
    Vtt,
}

impl SubtitleFormat {
    /// Matches a case-sensitive suffix; `Movie.SRT` is not a subtitle.
    pub fn from_name(name: &str) -> Option<Self> {
        SUBTITLE_EXTS
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, format)| *format)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Ass => "ass",
            SubtitleFormat::Vtt => "vtt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    pub item: MediaItem,
    pub format: SubtitleFormat,
}

/// Optional tracks found next to the open video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidecars {
    pub subtitle: Option<Subtitle>,
    pub danmaku: Option<MediaItem>,
}

impl Sidecars {
    /// Pick the first subtitle and the first overlay-comment file from
    /// `related`, in list order. Later matches are ignored.
    pub fn resolve(related: &[MediaItem], current: &MediaItem) -> Self {
        let candidates: Vec<&MediaItem> = related
            .iter()
            .filter(|obj| obj.name != current.name)
            .collect();

        let subtitle = candidates.iter().find_map(|obj| {
            SubtitleFormat::from_name(&obj.name).map(|format| Subtitle {
                item: (*obj).clone(),
                format,
            })
        });
        let danmaku = candidates
            .iter()
            .find(|obj| DANMAKU_EXTS.iter().any(|suffix| obj.name.ends_with(suffix)))
            .map(|obj| (*obj).clone());

        if let Some(sub) = &subtitle {
            tracing::debug!(subtitle = %sub.item.name, "subtitle track found");
        }
        if let Some(d) = &danmaku {
            tracing::debug!(danmaku = %d.name, "danmaku track found");
        }

        Self { subtitle, danmaku }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ObjType;

    fn items(names: &[&str]) -> Vec<MediaItem> {
        names
            .iter()
            .map(|n| MediaItem::new(*n, ObjType::from_name(n), format!("file:///{}", n)))
            .collect()
    }

    fn current() -> MediaItem {
        MediaItem::new("a.mp4", ObjType::Video, "file:///a.mp4")
    }

    #[test]
    fn test_first_match_wins() {
        let related = items(&["a.srt", "b.ass", "c.xml"]);
        let found = Sidecars::resolve(&related, &current());

        let sub = found.subtitle.unwrap();
        assert_eq!(sub.item.name, "a.srt");
        assert_eq!(sub.format, SubtitleFormat::Srt);
        assert_eq!(found.danmaku.unwrap().name, "c.xml");
    }

    #[test]
    fn test_no_sidecars() {
        let found = Sidecars::resolve(&items(&["notes.txt"]), &current());
        assert!(found.subtitle.is_none());
        assert!(found.danmaku.is_none());
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let found = Sidecars::resolve(&items(&["a.SRT", "a.XML", "a.vtt"]), &current());
        assert_eq!(found.subtitle.unwrap().format, SubtitleFormat::Vtt);
        assert!(found.danmaku.is_none());
    }

    #[test]
    fn test_current_item_is_never_its_own_sidecar() {
        let playing = MediaItem::new("feed.xml", ObjType::Text, "file:///feed.xml");
        let found = Sidecars::resolve(&items(&["feed.xml"]), &playing);
        assert!(found.danmaku.is_none());
    }
}
