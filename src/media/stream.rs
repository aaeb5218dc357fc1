use super::ext;
use serde::Serialize;

/// Container or protocol of the open file, resolved once from its extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "ext", rename_all = "lowercase")]
pub enum StreamKind {
    Flv,
    Hls,
    Native(String),
}

/// What the runtime must do before handing the url to its decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSetup {
    /// Force a demuxer instead of probing.
    pub demuxer: Option<&'static str>,
    /// Only send a referrer for same-origin requests.
    pub same_origin_referrer: bool,
    /// Playlist based adaptive stream; let the runtime pick variants.
    pub adaptive: bool,
    /// Keep the plain url as a fallback source if the adaptive loader fails.
    pub native_fallback: bool,
}

impl StreamKind {
    pub fn from_name(name: &str) -> Self {
        match ext(name) {
            "flv" => StreamKind::Flv,
            "m3u8" => StreamKind::Hls,
            other => StreamKind::Native(other.to_string()),
        }
    }

    pub fn setup(&self) -> StreamSetup {
        match self {
            StreamKind::Flv => StreamSetup {
                demuxer: Some("flv"),
                same_origin_referrer: true,
                ..StreamSetup::default()
            },
            StreamKind::Hls => StreamSetup {
                adaptive: true,
                native_fallback: true,
                ..StreamSetup::default()
            },
            StreamKind::Native(_) => StreamSetup::default(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StreamKind::Flv => "flv",
            StreamKind::Hls => "hls",
            StreamKind::Native(e) if e.is_empty() => "native",
            StreamKind::Native(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_kind() {
        assert_eq!(StreamKind::from_name("live.flv"), StreamKind::Flv);
        assert_eq!(StreamKind::from_name("index.m3u8"), StreamKind::Hls);
        assert_eq!(
            StreamKind::from_name("movie.mkv"),
            StreamKind::Native("mkv".to_string())
        );
        assert_eq!(StreamKind::from_name("bare"), StreamKind::Native(String::new()));
    }

    #[test]
    fn test_each_kind_carries_its_setup() {
        let flv = StreamKind::Flv.setup();
        assert_eq!(flv.demuxer, Some("flv"));
        assert!(flv.same_origin_referrer);
        assert!(!flv.adaptive);

        let hls = StreamKind::Hls.setup();
        assert!(hls.adaptive && hls.native_fallback);
        assert_eq!(hls.demuxer, None);

        assert_eq!(StreamKind::Native("mp4".into()).setup(), StreamSetup::default());
    }
}
