//! Directory listing snapshot the preview reads from.

use crate::error::{PreviewError, Result};
use crate::media::link::encode_component;
use crate::media::{base_name, LinkContext, MediaItem, ObjType};
use crate::player::PreviewInput;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How links to listed files are built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkConfig {
    /// e.g. `http://nas:5244/p/movies`. Without it links are plain `file://` URLs.
    pub proxy_base: Option<String>,
}

impl LinkConfig {
    pub fn proxy_link(&self, item: &MediaItem) -> String {
        match self.proxy_base.as_deref() {
            Some(base) if !base.is_empty() => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                encode_component(&item.name)
            ),
            _ => item.raw_url.clone(),
        }
    }
}

/// One directory's entries plus the item currently open.
#[derive(Debug, Clone)]
pub struct ObjStore {
    dir: PathBuf,
    objs: Vec<MediaItem>,
    current: usize,
    links: LinkConfig,
}

impl ObjStore {
    /// Open a file (its directory becomes the listing) or a directory
    /// (its first video is opened).
    pub fn open(path: &Path, links: LinkConfig) -> Result<Self> {
        let path = path.canonicalize()?;

        let (dir, wanted) = if path.is_dir() {
            (path.clone(), None)
        } else {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("/"));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            (dir, Some(name))
        };

        let objs = scan_dir(&dir)?;
        let current = match wanted {
            Some(name) => objs
                .iter()
                .position(|o| o.name == name)
                .ok_or(PreviewError::NotFound(name))?,
            None => objs
                .iter()
                .position(MediaItem::is_video)
                .ok_or_else(|| PreviewError::EmptyListing(dir.clone()))?,
        };

        tracing::info!(dir = %dir.display(), entries = objs.len(), "listing loaded");
        Ok(Self {
            dir,
            objs,
            current,
            links,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn objs(&self) -> &[MediaItem] {
        &self.objs
    }

    pub fn current(&self) -> &MediaItem {
        &self.objs[self.current]
    }

    pub fn links(&self) -> &LinkConfig {
        &self.links
    }

    /// Switch the open item by name.
    pub fn select(&mut self, name: &str) -> Result<&MediaItem> {
        let idx = self
            .objs
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| PreviewError::NotFound(name.to_string()))?;
        self.current = idx;
        Ok(&self.objs[idx])
    }

    /// Files sharing the open item's base name, e.g. `movie.srt` for `movie.mkv`.
    pub fn related(&self) -> Vec<MediaItem> {
        let current = self.current();
        let stem = base_name(&current.name);
        self.objs
            .iter()
            .filter(|o| o.kind != ObjType::Folder)
            .filter(|o| o.name != current.name && o.name.starts_with(stem))
            .cloned()
            .collect()
    }

    pub fn raw_url(&self) -> &str {
        &self.current().raw_url
    }

    pub fn link_context(&self) -> LinkContext {
        let current = self.current();
        LinkContext {
            raw_url: current.raw_url.clone(),
            name: current.name.clone(),
            d_url: self.links.proxy_link(current),
        }
    }

    pub fn preview_input(&self, locale: &str, autoplay: bool) -> PreviewInput {
        PreviewInput {
            current: self.current().clone(),
            raw_url: self.raw_url().to_string(),
            objs: self.objs.clone(),
            related: self.related(),
            locale: locale.to_string(),
            autoplay,
            links: self.link_context(),
            proxy: self.links.clone(),
        }
    }
}

/// Direct children of `dir`, sorted by name, dot-files skipped.
pub fn scan_dir(dir: &Path) -> Result<Vec<MediaItem>> {
    let mut objs = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| PreviewError::Listing {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || name.trim().is_empty() {
            continue;
        }

        let is_dir = entry.file_type().is_dir();
        let kind = if is_dir {
            ObjType::Folder
        } else {
            ObjType::from_name(&name)
        };
        let size = if is_dir {
            0
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        };

        objs.push(MediaItem {
            raw_url: file_url(entry.path()),
            path: entry.path().to_path_buf(),
            name,
            kind,
            size,
        });
    }

    Ok(objs)
}

fn file_url(path: &Path) -> String {
    url::Url::from_file_path(path)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn listing(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for n in names {
            fs::write(dir.path().join(n), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn test_open_file_lists_siblings() {
        let dir = listing(&["b.mkv", "a.mp4", ".hidden.mp4", "a.srt"]);
        fs::create_dir(dir.path().join("extras")).unwrap();

        let store = ObjStore::open(&dir.path().join("b.mkv"), LinkConfig::default()).unwrap();
        let names: Vec<_> = store.objs().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["a.mp4", "a.srt", "b.mkv", "extras"]);
        assert_eq!(store.current().name, "b.mkv");
        assert_eq!(store.objs()[3].kind, ObjType::Folder);
        assert!(store.raw_url().starts_with("file:///"));
        assert!(store.raw_url().ends_with("/b.mkv"));
    }

    #[test]
    fn test_open_dir_picks_first_video() {
        let dir = listing(&["notes.txt", "z.webm", "m.mp4"]);
        let store = ObjStore::open(dir.path(), LinkConfig::default()).unwrap();
        assert_eq!(store.current().name, "m.mp4");
    }

    #[test]
    fn test_open_dir_without_videos_fails() {
        let dir = listing(&["notes.txt"]);
        let err = ObjStore::open(dir.path(), LinkConfig::default()).unwrap_err();
        assert!(matches!(err, PreviewError::EmptyListing(_)));
    }

    #[test]
    fn test_related_shares_base_name() {
        let dir = listing(&["ep1.mkv", "ep1.srt", "ep1.xml", "ep2.mkv", "ep2.srt"]);
        let mut store = ObjStore::open(&dir.path().join("ep1.mkv"), LinkConfig::default()).unwrap();

        let related: Vec<_> = store.related().into_iter().map(|o| o.name).collect();
        assert_eq!(related, ["ep1.srt", "ep1.xml"]);

        store.select("ep2.mkv").unwrap();
        let related: Vec<_> = store.related().into_iter().map(|o| o.name).collect();
        assert_eq!(related, ["ep2.srt"]);
        assert!(matches!(store.select("nope.mkv"), Err(PreviewError::NotFound(_))));
    }

    #[test]
    fn test_proxy_link() {
        let item = MediaItem::new("my film.mkv", ObjType::Video, "file:///v/my%20film.mkv");
        let plain = LinkConfig::default();
        assert_eq!(plain.proxy_link(&item), "file:///v/my%20film.mkv");

        let proxied = LinkConfig {
            proxy_base: Some("http://nas:5244/p/v/".to_string()),
        };
        assert_eq!(proxied.proxy_link(&item), "http://nas:5244/p/v/my%20film.mkv");
    }

    #[test]
    fn test_preview_input_snapshot() {
        let dir = listing(&["a.mp4", "a.vtt"]);
        let store = ObjStore::open(
            &dir.path().join("a.mp4"),
            LinkConfig {
                proxy_base: Some("http://h/p".to_string()),
            },
        )
        .unwrap();
        let input = store.preview_input("zh-CN", false);
        assert_eq!(input.current.name, "a.mp4");
        assert_eq!(input.related.len(), 1);
        assert_eq!(input.links.d_url, "http://h/p/a.mp4");
        assert_eq!(input.objs.len(), 2);
        assert!(!input.autoplay);
    }
}
