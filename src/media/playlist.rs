use super::MediaItem;

/// Ordered videos the pane can step through.
///
/// Never empty: a listing without videos degenerates to the open item alone,
/// which makes "next" a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    items: Vec<MediaItem>,
}

impl Playlist {
    pub fn from_listing(objs: &[MediaItem], current: &MediaItem) -> Self {
        let items: Vec<MediaItem> = objs.iter().filter(|obj| obj.is_video()).cloned().collect();
        if items.is_empty() {
            return Self {
                items: vec![current.clone()],
            };
        }
        Self { items }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }

    /// First position whose name equals `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Item following `name`; `None` when `name` is last or not listed.
    pub fn next_after(&self, name: &str) -> Option<&MediaItem> {
        let idx = self.position_of(name)?;
        self.items.get(idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ObjType;

    fn listing(names: &[&str]) -> Vec<MediaItem> {
        names
            .iter()
            .map(|n| MediaItem::new(*n, ObjType::from_name(n), ""))
            .collect()
    }

    #[test]
    fn test_keeps_only_videos_in_order() {
        let objs = listing(&["a.mp4", "a.srt", "b.mkv", "cover.jpg", "c.flv"]);
        let playlist = Playlist::from_listing(&objs, &objs[0]);
        let names: Vec<_> = playlist.names().collect();
        assert_eq!(names, ["a.mp4", "b.mkv", "c.flv"]);
    }

    #[test]
    fn test_next_after_middle_and_last() {
        let objs = listing(&["a.mp4", "b.mkv", "c.flv"]);
        let playlist = Playlist::from_listing(&objs, &objs[0]);
        assert_eq!(playlist.next_after("a.mp4").unwrap().name, "b.mkv");
        assert_eq!(playlist.next_after("b.mkv").unwrap().name, "c.flv");
        assert!(playlist.next_after("c.flv").is_none());
        assert!(playlist.next_after("missing.mp4").is_none());
    }

    #[test]
    fn test_no_videos_degenerates_to_current() {
        let objs = listing(&["notes.txt", "song.mp3"]);
        let current = MediaItem::new("odd.bin", ObjType::Unknown, "");
        let playlist = Playlist::from_listing(&objs, &current);
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.items()[0], current);
        assert!(playlist.next_after("odd.bin").is_none());
    }

    #[test]
    fn test_duplicate_names_advance_from_first() {
        let objs = listing(&["a.mp4", "b.mp4", "a.mp4", "c.mp4"]);
        let playlist = Playlist::from_listing(&objs, &objs[0]);
        assert_eq!(playlist.position_of("a.mp4"), Some(0));
        assert_eq!(playlist.next_after("a.mp4").unwrap().name, "b.mp4");
    }
}
