use std::path::Path;

use crate::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// The two kinds of media the app rotates through. Also names the two
/// layers of the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => VIDEO_EXTENSIONS,
            MediaKind::Image => IMAGE_EXTENSIONS,
        }
    }

    /// Whether the file name's extension is on this kind's allow-list.
    /// Case-insensitive, so `CLIP.MP4` counts as a video.
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}
