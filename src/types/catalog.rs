use std::path::{Path, PathBuf};

use crate::error::MediaError;
use crate::ops::scan::list_media_files;
use crate::types::media_kind::MediaKind;

/// The videos and images found at startup. Never rescanned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaCatalog {
    videos: Vec<PathBuf>,
    images: Vec<PathBuf>,
}

impl MediaCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scans both directories. Both must exist before either is listed, so a
    /// single missing directory leaves the whole catalog unloaded.
    pub fn load(video_dir: &Path, image_dir: &Path) -> Result<Self, MediaError> {
        for dir in [video_dir, image_dir] {
            if !dir.is_dir() {
                return Err(MediaError::DirectoryMissing(dir.to_path_buf()));
            }
        }
        let videos = list_media_files(video_dir, MediaKind::Video)?;
        let images = list_media_files(image_dir, MediaKind::Image)?;
        Ok(MediaCatalog { videos, images })
    }

    /// Like [`MediaCatalog::load`], but a failure is logged and yields an
    /// empty catalog. Unresolved directories are treated as missing.
    pub fn load_or_empty(video_dir: Option<&Path>, image_dir: Option<&Path>) -> Self {
        let (Some(video_dir), Some(image_dir)) = (video_dir, image_dir) else {
            log::warn!("media directories are not configured; nothing will be shown");
            return Self::empty();
        };
        match Self::load(video_dir, image_dir) {
            Ok(catalog) => {
                log::info!(
                    "loaded {} video(s) and {} image(s)",
                    catalog.videos().len(),
                    catalog.images().len()
                );
                catalog
            }
            Err(e) => {
                log::warn!("{e}; continuing with an empty catalog");
                Self::empty()
            }
        }
    }

    pub fn videos(&self) -> &[PathBuf] {
        &self.videos
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn into_parts(self) -> (Vec<PathBuf>, Vec<PathBuf>) {
        (self.videos, self.images)
    }
}
