use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{APP_NAME, DEFAULT_IMAGE_SUBDIR, DEFAULT_VIDEO_SUBDIR, SETTINGS_FILE_NAME};
use crate::error::MediaError;
use crate::types::media_kind::MediaKind;

/// Asks the user for a media directory when none is configured.
pub trait DirectoryPrompt {
    /// `None` when the user cancels.
    fn pick_directory(&mut self, kind: MediaKind) -> Option<PathBuf>;
}

/// Native folder picker.
pub struct RfdPrompt;

impl DirectoryPrompt for RfdPrompt {
    fn pick_directory(&mut self, kind: MediaKind) -> Option<PathBuf> {
        let title = match kind {
            MediaKind::Video => "Select Video Directory",
            MediaKind::Image => "Select Image Directory",
        };
        rfd::FileDialog::new().set_title(title).pick_folder()
    }
}

/// Persisted media directory choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaSettings {
    #[serde(default)]
    pub video_dir: Option<PathBuf>,
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
}

impl MediaSettings {
    /// `<config dir>/vidslide/settings.json`
    pub fn default_path() -> Result<PathBuf, MediaError> {
        let base = dirs::config_dir().ok_or(MediaError::NoConfigDir)?;
        Ok(base.join(APP_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load settings from a JSON file. A missing file is an empty config.
    pub fn load_from_file(path: &Path) -> Result<Self, MediaError> {
        match File::open(path) {
            Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(MediaError::io(path, e)),
        }
    }

    /// Save the settings as pretty JSON, creating the parent directory.
    pub fn save_to_file(&self, path: &Path) -> Result<(), MediaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| MediaError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path).map_err(|e| MediaError::io(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| MediaError::io(path, e))
    }

    pub fn dir(&self, kind: MediaKind) -> Option<&Path> {
        let dir = match kind {
            MediaKind::Video => self.video_dir.as_deref(),
            MediaKind::Image => self.image_dir.as_deref(),
        };
        dir.filter(|d| !d.as_os_str().is_empty())
    }

    fn set_dir(&mut self, kind: MediaKind, dir: PathBuf) {
        match kind {
            MediaKind::Video => self.video_dir = Some(dir),
            MediaKind::Image => self.image_dir = Some(dir),
        }
    }

    /// Resolves both directories once at startup.
    ///
    /// Per kind: the stored value wins; otherwise the default under `home`
    /// if it exists; otherwise the user is prompted and the answer is written
    /// back to `store`. Defaults are not persisted. Storage problems are
    /// logged and never fatal.
    pub fn resolve(
        store: Option<&Path>,
        home: Option<&Path>,
        prompt: &mut impl DirectoryPrompt,
    ) -> Self {
        let mut stored = match store.map(Self::load_from_file) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("ignoring unreadable settings: {e}");
                Self::default()
            }
            None => Self::default(),
        };
        let mut resolved = stored.clone();
        let mut prompted = false;

        for kind in [MediaKind::Video, MediaKind::Image] {
            if resolved.dir(kind).is_some() {
                continue;
            }
            let fallback = home
                .map(|h| h.join(default_subdir(kind)))
                .filter(|d| d.is_dir());
            if let Some(dir) = fallback {
                log::info!("using default {} directory {}", kind.label(), dir.display());
                resolved.set_dir(kind, dir);
                continue;
            }
            match prompt.pick_directory(kind) {
                Some(dir) => {
                    log::info!("selected {} directory {}", kind.label(), dir.display());
                    stored.set_dir(kind, dir.clone());
                    resolved.set_dir(kind, dir);
                    prompted = true;
                }
                None => log::warn!("no {} directory selected", kind.label()),
            }
        }

        if prompted {
            if let Some(path) = store {
                if let Err(e) = stored.save_to_file(path) {
                    log::warn!("could not save settings: {e}");
                }
            }
        }
        resolved
    }
}

fn default_subdir(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => DEFAULT_VIDEO_SUBDIR,
        MediaKind::Image => DEFAULT_IMAGE_SUBDIR,
    }
}
