use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// A configured media directory does not exist
    #[error("media directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read directory entry: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("could not determine the system config directory")]
    NoConfigDir,

    /// GStreamer element creation or state change failed
    #[error("player error: {0}")]
    Player(String),
}

impl MediaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MediaError::Io {
            path: path.into(),
            source,
        }
    }
}
