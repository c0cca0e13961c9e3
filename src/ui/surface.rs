use std::path::Path;

use crate::types::media_kind::MediaKind;

/// What the sequencer needs from whatever actually draws and plays media.
///
/// The display region has one layer per [`MediaKind`]; the sequencer keeps
/// exactly one of them visible.
pub trait PresentationSurface {
    /// Load `path` into the player and start playing from the beginning.
    fn start_playback(&mut self, path: &Path);
    fn pause(&mut self);
    /// Continue the currently loaded video from where it was paused.
    fn resume(&mut self);
    fn show_surface(&mut self, kind: MediaKind);
    fn hide_surface(&mut self, kind: MediaKind);
    fn set_image(&mut self, path: &Path);
    fn clear_image(&mut self);
    /// Returns `true` once per clip that reached its natural end since the
    /// last call.
    fn take_completion(&mut self) -> bool;
}
