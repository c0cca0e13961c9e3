pub mod catalog;
pub mod cursor;
pub mod media_kind;
pub mod playback_state;
pub mod settings;
