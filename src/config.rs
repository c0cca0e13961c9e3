use std::time::Duration;

/// Video file extensions picked up by the scanner (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["mpg", "mp4", "avi", "mkv"];
/// Image file extensions picked up by the scanner (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// How long a video plays before the interlude starts.
pub const VIDEO_DWELL: Duration = Duration::from_millis(10_000);
/// How long each of the two interlude images stays on screen.
pub const IMAGE_DWELL: Duration = Duration::from_millis(2_500);

pub const APP_NAME: &str = "vidslide";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Fallback directories, relative to the user's home.
pub const DEFAULT_VIDEO_SUBDIR: &str = "VideoImage/Videos";
pub const DEFAULT_IMAGE_SUBDIR: &str = "Downloads/images";

pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 400.0];

/// Decoded slideshow images kept as GPU textures.
pub const IMAGE_CACHE_SIZE: usize = 8;
