mod config;
mod error;
mod ops;
mod renderer;
mod sequencer;
mod types;
mod ui;

use eframe::egui;

use crate::config::{APP_NAME, MIN_WINDOW_SIZE};
use crate::renderer::gst_player::GstVideoPlayer;
use crate::sequencer::Sequencer;
use crate::types::catalog::MediaCatalog;
use crate::types::media_kind::MediaKind;
use crate::types::settings::{MediaSettings, RfdPrompt};
use crate::ui::app::VidslideApp;
use crate::ui::display::DisplaySurface;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = match MediaSettings::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("{e}; directory choices will not be remembered");
            None
        }
    };
    let home = dirs::home_dir();
    let settings = MediaSettings::resolve(store.as_deref(), home.as_deref(), &mut RfdPrompt);

    let catalog = MediaCatalog::load_or_empty(
        settings.dir(MediaKind::Video),
        settings.dir(MediaKind::Image),
    );
    let sequencer = Sequencer::from_catalog(catalog);

    let player = match GstVideoPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            log::error!("{e}; videos will not play");
            None
        }
    };
    let app = VidslideApp::new(sequencer, DisplaySurface::new(player));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(MIN_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
