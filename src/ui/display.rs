use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use eframe::egui;
use lru::LruCache;

use crate::config::IMAGE_CACHE_SIZE;
use crate::renderer::gst_player::{GstVideoPlayer, VideoFrame};
use crate::types::media_kind::MediaKind;
use crate::ui::surface::PresentationSurface;

const IMAGE_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(IMAGE_CACHE_SIZE) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// The single display region: a video layer and an image layer stacked in
/// the same rect. Both are laid out against the region every frame, so the
/// video follows the window when it is resized.
pub struct DisplaySurface {
    player: Option<GstVideoPlayer>,
    video_visible: bool,
    image_visible: bool,
    image: Option<PathBuf>,
    video_texture: Option<egui::TextureHandle>,
    // None records a file that failed to decode so it is not retried every frame
    image_cache: LruCache<PathBuf, Option<egui::TextureHandle>>,
}

impl DisplaySurface {
    /// Without a player, video requests are ignored and only images show.
    pub fn new(player: Option<GstVideoPlayer>) -> Self {
        Self {
            player,
            video_visible: false,
            image_visible: false,
            image: None,
            video_texture: None,
            image_cache: LruCache::new(IMAGE_CACHE_CAPACITY),
        }
    }

    pub fn is_visible(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Video => self.video_visible,
            MediaKind::Image => self.image_visible,
        }
    }

    /// Pump the player: drain its bus and pick up the latest frame.
    pub fn update(&mut self, ctx: &egui::Context) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        player.poll();
        if let Some(frame) = player.pull_frame() {
            upload_frame(ctx, &mut self.video_texture, &frame);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let region = ui.max_rect();
        let painter = ui.painter_at(region);
        painter.rect_filled(region, 0.0, egui::Color32::BLACK);

        if self.video_visible {
            if let Some(texture) = &self.video_texture {
                let target = fit_rect(texture.size_vec2(), region);
                painter.image(texture.id(), target, full_uv(), egui::Color32::WHITE);
            }
        }

        if self.image_visible {
            if let Some(path) = self.image.clone() {
                let ctx = ui.ctx().clone();
                let texture = self
                    .image_cache
                    .get_or_insert(path.clone(), || load_image_texture(&ctx, &path));
                if let Some(texture) = texture {
                    // images are stretched over the whole region
                    painter.image(texture.id(), region, full_uv(), egui::Color32::WHITE);
                }
            }
        }
    }

    fn layer(&mut self, kind: MediaKind) -> &mut bool {
        match kind {
            MediaKind::Video => &mut self.video_visible,
            MediaKind::Image => &mut self.image_visible,
        }
    }
}

impl PresentationSurface for DisplaySurface {
    fn start_playback(&mut self, path: &Path) {
        self.video_texture = None;
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.load(path) {
                log::error!("could not play {}: {e}", path.display());
            }
        }
    }

    fn pause(&mut self) {
        if let Some(Err(e)) = self.player.as_mut().map(|p| p.pause()) {
            log::error!("{e}");
        }
    }

    fn resume(&mut self) {
        if let Some(Err(e)) = self.player.as_mut().map(|p| p.play()) {
            log::error!("{e}");
        }
    }

    fn show_surface(&mut self, kind: MediaKind) {
        *self.layer(kind) = true;
    }

    fn hide_surface(&mut self, kind: MediaKind) {
        *self.layer(kind) = false;
    }

    fn set_image(&mut self, path: &Path) {
        self.image = Some(path.to_path_buf());
    }

    fn clear_image(&mut self) {
        self.image = None;
    }

    fn take_completion(&mut self) -> bool {
        self.player
            .as_mut()
            .map(GstVideoPlayer::take_finished)
            .unwrap_or(false)
    }
}

fn upload_frame(ctx: &egui::Context, texture: &mut Option<egui::TextureHandle>, frame: &VideoFrame) {
    let color_img = egui::ColorImage::from_rgba_unmultiplied(
        [frame.width as usize, frame.height as usize],
        &frame.data,
    );
    match texture {
        Some(handle) => handle.set(color_img, egui::TextureOptions::LINEAR),
        None => {
            *texture = Some(ctx.load_texture("video_frame", color_img, egui::TextureOptions::LINEAR));
        }
    }
}

fn load_image_texture(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    let img = match image::open(path) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            log::warn!("could not decode {}: {e}", path.display());
            return None;
        }
    };
    let size = [img.width() as usize, img.height() as usize];
    let color_img = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
    Some(ctx.load_texture(
        path.to_string_lossy(),
        color_img,
        egui::TextureOptions::LINEAR,
    ))
}

fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

/// Largest rect with `content`'s aspect ratio that fits centered in `region`.
pub fn fit_rect(content: egui::Vec2, region: egui::Rect) -> egui::Rect {
    if content.x <= 0.0 || content.y <= 0.0 {
        return region;
    }
    let scale = (region.width() / content.x).min(region.height() / content.y);
    egui::Rect::from_center_size(region.center(), content * scale)
}
