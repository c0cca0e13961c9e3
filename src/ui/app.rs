use std::time::{Duration, Instant};

use eframe::egui;

use crate::sequencer::Sequencer;
use crate::types::media_kind::MediaKind;
use crate::types::playback_state::PlaybackPhase;
use crate::ui::display::DisplaySurface;

/// Repaint interval while video frames are arriving.
const VIDEO_FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppState {
    pub sequencer: Sequencer,
    pub surface: DisplaySurface,
    pub started: bool,
}

pub struct VidslideApp {
    pub state: AppState,
}

impl VidslideApp {
    pub fn new(sequencer: Sequencer, surface: DisplaySurface) -> Self {
        Self {
            state: AppState {
                sequencer,
                surface,
                started: false,
            },
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, now: Instant) {
        let (skip, toggle_fullscreen, leave_fullscreen, fullscreen) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::F11),
                i.key_pressed(egui::Key::Escape),
                i.viewport().fullscreen.unwrap_or(false),
            )
        });

        if skip {
            self.state
                .sequencer
                .resume_now(now, &mut self.state.surface);
        }
        if toggle_fullscreen {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        } else if leave_fullscreen && fullscreen {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        }
    }

    /// Wake up for the next video frame, or else exactly at the next deadline.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let sequencer = &self.state.sequencer;
        if sequencer.phase() == PlaybackPhase::PlayingVideo
            && self.state.surface.is_visible(MediaKind::Video)
        {
            ctx.request_repaint_after(VIDEO_FRAME_INTERVAL);
        } else if let Some(deadline) = sequencer.deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl eframe::App for VidslideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if !self.state.started {
            self.state.started = true;
            self.state.sequencer.start(now, &mut self.state.surface);
        }

        self.handle_input(ctx, now);
        self.state.surface.update(ctx);
        self.state.sequencer.tick(now, &mut self.state.surface);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.state.surface.show(ui);
            });

        self.schedule_repaint(ctx, now);
    }
}
