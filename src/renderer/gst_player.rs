use std::path::Path;

// GStreamer imports for video playback
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::error::MediaError;

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

/// A `playbin` whose video output lands in an RGBA appsink, so frames can be
/// uploaded as egui textures.
pub struct GstVideoPlayer {
    playbin: gst::Element,
    sink: gst_app::AppSink,
    finished: bool,
}

impl GstVideoPlayer {
    pub fn new() -> Result<Self, MediaError> {
        gst::init().map_err(|e| MediaError::Player(e.to_string()))?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let sink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let playbin = gst::ElementFactory::make("playbin")
            .name("player")
            .property("video-sink", sink.to_value())
            .build()
            .map_err(|e| MediaError::Player(format!("failed to create playbin: {e}")))?;

        Ok(Self {
            playbin,
            sink,
            finished: false,
        })
    }

    /// Replace the current media with `path` and start playing it.
    pub fn load(&mut self, path: &Path) -> Result<(), MediaError> {
        let uri = gst::glib::filename_to_uri(path, None)
            .map_err(|e| MediaError::Player(format!("{}: {e}", path.display())))?;

        // playbin only accepts a new uri from READY or below
        self.set_state(gst::State::Ready)?;
        self.finished = false;
        self.playbin.set_property("uri", uri.as_str());
        self.set_state(gst::State::Playing)
    }

    pub fn play(&mut self) -> Result<(), MediaError> {
        self.set_state(gst::State::Playing)
    }

    pub fn pause(&mut self) -> Result<(), MediaError> {
        self.set_state(gst::State::Paused)
    }

    fn set_state(&self, state: gst::State) -> Result<(), MediaError> {
        self.playbin
            .set_state(state)
            .map(|_| ())
            .map_err(|e| MediaError::Player(format!("failed to set {state:?}: {e}")))
    }

    /// Drain pending bus messages. End-of-stream is remembered until
    /// [`GstVideoPlayer::take_finished`]; decode errors are only logged.
    pub fn poll(&mut self) {
        let Some(bus) = self.playbin.bus() else {
            return;
        };
        while let Some(msg) = bus.pop() {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    log::debug!("end of stream");
                    self.finished = true;
                }
                MessageView::Error(err) => {
                    log::error!(
                        "playback error from {:?}: {} ({:?})",
                        err.src().map(|s| s.path_string()),
                        err.error(),
                        err.debug()
                    );
                }
                MessageView::Warning(warn) => {
                    log::warn!("playback warning: {}", warn.error());
                }
                _ => {}
            }
        }
    }

    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }

    /// The newest decoded frame, if one arrived since the last call.
    pub fn pull_frame(&self) -> Option<VideoFrame> {
        let sample = self.sink.try_pull_sample(gst::ClockTime::ZERO)?;
        let caps = sample.caps()?;
        let info = gst_video::VideoInfo::from_caps(caps).ok()?;
        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;

        let width = info.width();
        let height = info.height();
        let stride = info.stride()[0] as usize;
        let data = pack_rows(map.as_slice(), width as usize * 4, stride, height as usize)?;

        Some(VideoFrame {
            data,
            width,
            height,
        })
    }
}

/// Copies `height` rows of `row_len` bytes out of a buffer whose rows are
/// `stride` bytes apart. `None` if the buffer is too short for that.
fn pack_rows(src: &[u8], row_len: usize, stride: usize, height: usize) -> Option<Vec<u8>> {
    if stride < row_len {
        return None;
    }
    if stride == row_len {
        return src.get(..row_len * height).map(<[u8]>::to_vec);
    }
    let mut data = Vec::with_capacity(row_len * height);
    for row in src.chunks(stride).take(height) {
        data.extend_from_slice(row.get(..row_len)?);
    }
    (data.len() == row_len * height).then_some(data)
}

impl Drop for GstVideoPlayer {
    fn drop(&mut self) {
        self.playbin.set_state(gst::State::Null).ok();
    }
}
