use std::path::PathBuf;
use std::time::Instant;

use crate::config::VIDEO_DWELL;
use crate::types::catalog::MediaCatalog;
use crate::types::cursor::CyclicCursor;
use crate::types::media_kind::MediaKind;
use crate::types::playback_state::{PhaseAction, PlaybackPhase};
use crate::ui::surface::PresentationSurface;

/// Alternates between playing videos and two-image interludes.
///
/// Driven entirely by [`Sequencer::tick`]: there is one phase and at most
/// one deadline, so two conflicting timers can never be armed at once.
#[derive(Debug)]
pub struct Sequencer {
    videos: Vec<PathBuf>,
    images: Vec<PathBuf>,
    video_cursor: CyclicCursor,
    image_cursor: CyclicCursor,
    phase: PlaybackPhase,
    deadline: Option<Instant>,
    // index of the clip currently in the player
    loaded: Option<usize>,
}

impl Sequencer {
    pub fn new(videos: Vec<PathBuf>, images: Vec<PathBuf>) -> Self {
        Sequencer {
            video_cursor: CyclicCursor::new(videos.len()),
            image_cursor: CyclicCursor::new(images.len()),
            videos,
            images,
            phase: PlaybackPhase::Idle,
            deadline: None,
            loaded: None,
        }
    }

    pub fn from_catalog(catalog: MediaCatalog) -> Self {
        let (videos, images) = catalog.into_parts();
        Self::new(videos, images)
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn video_cursor(&self) -> usize {
        self.video_cursor.index()
    }

    pub fn image_cursor(&self) -> usize {
        self.image_cursor.index()
    }

    /// Plays the video under the cursor and arms the video dwell. Stays idle
    /// when there are no videos.
    pub fn start(&mut self, now: Instant, surface: &mut impl PresentationSurface) {
        let Some(index) = self.video_cursor.current() else {
            log::debug!("no videos to play; staying idle");
            self.phase = PlaybackPhase::Idle;
            self.deadline = None;
            return;
        };
        let path = &self.videos[index];
        log::info!("playing {}", path.display());
        surface.show_surface(MediaKind::Video);
        surface.start_playback(path);
        self.loaded = Some(index);
        self.enter(PlaybackPhase::PlayingVideo, now + VIDEO_DWELL);
    }

    /// Advances the state machine. Completion is only consumed while a video
    /// is playing; one that arrives during an interlude waits until resume.
    pub fn tick(&mut self, now: Instant, surface: &mut impl PresentationSurface) {
        if self.phase == PlaybackPhase::PlayingVideo && surface.take_completion() {
            self.video_finished(now, surface);
        }
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.expire(now, surface);
        }
    }

    /// The current clip ended before its dwell did: move straight on to the
    /// clip after it. The video cursor is reset to that clip, whatever the
    /// interludes did to it while the finished clip was playing.
    pub fn video_finished(&mut self, now: Instant, surface: &mut impl PresentationSurface) {
        if self.phase != PlaybackPhase::PlayingVideo {
            log::debug!("ignoring completion in phase {:?}", self.phase);
            return;
        }
        if let Some(loaded) = self.loaded {
            self.video_cursor.set(loaded);
            self.video_cursor.advance();
        }
        self.start(now, surface);
    }

    /// Cuts an interlude short and goes back to the video right away, with a
    /// fresh video dwell from `now`.
    pub fn resume_now(&mut self, now: Instant, surface: &mut impl PresentationSurface) {
        if !self.phase.is_interlude() {
            return;
        }
        self.deadline = None;
        self.apply(PhaseAction::ResumeVideo, surface);
        self.enter(PlaybackPhase::PlayingVideo, now + VIDEO_DWELL);
    }

    fn expire(&mut self, now: Instant, surface: &mut impl PresentationSurface) {
        let Some(transition) = self.phase.on_dwell_expired() else {
            self.deadline = None;
            return;
        };
        self.apply(transition.action, surface);
        self.enter(transition.next, now + transition.dwell);
    }

    fn enter(&mut self, phase: PlaybackPhase, deadline: Instant) {
        log::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.deadline = Some(deadline);
    }

    fn apply(&mut self, action: PhaseAction, surface: &mut impl PresentationSurface) {
        match action {
            PhaseAction::BeginInterlude => {
                surface.pause();
                surface.hide_surface(MediaKind::Video);
                surface.show_surface(MediaKind::Image);
                self.show_next_image(surface);
            }
            PhaseAction::NextImage => self.show_next_image(surface),
            PhaseAction::ResumeVideo => {
                surface.clear_image();
                surface.hide_surface(MediaKind::Image);
                surface.show_surface(MediaKind::Video);
                surface.resume();
                self.video_cursor.advance();
            }
        }
    }

    fn show_next_image(&mut self, surface: &mut impl PresentationSurface) {
        if let Some(index) = self.image_cursor.current() {
            surface.set_image(&self.images[index]);
            self.image_cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IMAGE_DWELL;
    use std::path::Path;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(PathBuf),
        Pause,
        Resume,
        Show(MediaKind),
        Hide(MediaKind),
        SetImage(PathBuf),
        ClearImage,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
        video_visible: bool,
        image_visible: bool,
        image: Option<PathBuf>,
        finished: bool,
    }

    impl PresentationSurface for RecordingSurface {
        fn start_playback(&mut self, path: &Path) {
            self.calls.push(Call::Play(path.to_path_buf()));
        }
        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }
        fn resume(&mut self) {
            self.calls.push(Call::Resume);
        }
        fn show_surface(&mut self, kind: MediaKind) {
            match kind {
                MediaKind::Video => self.video_visible = true,
                MediaKind::Image => self.image_visible = true,
            }
            self.calls.push(Call::Show(kind));
        }
        fn hide_surface(&mut self, kind: MediaKind) {
            match kind {
                MediaKind::Video => self.video_visible = false,
                MediaKind::Image => self.image_visible = false,
            }
            self.calls.push(Call::Hide(kind));
        }
        fn set_image(&mut self, path: &Path) {
            self.image = Some(path.to_path_buf());
            self.calls.push(Call::SetImage(path.to_path_buf()));
        }
        fn clear_image(&mut self) {
            self.image = None;
            self.calls.push(Call::ClearImage);
        }
        fn take_completion(&mut self) -> bool {
            std::mem::take(&mut self.finished)
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/media/{n}"))).collect()
    }

    /// Runs one full video dwell plus interlude, returning the new clock.
    fn run_cycle(seq: &mut Sequencer, surface: &mut RecordingSurface, now: Instant) -> Instant {
        let now = now + VIDEO_DWELL;
        seq.tick(now, surface);
        let now = now + IMAGE_DWELL;
        seq.tick(now, surface);
        let now = now + IMAGE_DWELL;
        seq.tick(now, surface);
        now
    }

    #[test]
    fn test_start_plays_first_video() {
        let mut seq = Sequencer::new(paths(&["a.mp4", "b.mp4"]), paths(&["x.png"]));
        let mut surface = RecordingSurface::default();
        let now = Instant::now();
        seq.start(now, &mut surface);

        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
        assert_eq!(seq.deadline(), Some(now + VIDEO_DWELL));
        assert_eq!(
            surface.calls,
            vec![
                Call::Show(MediaKind::Video),
                Call::Play(PathBuf::from("/media/a.mp4"))
            ]
        );
    }

    #[test]
    fn test_tick_before_deadline_does_nothing() {
        let mut seq = Sequencer::new(paths(&["a.mp4"]), paths(&["x.png"]));
        let mut surface = RecordingSurface::default();
        let now = Instant::now();
        seq.start(now, &mut surface);
        surface.calls.clear();

        seq.tick(now + VIDEO_DWELL - Duration::from_millis(1), &mut surface);
        assert!(surface.calls.is_empty());
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
    }

    #[test]
    fn test_one_full_cycle() {
        let mut seq = Sequencer::new(paths(&["A", "B", "C"]), paths(&["x", "y"]));
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);

        let now = start + VIDEO_DWELL;
        seq.tick(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingFirstImage);
        assert!(!surface.video_visible);
        assert!(surface.image_visible);
        assert_eq!(surface.image, Some(PathBuf::from("/media/x")));
        assert_eq!(seq.deadline(), Some(now + IMAGE_DWELL));

        let now = now + IMAGE_DWELL;
        seq.tick(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingSecondImage);
        assert_eq!(surface.image, Some(PathBuf::from("/media/y")));

        let now = now + IMAGE_DWELL;
        seq.tick(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
        assert!(surface.video_visible);
        assert!(!surface.image_visible);
        assert_eq!(surface.image, None);
        assert_eq!(seq.deadline(), Some(now + VIDEO_DWELL));
        assert_eq!(seq.video_cursor(), 1);
        assert_eq!(seq.image_cursor(), 0);
        // the paused clip is resumed rather than reloaded
        assert_eq!(surface.calls.last(), Some(&Call::Resume));
        assert_eq!(
            surface
                .calls
                .iter()
                .filter(|c| matches!(c, Call::Play(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_cursors_after_k_cycles() {
        for (n, m) in [(1, 1), (2, 3), (3, 2), (4, 5), (5, 4)] {
            let videos: Vec<_> = (0..n).map(|i| PathBuf::from(format!("/v/{i}"))).collect();
            let images: Vec<_> = (0..m).map(|i| PathBuf::from(format!("/i/{i}"))).collect();
            let mut seq = Sequencer::new(videos, images);
            let mut surface = RecordingSurface::default();
            let mut now = Instant::now();
            seq.start(now, &mut surface);
            for k in 1..=12 {
                now = run_cycle(&mut seq, &mut surface, now);
                assert_eq!(seq.video_cursor(), k % n, "n={n} k={k}");
                assert_eq!(seq.image_cursor(), (2 * k) % m, "m={m} k={k}");
            }
        }
    }

    #[test]
    fn test_no_videos_stays_idle() {
        let mut seq = Sequencer::new(vec![], paths(&["x.png"]));
        let mut surface = RecordingSurface::default();
        let now = Instant::now();
        seq.start(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::Idle);
        assert_eq!(seq.deadline(), None);

        surface.finished = true;
        for secs in [10, 100, 10_000] {
            seq.tick(now + Duration::from_secs(secs), &mut surface);
        }
        assert_eq!(seq.phase(), PlaybackPhase::Idle);
        assert_eq!(seq.deadline(), None);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_no_images_still_spends_interlude() {
        let mut seq = Sequencer::new(paths(&["a.mp4"]), vec![]);
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);

        let now = start + VIDEO_DWELL;
        seq.tick(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingFirstImage);
        seq.tick(now + IMAGE_DWELL, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingSecondImage);
        // halfway through the second dwell nothing has resumed yet
        seq.tick(now + IMAGE_DWELL + IMAGE_DWELL / 2, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingSecondImage);
        seq.tick(now + IMAGE_DWELL * 2, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);

        assert!(!surface.calls.iter().any(|c| matches!(c, Call::SetImage(_))));
        assert_eq!(seq.image_cursor(), 0);
    }

    #[test]
    fn test_resume_now_mid_interlude() {
        let mut seq = Sequencer::new(paths(&["a.mp4", "b.mp4"]), paths(&["x", "y", "z"]));
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);
        seq.tick(start + VIDEO_DWELL, &mut surface);
        assert!(seq.phase().is_interlude());

        let now = start + VIDEO_DWELL + Duration::from_millis(700);
        seq.resume_now(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
        assert!(surface.video_visible);
        assert!(!surface.image_visible);
        assert_eq!(surface.image, None);
        assert_eq!(seq.deadline(), Some(now + VIDEO_DWELL));
        assert_eq!(seq.video_cursor(), 1);
        assert_eq!(seq.image_cursor(), 1);

        // the cancelled image deadline never fires
        seq.tick(start + VIDEO_DWELL + IMAGE_DWELL, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
    }

    #[test]
    fn test_resume_now_outside_interlude_is_noop() {
        let mut seq = Sequencer::new(paths(&["a.mp4"]), paths(&["x"]));
        let mut surface = RecordingSurface::default();
        let now = Instant::now();
        seq.start(now, &mut surface);
        surface.calls.clear();
        seq.resume_now(now + Duration::from_secs(1), &mut surface);
        assert!(surface.calls.is_empty());
        assert_eq!(seq.deadline(), Some(now + VIDEO_DWELL));
    }

    #[test]
    fn test_completion_starts_next_video() {
        let mut seq = Sequencer::new(paths(&["a", "b", "c"]), paths(&["x"]));
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);

        let now = start + Duration::from_secs(4);
        surface.finished = true;
        seq.tick(now, &mut surface);
        assert_eq!(seq.video_cursor(), 1);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
        assert_eq!(seq.deadline(), Some(now + VIDEO_DWELL));
        assert_eq!(surface.calls.last(), Some(&Call::Play(PathBuf::from("/media/b"))));
    }

    #[test]
    fn test_completion_after_interlude_does_not_skip() {
        let mut seq = Sequencer::new(paths(&["a", "b", "c"]), paths(&["x"]));
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);
        let now = run_cycle(&mut seq, &mut surface, start);
        assert_eq!(seq.video_cursor(), 1);

        surface.finished = true;
        seq.tick(now + Duration::from_secs(1), &mut surface);
        assert_eq!(seq.video_cursor(), 1);
        assert_eq!(surface.calls.last(), Some(&Call::Play(PathBuf::from("/media/b"))));
    }

    #[test]
    fn test_completion_during_interlude_waits_for_resume() {
        let mut seq = Sequencer::new(paths(&["a", "b"]), paths(&["x"]));
        let mut surface = RecordingSurface::default();
        let start = Instant::now();
        seq.start(start, &mut surface);
        let now = start + VIDEO_DWELL;
        seq.tick(now, &mut surface);

        surface.finished = true;
        seq.tick(now + Duration::from_millis(10), &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::ShowingFirstImage);
        assert!(surface.finished);

        seq.tick(now + IMAGE_DWELL, &mut surface);
        let now = now + IMAGE_DWELL * 2;
        seq.tick(now, &mut surface);
        assert_eq!(seq.phase(), PlaybackPhase::PlayingVideo);
        assert!(surface.finished);
        // the pending completion is picked up on the next frame
        seq.tick(now + Duration::from_millis(16), &mut surface);
        assert!(!surface.finished);
        assert_eq!(surface.calls.last(), Some(&Call::Play(PathBuf::from("/media/b"))));
    }

    #[test]
    fn test_single_video_loops() {
        let mut seq = Sequencer::new(paths(&["only"]), vec![]);
        let mut surface = RecordingSurface::default();
        let now = Instant::now();
        seq.start(now, &mut surface);
        surface.finished = true;
        seq.tick(now + Duration::from_secs(2), &mut surface);
        assert_eq!(seq.video_cursor(), 0);
        let plays: Vec<_> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Play(_)))
            .collect();
        assert_eq!(plays.len(), 2);
    }

    #[test]
    fn test_long_clips_play_in_order() {
        let mut seq = Sequencer::new(paths(&["A", "B", "C"]), paths(&["x", "y"]));
        let mut surface = RecordingSurface::default();
        let mut now = Instant::now();
        seq.start(now, &mut surface);

        // every clip outlasts three interludes before it ends
        for _ in 0..4 {
            for _ in 0..3 {
                now = run_cycle(&mut seq, &mut surface, now);
            }
            surface.finished = true;
            now += Duration::from_secs(1);
            seq.tick(now, &mut surface);
        }

        let plays: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Play(p) => Some(p.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            plays,
            vec!["/media/A", "/media/B", "/media/C", "/media/A", "/media/B"]
        );
        assert_eq!(seq.video_cursor(), 1);
    }
}
