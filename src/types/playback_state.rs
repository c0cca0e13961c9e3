use std::time::Duration;

use crate::config::{IMAGE_DWELL, VIDEO_DWELL};

/// Where the sequencer is in its video / interlude cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Nothing to play. No deadline is armed.
    #[default]
    Idle,
    PlayingVideo,
    ShowingFirstImage,
    ShowingSecondImage,
}

/// What the sequencer does to the surface when a phase's dwell runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// Pause the video, swap to the image layer, show one image.
    BeginInterlude,
    /// Show the next image.
    NextImage,
    /// Clear the image, swap back to the video layer, resume.
    ResumeVideo,
}

/// One row of the phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: PhaseAction,
    pub next: PlaybackPhase,
    pub dwell: Duration,
}

const TRANSITIONS: [(PlaybackPhase, Transition); 3] = [
    (
        PlaybackPhase::PlayingVideo,
        Transition {
            action: PhaseAction::BeginInterlude,
            next: PlaybackPhase::ShowingFirstImage,
            dwell: IMAGE_DWELL,
        },
    ),
    (
        PlaybackPhase::ShowingFirstImage,
        Transition {
            action: PhaseAction::NextImage,
            next: PlaybackPhase::ShowingSecondImage,
            dwell: IMAGE_DWELL,
        },
    ),
    (
        PlaybackPhase::ShowingSecondImage,
        Transition {
            action: PhaseAction::ResumeVideo,
            next: PlaybackPhase::PlayingVideo,
            dwell: VIDEO_DWELL,
        },
    ),
];

impl PlaybackPhase {
    /// The transition taken when this phase's dwell expires. `Idle` has none.
    pub fn on_dwell_expired(self) -> Option<Transition> {
        TRANSITIONS
            .iter()
            .find(|(phase, _)| *phase == self)
            .map(|(_, transition)| *transition)
    }

    pub fn is_interlude(self) -> bool {
        matches!(
            self,
            PlaybackPhase::ShowingFirstImage | PlaybackPhase::ShowingSecondImage
        )
    }
}
