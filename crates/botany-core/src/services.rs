//! Presentation ports - popups and sounds.
//!
//! Systems fire these and forget about them. The engine collects them in
//! logs that the host drains once per frame and renders however it likes.

use hecs::Entity;

use crate::components::SoundCue;

/// Receives popup messages
pub trait PopupSink {
    /// Show `key` over `subject`. `viewer` limits it to one entity; `None` shows it to everyone nearby.
    fn popup(&mut self, key: &'static str, subject: Entity, viewer: Option<Entity>);
}

/// Receives positional sounds
pub trait AudioSink {
    /// Play `cue` at `at` for every player in view
    fn play_pvs(&mut self, cue: &SoundCue, at: Entity);
}

/// A popup waiting to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub key: &'static str,
    pub subject: Entity,
    pub viewer: Option<Entity>,
}

/// A sound waiting to be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundPlayback {
    pub cue: SoundCue,
    pub at: Entity,
}

#[derive(Debug, Default)]
pub struct PopupLog {
    pending: Vec<Popup>,
}

impl PopupLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Popup> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Popup] {
        &self.pending
    }
}

impl PopupSink for PopupLog {
    fn popup(&mut self, key: &'static str, subject: Entity, viewer: Option<Entity>) {
        log::debug!("popup {key} on {subject:?} for {viewer:?}");
        self.pending.push(Popup {
            key,
            subject,
            viewer,
        });
    }
}

#[derive(Debug, Default)]
pub struct SoundLog {
    pending: Vec<SoundPlayback>,
}

impl SoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<SoundPlayback> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[SoundPlayback] {
        &self.pending
    }
}

impl AudioSink for SoundLog {
    fn play_pvs(&mut self, cue: &SoundCue, at: Entity) {
        self.pending.push(SoundPlayback {
            cue: cue.clone(),
            at,
        });
    }
}
