// SPDX-License-Identifier: MPL-2.0
//! Session-level flag handling: play/mute toggles and the hold-driven
//! pause, plus the derived "should the clock tick" decision.

use crate::domain::playback::{PlaybackFlags, SessionState};

/// Owns the [`PlaybackFlags`] of one engine instance.
///
/// The session is a plain owned struct, not shared state, so multiple
/// engines (a preview and a full view, say) never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSession {
    flags: PlaybackFlags,
}

impl PlaybackSession {
    /// Creates a session with the default flags of a fresh sequence.
    #[must_use]
    pub fn new(start_muted: bool) -> Self {
        Self {
            flags: PlaybackFlags::new(start_muted),
        }
    }

    /// Flips the user play toggle.
    pub fn toggle_play(&mut self) {
        self.flags.is_playing = !self.flags.is_playing;
    }

    /// Flips the audio mute flag. Mute never affects timing.
    pub fn toggle_mute(&mut self) {
        self.flags.is_muted = !self.flags.is_muted;
    }

    /// A press landed on the surface: mirror the physical state
    /// immediately, without pausing yet.
    pub fn hold_started(&mut self) {
        self.flags.is_holding = true;
    }

    /// The press outlived the threshold: pause visibly.
    pub fn hold_promoted(&mut self) {
        self.flags.is_paused = true;
    }

    /// The press ended: clear both the transient and the pause flag.
    pub fn hold_released(&mut self) {
        self.flags.is_holding = false;
        self.flags.is_paused = false;
    }

    /// Returns whether the progress clock may advance right now.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.flags.should_tick()
    }

    /// Returns the derived session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.flags.state()
    }

    /// Returns a copy of all flags for observation.
    #[must_use]
    pub fn flags(&self) -> PlaybackFlags {
        self.flags
    }
}
