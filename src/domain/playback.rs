// SPDX-License-Identifier: MPL-2.0
//! Session-level playback flags and the derived session state.

/// Session-level playback flags for one engine instance.
///
/// `is_playing` is the user toggle, `is_paused` is driven by the hold
/// gesture, `is_holding` mirrors the physical press state, and
/// `is_muted` affects only the audio surface, never timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackFlags {
    /// User-controlled play toggle.
    pub is_playing: bool,
    /// Pause driven by a promoted hold gesture.
    pub is_paused: bool,
    /// Transient flag mirroring the physical press state.
    pub is_holding: bool,
    /// Audio mute; orthogonal to timing.
    pub is_muted: bool,
}

impl PlaybackFlags {
    /// Creates the flags a fresh session starts with.
    #[must_use]
    pub fn new(start_muted: bool) -> Self {
        Self {
            is_playing: true,
            is_paused: false,
            is_holding: false,
            is_muted: start_muted,
        }
    }

    /// Returns whether the progress clock may advance right now.
    ///
    /// This is the single derived invariant the whole engine hangs on:
    /// the clock ticks exactly when the session is playing, not paused,
    /// and not held.
    #[must_use]
    pub fn should_tick(self) -> bool {
        self.is_playing && !self.is_paused && !self.is_holding
    }

    /// Returns the derived session state for observation.
    #[must_use]
    pub fn state(self) -> SessionState {
        if !self.is_playing {
            SessionState::PausedByToggle
        } else if self.is_paused || self.is_holding {
            SessionState::PausedByHold
        } else {
            SessionState::Playing
        }
    }
}

impl Default for PlaybackFlags {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Derived, read-only view of the session state machine.
///
/// The flags in [`PlaybackFlags`] stay authoritative; this enum only
/// exists so hosts and tests can observe which branch of the state
/// machine the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The clock is ticking.
    Playing,
    /// Suspended by a press-and-hold gesture.
    PausedByHold,
    /// Suspended by the user's play toggle.
    PausedByToggle,
}

impl SessionState {
    /// Returns true if the clock is ticking.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if suspended by either pause path.
    #[must_use]
    pub fn is_paused(self) -> bool {
        !self.is_playing()
    }
}
