// SPDX-License-Identifier: MPL-2.0
//! Tap/hold disambiguation over raw press and release events.
//!
//! The recognizer is an explicit mini state machine (`Idle` →
//! `PendingHold` → `Held`) so the tap/hold race is testable in
//! isolation from rendering. It never mutates session flags itself; it
//! reports [`GestureEvent`]s and the engine applies them.

use crate::config::HoldThreshold;
use std::time::Instant;

/// High-level intents the host can feed into the engine, raised by
/// explicit controls, the keyboard adapter, or a tap on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move to the next item.
    Advance,
    /// Move to the previous item.
    Retreat,
    /// Flip the user play toggle.
    TogglePlay,
    /// Flip the audio mute flag.
    ToggleMute,
    /// Tear the session down.
    Close,
}

/// What a press, poll, or release turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// A press landed; the hold threshold is armed but playback is not
    /// paused yet.
    HoldStarted,
    /// The press outlived the threshold; playback pauses visibly.
    HoldPromoted,
    /// The press ended before the threshold: a plain tap.
    Tap,
    /// A promoted hold ended; playback resumes, no navigation.
    HoldReleased,
}

/// Phase of the press currently being disambiguated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum HoldPhase {
    /// No press in flight.
    #[default]
    Idle,
    /// Pressed, threshold not yet elapsed.
    PendingHold { pressed_at: Instant },
    /// Threshold elapsed while still pressed.
    Held,
}

/// Disambiguates tap vs. press-and-hold on the media surface.
#[derive(Debug, Clone, Copy)]
pub struct GestureRecognizer {
    phase: HoldPhase,
    threshold: HoldThreshold,
}

impl GestureRecognizer {
    /// Creates a recognizer with the given tap/hold boundary.
    #[must_use]
    pub fn new(threshold: HoldThreshold) -> Self {
        Self {
            phase: HoldPhase::Idle,
            threshold,
        }
    }

    /// Returns true while a press is in flight (pending or promoted).
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, HoldPhase::Idle)
    }

    /// Returns true while a press is waiting for threshold promotion.
    /// The engine keeps the hold-poll timer alive exactly while this
    /// holds.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, HoldPhase::PendingHold { .. })
    }

    /// Records a press on the media surface.
    ///
    /// A second press while one is already in flight is ignored; the
    /// original press keeps its timing.
    pub fn press(&mut self, now: Instant) -> Option<GestureEvent> {
        if self.is_pressed() {
            return None;
        }
        self.phase = HoldPhase::PendingHold { pressed_at: now };
        Some(GestureEvent::HoldStarted)
    }

    /// Checks a pending press against the threshold.
    ///
    /// Returns [`GestureEvent::HoldPromoted`] once, the first time the
    /// press is observed past the threshold.
    pub fn poll(&mut self, now: Instant) -> Option<GestureEvent> {
        if let HoldPhase::PendingHold { pressed_at } = self.phase {
            if now.duration_since(pressed_at) >= self.threshold.as_duration() {
                self.phase = HoldPhase::Held;
                return Some(GestureEvent::HoldPromoted);
            }
        }
        None
    }

    /// Records a release of the media surface.
    ///
    /// A release before the threshold is a tap; at or past it, the end
    /// of a hold — even when no poll ran in between, so a missed poll
    /// can never turn a hold into a tap. A release without a matching
    /// press is treated as already-released and ignored.
    pub fn release(&mut self, now: Instant) -> Option<GestureEvent> {
        match self.phase {
            HoldPhase::Idle => None,
            HoldPhase::PendingHold { pressed_at } => {
                self.phase = HoldPhase::Idle;
                if now.duration_since(pressed_at) >= self.threshold.as_duration() {
                    Some(GestureEvent::HoldReleased)
                } else {
                    Some(GestureEvent::Tap)
                }
            }
            HoldPhase::Held => {
                self.phase = HoldPhase::Idle;
                Some(GestureEvent::HoldReleased)
            }
        }
    }

    /// Drops any press in flight without reporting a gesture. Used on
    /// close so a release arriving afterwards cannot navigate.
    pub fn reset(&mut self) {
        self.phase = HoldPhase::Idle;
    }
}
