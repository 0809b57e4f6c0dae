// SPDX-License-Identifier: MPL-2.0
//! Elapsed-fraction tracking for the item currently on screen.
//!
//! Two timing strategies exist, selected by the item's [`MediaKind`]:
//!
//! - **Fixed duration** (images and unknown media): time accumulates via
//!   the periodic tick against a fixed budget.
//! - **Source driven** (video): the fraction is derived from the
//!   `(position, duration)` pair reported by the playback surface, and
//!   completion comes from its explicit ended signal.
//!
//! Both variants store accumulated progress, never an absolute start
//! timestamp, so suspending the tick (pause, hold) and resuming later
//! neither double-counts nor loses progress. Completion is latched and
//! reported exactly once per armed clock.

use crate::domain::media::MediaKind;
use std::time::Duration;

/// Outcome of feeding time or a source signal into the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// The current item finished its budget or its source ended.
    /// Reported exactly once; the engine maps it to an advance.
    Completed,
}

/// Progress clock for the current item, as a tagged variant over the
/// two timing strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressClock {
    /// Fixed-budget strategy for static media.
    FixedDuration {
        /// Time accumulated so far while ticking.
        accumulated: Duration,
        /// Total on-screen budget.
        total: Duration,
        /// Whether completion has already been reported.
        completed: bool,
    },
    /// Source-reported strategy for streamed media.
    SourceDriven {
        /// Last reported playback position.
        position: Duration,
        /// Last reported media duration, once known.
        duration: Option<Duration>,
        /// Whether the ended signal has already been consumed.
        completed: bool,
    },
}

impl ProgressClock {
    /// Arms a fixed-duration clock with the given budget.
    #[must_use]
    pub fn fixed(total: Duration) -> Self {
        Self::FixedDuration {
            accumulated: Duration::ZERO,
            total,
            completed: false,
        }
    }

    /// Arms a source-driven clock awaiting position reports.
    #[must_use]
    pub fn source_driven() -> Self {
        Self::SourceDriven {
            position: Duration::ZERO,
            duration: None,
            completed: false,
        }
    }

    /// Arms the strategy matching the item kind.
    #[must_use]
    pub fn for_kind(kind: MediaKind, budget: Duration) -> Self {
        if kind.uses_fixed_timing() {
            Self::fixed(budget)
        } else {
            Self::source_driven()
        }
    }

    /// Returns the elapsed fraction of the current item, clamped to
    /// `[0, 1]`. A source-driven clock without a known duration reports 0.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        match self {
            Self::FixedDuration {
                accumulated, total, ..
            } => {
                if total.is_zero() {
                    1.0
                } else {
                    (accumulated.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
                }
            }
            Self::SourceDriven {
                position,
                duration,
                completed,
            } => {
                if *completed {
                    return 1.0;
                }
                match duration {
                    Some(total) if !total.is_zero() => {
                        (position.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
                    }
                    _ => 0.0,
                }
            }
        }
    }

    /// Returns true once completion has been reported.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::FixedDuration { completed, .. } | Self::SourceDriven { completed, .. } => {
                *completed
            }
        }
    }

    /// Accumulates elapsed time on a fixed-duration clock.
    ///
    /// Source-driven clocks ignore ticks; their progress comes from
    /// [`set_position`](Self::set_position). Returns
    /// [`ClockEvent::Completed`] on the tick that reaches the budget,
    /// and never again afterwards.
    pub fn tick(&mut self, delta: Duration) -> Option<ClockEvent> {
        match self {
            Self::FixedDuration {
                accumulated,
                total,
                completed,
            } => {
                if *completed {
                    return None;
                }
                *accumulated = (*accumulated + delta).min(*total);
                if *accumulated >= *total {
                    *completed = true;
                    Some(ClockEvent::Completed)
                } else {
                    None
                }
            }
            Self::SourceDriven { .. } => None,
        }
    }

    /// Records a position report from the playback surface.
    ///
    /// Fixed-duration clocks ignore position reports. Position
    /// regressions (a late report from a seek-back race) are dropped so
    /// the fraction stays monotonic while ticking.
    pub fn set_position(&mut self, position: Duration, duration: Option<Duration>) {
        if let Self::SourceDriven {
            position: current,
            duration: known,
            completed,
        } = self
        {
            if *completed {
                return;
            }
            if duration.is_some() {
                *known = duration;
            }
            if position > *current {
                *current = position;
            }
        }
    }

    /// Consumes the ended signal of a source-driven item.
    ///
    /// Returns [`ClockEvent::Completed`] the first time, `None` on
    /// repeats and on fixed-duration clocks.
    pub fn mark_ended(&mut self) -> Option<ClockEvent> {
        match self {
            Self::SourceDriven { completed, .. } => {
                if *completed {
                    None
                } else {
                    *completed = true;
                    Some(ClockEvent::Completed)
                }
            }
            Self::FixedDuration { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_millis(5000);

    #[test]
    fn for_kind_selects_strategy() {
        assert!(matches!(
            ProgressClock::for_kind(MediaKind::Image, BUDGET),
            ProgressClock::FixedDuration { .. }
        ));
        assert!(matches!(
            ProgressClock::for_kind(MediaKind::Unknown, BUDGET),
            ProgressClock::FixedDuration { .. }
        ));
        assert!(matches!(
            ProgressClock::for_kind(MediaKind::Video, BUDGET),
            ProgressClock::SourceDriven { .. }
        ));
    }

    #[test]
    fn fixed_fraction_accumulates_and_clamps() {
        let mut clock = ProgressClock::fixed(BUDGET);
        assert_eq!(clock.fraction(), 0.0);

        clock.tick(Duration::from_millis(1000));
        assert!((clock.fraction() - 0.2).abs() < 1e-6);

        clock.tick(Duration::from_millis(10_000));
        assert_eq!(clock.fraction(), 1.0);
    }

    #[test]
    fn fixed_completion_fires_exactly_once() {
        let mut clock = ProgressClock::fixed(Duration::from_millis(100));
        assert_eq!(clock.tick(Duration::from_millis(50)), None);
        assert_eq!(
            clock.tick(Duration::from_millis(50)),
            Some(ClockEvent::Completed)
        );
        assert_eq!(clock.tick(Duration::from_millis(50)), None);
        assert!(clock.is_complete());
        assert_eq!(clock.fraction(), 1.0);
    }

    #[test]
    fn fixed_progress_survives_tick_gaps() {
        // A pause is simply the absence of ticks; the accumulated time
        // must be exactly where it was left.
        let mut clock = ProgressClock::fixed(BUDGET);
        clock.tick(Duration::from_millis(1000));
        let before = clock.fraction();
        // ... arbitrary pause ...
        clock.tick(Duration::from_millis(500));
        assert!((clock.fraction() - (before + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn source_fraction_follows_reported_position() {
        let mut clock = ProgressClock::source_driven();
        assert_eq!(clock.fraction(), 0.0);

        clock.set_position(Duration::from_secs(3), Some(Duration::from_secs(12)));
        assert!((clock.fraction() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn source_fraction_without_duration_is_zero() {
        let mut clock = ProgressClock::source_driven();
        clock.set_position(Duration::from_secs(3), None);
        assert_eq!(clock.fraction(), 0.0);
    }

    #[test]
    fn source_position_regressions_are_dropped() {
        let mut clock = ProgressClock::source_driven();
        clock.set_position(Duration::from_secs(5), Some(Duration::from_secs(10)));
        clock.set_position(Duration::from_secs(2), Some(Duration::from_secs(10)));
        assert!((clock.fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn source_ended_fires_exactly_once() {
        let mut clock = ProgressClock::source_driven();
        assert_eq!(clock.mark_ended(), Some(ClockEvent::Completed));
        assert_eq!(clock.mark_ended(), None);
        assert_eq!(clock.fraction(), 1.0);
    }

    #[test]
    fn source_ignores_ticks_and_fixed_ignores_positions() {
        let mut source = ProgressClock::source_driven();
        assert_eq!(source.tick(Duration::from_secs(60)), None);
        assert_eq!(source.fraction(), 0.0);

        let mut fixed = ProgressClock::fixed(BUDGET);
        fixed.set_position(Duration::from_secs(4), Some(Duration::from_secs(4)));
        assert_eq!(fixed.fraction(), 0.0);
        assert_eq!(fixed.mark_ended(), None);
    }

    #[test]
    fn zero_budget_fixed_clock_is_immediately_full() {
        let clock = ProgressClock::fixed(Duration::ZERO);
        assert_eq!(clock.fraction(), 1.0);
    }
}
