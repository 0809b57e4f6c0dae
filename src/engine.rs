// SPDX-License-Identifier: MPL-2.0
//! The playback engine: one active story/reel sequence, its progress
//! clock, gesture disambiguation, and session flags.
//!
//! The engine is single-threaded and event-driven. All mutation happens
//! through the methods below, which the host calls from its own event
//! loop (for Iced hosts, [`crate::ui`] does this wiring). Every index
//! change re-arms the clock for the new item and bumps the generation
//! counter; externally driven callbacks carry the generation they were
//! issued under and are dropped when stale, so a late timer or video
//! signal can never touch an item that is no longer current.

use crate::config::{EngineConfig, ItemDuration};
use crate::domain::media::{MediaItem, MediaKind};
use crate::domain::playback::{PlaybackFlags, SessionState};
use crate::gesture::{GestureEvent, GestureRecognizer, Intent};
use crate::progress::{ClockEvent, ProgressClock};
use crate::sequence::SequenceController;
use crate::session::PlaybackSession;
use std::time::{Duration, Instant};
use tracing::debug;

/// Events the engine raises outward for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The current index changed; the renderer should swap media.
    IndexChanged(usize),
    /// The session was torn down; the engine is terminal.
    Closed,
}

/// Playback engine for one story/reel sequence.
///
/// Constructed via [`ReelEngine::open`]; an empty media list is refused
/// and no timers are ever armed for it. After [`close`](ReelEngine::close)
/// the engine is terminal: every operation becomes a no-op.
#[derive(Debug, Clone)]
pub struct ReelEngine {
    sequence: SequenceController,
    clock: ProgressClock,
    gesture: GestureRecognizer,
    session: PlaybackSession,
    item_budget: ItemDuration,
    /// Generation counter, bumped on every index change and on close.
    epoch: u64,
    /// Instant of the last applied tick; `None` whenever ticking is
    /// suspended or freshly re-armed, so the next tick only sets a
    /// baseline and advances nothing.
    last_tick: Option<Instant>,
    /// Timing downgrade for the current item after a failed load.
    kind_override: Option<MediaKind>,
    closed: bool,
}

impl ReelEngine {
    /// Opens a sequence over the given items.
    ///
    /// `start_index` resumes mid-sequence (clamped). Returns
    /// [`crate::error::Error::EmptySequence`] for an empty list.
    pub fn open(
        items: Vec<MediaItem>,
        start_index: Option<usize>,
        config: &EngineConfig,
    ) -> crate::error::Result<Self> {
        let sequence = SequenceController::new(items, start_index)?;
        let item_budget = config.item_duration();
        let clock = ProgressClock::for_kind(sequence.current_item().kind(), item_budget.as_duration());
        debug!(
            len = sequence.len(),
            index = sequence.current_index(),
            "opened story sequence"
        );
        Ok(Self {
            sequence,
            clock,
            gesture: GestureRecognizer::new(config.hold_threshold()),
            session: PlaybackSession::new(config.start_muted()),
            item_budget,
            epoch: 0,
            last_tick: None,
            kind_override: None,
            closed: false,
        })
    }

    // ----------------------------------------------------------------
    // Commands
    // ----------------------------------------------------------------

    /// Moves to the next item, wrapping to the first after the last.
    pub fn advance(&mut self) -> Option<EngineEvent> {
        if self.closed {
            return None;
        }
        let index = self.sequence.advance();
        self.rearm(index);
        Some(EngineEvent::IndexChanged(index))
    }

    /// Moves to the previous item, wrapping to the last before the first.
    pub fn retreat(&mut self) -> Option<EngineEvent> {
        if self.closed {
            return None;
        }
        let index = self.sequence.retreat();
        self.rearm(index);
        Some(EngineEvent::IndexChanged(index))
    }

    /// Jumps to an arbitrary index, clamped to the valid range.
    /// Jumping to the current index is a no-op: no reset, no event.
    pub fn jump_to(&mut self, index: usize) -> Option<EngineEvent> {
        if self.closed {
            return None;
        }
        let index = self.sequence.jump_to(index)?;
        self.rearm(index);
        Some(EngineEvent::IndexChanged(index))
    }

    /// Flips the user play toggle. Pausing suspends the clock without
    /// resetting it.
    pub fn toggle_play(&mut self) {
        if self.closed {
            return;
        }
        self.session.toggle_play();
        if !self.session.should_tick() {
            self.last_tick = None;
        }
    }

    /// Flips the audio mute flag; timing is unaffected.
    pub fn toggle_mute(&mut self) {
        if self.closed {
            return;
        }
        self.session.toggle_mute();
    }

    /// Tears the session down. Idempotent and reachable from any state;
    /// afterwards the engine is terminal.
    pub fn close(&mut self) -> Option<EngineEvent> {
        if self.closed {
            return None;
        }
        self.closed = true;
        self.epoch += 1;
        self.last_tick = None;
        self.gesture.reset();
        debug!("closed story sequence");
        Some(EngineEvent::Closed)
    }

    /// Applies a high-level intent from controls or the keyboard adapter.
    pub fn apply_intent(&mut self, intent: Intent) -> Option<EngineEvent> {
        match intent {
            Intent::Advance => self.advance(),
            Intent::Retreat => self.retreat(),
            Intent::TogglePlay => {
                self.toggle_play();
                None
            }
            Intent::ToggleMute => {
                self.toggle_mute();
                None
            }
            Intent::Close => self.close(),
        }
    }

    // ----------------------------------------------------------------
    // Surface input
    // ----------------------------------------------------------------

    /// A press landed on the media surface. Sets the transient holding
    /// flag immediately (the clock suspends) without pausing visibly.
    pub fn press(&mut self, now: Instant) {
        if self.closed {
            return;
        }
        if let Some(GestureEvent::HoldStarted) = self.gesture.press(now) {
            self.session.hold_started();
            self.last_tick = None;
        }
    }

    /// Checks a pending press for promotion past the hold threshold.
    /// Driven by the host's hold-poll timer while
    /// [`hold_poll_pending`](Self::hold_poll_pending) is true.
    pub fn poll_hold(&mut self, now: Instant) {
        if self.closed {
            return;
        }
        if let Some(GestureEvent::HoldPromoted) = self.gesture.poll(now) {
            debug!("press promoted to hold");
            self.session.hold_promoted();
        }
    }

    /// The media surface was released.
    ///
    /// A release within the threshold is a tap and maps to exactly one
    /// advance; past it, the end of a hold: resume without navigating.
    pub fn release(&mut self, now: Instant) -> Option<EngineEvent> {
        if self.closed {
            return None;
        }
        match self.gesture.release(now)? {
            GestureEvent::Tap => {
                self.session.hold_released();
                self.advance()
            }
            GestureEvent::HoldReleased => {
                self.session.hold_released();
                None
            }
            // press/poll outcomes never come out of release()
            GestureEvent::HoldStarted | GestureEvent::HoldPromoted => None,
        }
    }

    // ----------------------------------------------------------------
    // Timing
    // ----------------------------------------------------------------

    /// Feeds one periodic tick into the fixed-duration clock.
    ///
    /// Ignored entirely unless the session should tick. The first tick
    /// after a resume or an index change only records a baseline, so
    /// suspended time is never counted.
    pub fn tick(&mut self, now: Instant) -> Option<EngineEvent> {
        if self.closed || !self.session.should_tick() {
            self.last_tick = None;
            return None;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return None;
        };
        let delta = now.saturating_duration_since(last);
        self.last_tick = Some(now);
        match self.clock.tick(delta) {
            Some(ClockEvent::Completed) => self.advance(),
            None => None,
        }
    }

    /// Records a position report from the video surface.
    ///
    /// Dropped when the carried `epoch` is stale or while the session
    /// is suspended, so a held or paused video never advances the bar.
    pub fn media_position(&mut self, epoch: u64, position: Duration, duration: Option<Duration>) {
        if self.closed || !self.check_epoch(epoch, "position") {
            return;
        }
        if !self.session.should_tick() {
            return;
        }
        self.clock.set_position(position, duration);
    }

    /// Consumes the ended signal from the video surface.
    ///
    /// Completion is only actionable while playing; a stale epoch is a
    /// no-op.
    pub fn media_ended(&mut self, epoch: u64) -> Option<EngineEvent> {
        if self.closed || !self.check_epoch(epoch, "ended") {
            return None;
        }
        if !self.session.should_tick() {
            return None;
        }
        match self.clock.mark_ended() {
            Some(ClockEvent::Completed) => self.advance(),
            None => None,
        }
    }

    /// Downgrades the current item to [`MediaKind::Unknown`] after a
    /// failed load and re-arms the fixed-duration strategy, so the
    /// sequence keeps moving past the fallback visual. Not a fatal
    /// engine error.
    pub fn media_load_failed(&mut self, epoch: u64) {
        if self.closed || !self.check_epoch(epoch, "load-failed") {
            return;
        }
        debug!(index = self.sequence.current_index(), "media load failed, timing as static");
        self.kind_override = Some(MediaKind::Unknown);
        self.clock = ProgressClock::fixed(self.item_budget.as_duration());
        self.last_tick = None;
    }

    // ----------------------------------------------------------------
    // Observation
    // ----------------------------------------------------------------

    /// Returns the current index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequence.current_index()
    }

    /// Returns the elapsed fraction of the current item, in `[0, 1]`.
    #[must_use]
    pub fn elapsed_fraction(&self) -> f32 {
        self.clock.fraction()
    }

    /// Returns the timing kind of the current item (after any
    /// failed-load downgrade).
    #[must_use]
    pub fn current_kind(&self) -> MediaKind {
        self.kind_override
            .unwrap_or_else(|| self.sequence.current_item().kind())
    }

    /// Returns the item at an arbitrary index, if in range.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.sequence.get(index)
    }

    /// Returns the number of items in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false: an empty engine is not constructible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the per-item progress for the renderer's bars: full
    /// before the current index, the elapsed fraction at it, empty
    /// beyond.
    #[must_use]
    pub fn progress_for(&self, index: usize) -> f32 {
        use std::cmp::Ordering;
        match index.cmp(&self.sequence.current_index()) {
            Ordering::Less => 1.0,
            Ordering::Equal => self.elapsed_fraction(),
            Ordering::Greater => 0.0,
        }
    }

    /// Returns the user play toggle.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.session.flags().is_playing
    }

    /// Returns whether a promoted hold is pausing playback.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.flags().is_paused
    }

    /// Returns the audio mute flag.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.session.flags().is_muted
    }

    /// Returns true after [`close`](Self::close).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns whether the periodic tick should currently be running.
    /// The Iced adapter keeps the tick subscription alive exactly while
    /// this holds.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        !self.closed && self.session.should_tick()
    }

    /// Returns whether a press is awaiting hold promotion. The Iced
    /// adapter keeps the hold-poll subscription alive exactly while
    /// this holds.
    #[must_use]
    pub fn hold_poll_pending(&self) -> bool {
        !self.closed && self.gesture.is_pending()
    }

    /// Returns a copy of all session flags.
    #[must_use]
    pub fn flags(&self) -> PlaybackFlags {
        self.session.flags()
    }

    /// Returns the derived session state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns the current generation. The host captures this when
    /// arming a video surface and passes it back with every position,
    /// ended, or load-failure signal.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ----------------------------------------------------------------

    /// Resets progress and re-arms the clock for the item that just
    /// became current.
    fn rearm(&mut self, index: usize) {
        self.epoch += 1;
        self.last_tick = None;
        self.kind_override = None;
        self.clock = ProgressClock::for_kind(
            self.sequence.current_item().kind(),
            self.item_budget.as_duration(),
        );
        debug!(index, epoch = self.epoch, "index changed");
    }

    fn check_epoch(&self, epoch: u64, signal: &'static str) -> bool {
        if epoch == self.epoch {
            true
        } else {
            debug!(
                stale = epoch,
                current = self.epoch,
                signal,
                "dropping stale media signal"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;

    fn image(id: &str, order: u32) -> MediaItem {
        MediaItem::new(id, format!("https://cdn.example/{id}.jpg"), MediaKind::Image, order)
    }

    fn video(id: &str, order: u32) -> MediaItem {
        MediaItem::new(id, format!("https://cdn.example/{id}.mp4"), MediaKind::Video, order)
    }

    fn engine(items: Vec<MediaItem>) -> ReelEngine {
        ReelEngine::open(items, None, &EngineConfig::default()).unwrap()
    }

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    /// Runs the periodic tick from `from_ms` to `to_ms` at the default
    /// 50 ms resolution, returning the first event raised.
    fn run_ticks(
        engine: &mut ReelEngine,
        start: Instant,
        from_ms: u64,
        to_ms: u64,
    ) -> Option<EngineEvent> {
        let mut raised = None;
        let mut t = from_ms;
        while t <= to_ms {
            if let Some(event) = engine.tick(at(start, t)) {
                raised.get_or_insert(event);
            }
            t += 50;
        }
        raised
    }

    #[test]
    fn open_refuses_empty_list() {
        let result = ReelEngine::open(Vec::new(), None, &EngineConfig::default());
        assert_eq!(result.unwrap_err(), crate::error::Error::EmptySequence);
    }

    #[test]
    fn open_starts_playing_and_muted() {
        let engine = engine(vec![image("a", 0), image("b", 1)]);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.elapsed_fraction(), 0.0);
        assert!(engine.is_playing());
        assert!(!engine.is_paused());
        assert!(engine.is_muted());
        assert!(engine.should_tick());
    }

    #[test]
    fn fixed_item_completes_after_its_budget() {
        let mut engine = engine(vec![image("a", 0), video("b", 1)]);
        let start = Instant::now();

        assert_eq!(run_ticks(&mut engine, start, 0, 4950), None);
        assert!(engine.elapsed_fraction() < 1.0);

        let event = engine.tick(at(start, 5000));
        assert_eq!(event, Some(EngineEvent::IndexChanged(1)));
        assert_eq!(engine.current_index(), 1);
        // The clock switched strategy and reset for the video item.
        assert_eq!(engine.elapsed_fraction(), 0.0);
        assert_eq!(engine.current_kind(), MediaKind::Video);
    }

    #[test]
    fn advance_wraps_and_resets_progress() {
        let mut engine = engine(vec![image("a", 0), image("b", 1), image("c", 2)]);
        engine.jump_to(2);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 1000));
        assert!(engine.elapsed_fraction() > 0.0);

        assert_eq!(engine.advance(), Some(EngineEvent::IndexChanged(0)));
        assert_eq!(engine.elapsed_fraction(), 0.0);
    }

    #[test]
    fn retreat_wraps_to_last() {
        let mut engine = engine(vec![image("a", 0), image("b", 1), image("c", 2)]);
        assert_eq!(engine.retreat(), Some(EngineEvent::IndexChanged(2)));
    }

    #[test]
    fn single_item_advance_wraps_onto_itself_and_resets() {
        let mut engine = engine(vec![image("a", 0)]);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 2000));
        assert!(engine.elapsed_fraction() > 0.3);

        assert_eq!(engine.advance(), Some(EngineEvent::IndexChanged(0)));
        assert_eq!(engine.elapsed_fraction(), 0.0);
    }

    #[test]
    fn jump_to_current_index_is_a_noop() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 1000));
        let fraction = engine.elapsed_fraction();
        let epoch = engine.epoch();

        assert_eq!(engine.jump_to(0), None);
        assert_eq!(engine.elapsed_fraction(), fraction);
        assert_eq!(engine.epoch(), epoch);
    }

    #[test]
    fn pause_preserves_progress_exactly() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 1000));
        let fraction = engine.elapsed_fraction();
        assert!((fraction - 0.2).abs() < 1e-6);

        engine.toggle_play();
        // Ticks during the pause change nothing.
        run_ticks(&mut engine, start, 1050, 60_000);
        assert_eq!(engine.elapsed_fraction(), fraction);

        engine.toggle_play();
        // First tick after resume is only a baseline.
        engine.tick(at(start, 90_000));
        assert_eq!(engine.elapsed_fraction(), fraction);
        engine.tick(at(start, 90_500));
        assert!((engine.elapsed_fraction() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn tap_advances_without_pausing() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let start = Instant::now();

        engine.press(start);
        assert!(!engine.should_tick());
        assert!(!engine.is_paused());

        let event = engine.release(at(start, 120));
        assert_eq!(event, Some(EngineEvent::IndexChanged(1)));
        assert!(!engine.is_paused());
        assert!(engine.should_tick());
    }

    #[test]
    fn hold_pauses_and_release_resumes_without_advancing() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 1000));
        let fraction = engine.elapsed_fraction();

        engine.press(at(start, 1000));
        engine.poll_hold(at(start, 1250));
        assert!(engine.is_paused());
        assert_eq!(engine.session_state(), SessionState::PausedByHold);

        let event = engine.release(at(start, 3000));
        assert_eq!(event, None);
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_paused());
        assert_eq!(engine.elapsed_fraction(), fraction);
    }

    #[test]
    fn video_progress_follows_surface_reports() {
        let mut engine = engine(vec![video("a", 0), image("b", 1)]);
        let epoch = engine.epoch();

        engine.media_position(
            epoch,
            Duration::from_secs(2),
            Some(Duration::from_secs(8)),
        );
        assert!((engine.elapsed_fraction() - 0.25).abs() < 1e-6);

        let event = engine.media_ended(epoch);
        assert_eq!(event, Some(EngineEvent::IndexChanged(1)));
        assert_eq!(engine.elapsed_fraction(), 0.0);
    }

    #[test]
    fn stale_epoch_signals_are_dropped() {
        let mut engine = engine(vec![video("a", 0), video("b", 1)]);
        let old_epoch = engine.epoch();
        engine.advance();

        engine.media_position(
            old_epoch,
            Duration::from_secs(9),
            Some(Duration::from_secs(10)),
        );
        assert_eq!(engine.elapsed_fraction(), 0.0);

        assert_eq!(engine.media_ended(old_epoch), None);
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn stale_tick_after_index_change_is_a_noop() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 1000));
        engine.advance();

        // A late tick scheduled for the old item only re-baselines.
        engine.tick(at(start, 1050));
        assert_eq!(engine.elapsed_fraction(), 0.0);
    }

    #[test]
    fn video_signals_are_ignored_while_suspended() {
        let mut engine = engine(vec![video("a", 0), image("b", 1)]);
        let epoch = engine.epoch();
        engine.toggle_play();

        engine.media_position(
            epoch,
            Duration::from_secs(5),
            Some(Duration::from_secs(10)),
        );
        assert_eq!(engine.elapsed_fraction(), 0.0);
        assert_eq!(engine.media_ended(epoch), None);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn load_failure_downgrades_to_fixed_timing() {
        let mut engine = engine(vec![video("a", 0), image("b", 1)]);
        let start = Instant::now();
        engine.media_load_failed(engine.epoch());
        assert_eq!(engine.current_kind(), MediaKind::Unknown);

        engine.tick(start);
        let event = engine.tick(at(start, 5000));
        assert_eq!(event, Some(EngineEvent::IndexChanged(1)));
        // The downgrade does not stick to the next item.
        assert_eq!(engine.current_kind(), MediaKind::Image);
    }

    #[test]
    fn close_is_terminal_and_idempotent() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        assert_eq!(engine.close(), Some(EngineEvent::Closed));
        assert_eq!(engine.close(), None);
        assert!(engine.is_closed());
        assert!(!engine.should_tick());

        let start = Instant::now();
        assert_eq!(engine.advance(), None);
        assert_eq!(engine.tick(start), None);
        assert_eq!(engine.release(start), None);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn progress_for_paints_bars_by_position() {
        let mut engine = engine(vec![image("a", 0), image("b", 1), image("c", 2)]);
        engine.jump_to(1);
        let start = Instant::now();
        engine.tick(start);
        engine.tick(at(start, 2500));

        assert_eq!(engine.progress_for(0), 1.0);
        assert!((engine.progress_for(1) - 0.5).abs() < 1e-6);
        assert_eq!(engine.progress_for(2), 0.0);
    }

    #[test]
    fn epoch_increments_on_every_index_change() {
        let mut engine = engine(vec![image("a", 0), image("b", 1)]);
        let e0 = engine.epoch();
        engine.advance();
        let e1 = engine.epoch();
        engine.retreat();
        let e2 = engine.epoch();
        assert!(e0 < e1 && e1 < e2);
    }
}
