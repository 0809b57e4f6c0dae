// SPDX-License-Identifier: MPL-2.0
//! Iced-facing story surface: message routing and timer subscriptions
//! around one [`ReelEngine`].
//!
//! The component does no painting. The host renders the media and the
//! progress bars from the read-only engine accessors and feeds raw
//! events back as [`Message`]s; this module owns the cooperative timing
//! sources (periodic tick, hold poll) as subscriptions that simply stop
//! existing when the engine no longer needs them.

use crate::config::{defaults::HOLD_POLL_INTERVAL_MS, Direction, EngineConfig, TickInterval};
use crate::domain::media::MediaItem;
use crate::engine::{EngineEvent, ReelEngine};
use crate::gesture::Intent;
use iced::{event, Subscription};
use std::time::{Duration, Instant};

use super::keymap;

/// Messages the host (and this component's subscriptions) feed in.
#[derive(Debug, Clone)]
pub enum Message {
    /// Periodic progress tick while the clock should run.
    Tick(Instant),
    /// Hold-promotion poll while a press is pending.
    HoldPoll(Instant),
    /// Pointer went down on the media surface.
    SurfacePressed,
    /// Pointer was released from the media surface.
    SurfaceReleased,
    /// Spatial right-hand control (or the right arrow key).
    Next,
    /// Spatial left-hand control (or the left arrow key).
    Previous,
    /// Jump directly to an item (progress-bar segment click).
    JumpTo(usize),
    /// Flip the user play toggle.
    TogglePlay,
    /// Flip the audio mute flag.
    ToggleMute,
    /// Tear the session down.
    Close,
    /// Position report from the host's video surface.
    VideoPosition {
        /// Engine generation captured when the surface was armed.
        epoch: u64,
        /// Reported playback position.
        position: Duration,
        /// Reported media duration, once known.
        duration: Option<Duration>,
    },
    /// Ended signal from the host's video surface.
    VideoEnded {
        /// Engine generation captured when the surface was armed.
        epoch: u64,
    },
    /// The host failed to load the current media.
    MediaLoadFailed {
        /// Engine generation captured when the load started.
        epoch: u64,
    },
    /// Raw window event routed in by the host application.
    RawEvent(event::Event),
}

/// Events the component raises back to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The current index changed; swap the displayed media.
    IndexChanged(usize),
    /// The session ended; dismiss the story surface.
    Closed,
}

impl From<EngineEvent> for Event {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::IndexChanged(index) => Event::IndexChanged(index),
            EngineEvent::Closed => Event::Closed,
        }
    }
}

/// State of one story surface.
#[derive(Debug, Clone)]
pub struct State {
    engine: ReelEngine,
    direction: Direction,
    tick_interval: TickInterval,
}

impl State {
    /// Opens a story surface over the given items.
    ///
    /// Fails with [`crate::error::Error::EmptySequence`] for an empty
    /// list; the host shows its empty state instead.
    pub fn open(
        items: Vec<MediaItem>,
        start_index: Option<usize>,
        config: &EngineConfig,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            engine: ReelEngine::open(items, start_index, config)?,
            direction: config.direction(),
            tick_interval: config.tick_interval(),
        })
    }

    /// Read access to the engine for rendering.
    #[must_use]
    pub fn engine(&self) -> &ReelEngine {
        &self.engine
    }

    /// Returns the presentation direction of the surface.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Handles one message, returning the event to surface to the host,
    /// if any.
    pub fn update(&mut self, message: Message) -> Option<Event> {
        match message {
            Message::Tick(now) => self.engine.tick(now).map(Event::from),
            Message::HoldPoll(now) => {
                self.engine.poll_hold(now);
                None
            }
            Message::SurfacePressed => {
                self.engine.press(Instant::now());
                None
            }
            Message::SurfaceReleased => self.engine.release(Instant::now()).map(Event::from),
            Message::Next => self
                .engine
                .apply_intent(self.spatial_intent(true))
                .map(Event::from),
            Message::Previous => self
                .engine
                .apply_intent(self.spatial_intent(false))
                .map(Event::from),
            Message::JumpTo(index) => self.engine.jump_to(index).map(Event::from),
            Message::TogglePlay => {
                self.engine.toggle_play();
                None
            }
            Message::ToggleMute => {
                self.engine.toggle_mute();
                None
            }
            Message::Close => self.engine.close().map(Event::from),
            Message::VideoPosition {
                epoch,
                position,
                duration,
            } => {
                self.engine.media_position(epoch, position, duration);
                None
            }
            Message::VideoEnded { epoch } => self.engine.media_ended(epoch).map(Event::from),
            Message::MediaLoadFailed { epoch } => {
                self.engine.media_load_failed(epoch);
                None
            }
            Message::RawEvent(raw) => {
                if let event::Event::Keyboard(keyboard_event) = raw {
                    if let Some(message) = keymap::message_for(&keyboard_event) {
                        return self.update(message);
                    }
                }
                None
            }
        }
    }

    /// Builds the timing and input subscriptions for the current state.
    ///
    /// Every timing source the engine relies on lives here; a source is
    /// cancelled by not being part of the batch on the next call, which
    /// the runtime performs after each update. Nothing survives
    /// [`Message::Close`].
    pub fn subscription(&self) -> Subscription<Message> {
        let tick = if self.engine.should_tick() {
            iced::time::every(self.tick_interval.as_duration()).map(Message::Tick)
        } else {
            Subscription::none()
        };

        let hold_poll = if self.engine.hold_poll_pending() {
            iced::time::every(Duration::from_millis(HOLD_POLL_INTERVAL_MS)).map(Message::HoldPoll)
        } else {
            Subscription::none()
        };

        let keyboard = if self.engine.is_closed() {
            Subscription::none()
        } else {
            event::listen_with(|raw, status, _window| match status {
                event::Status::Ignored => Some(Message::RawEvent(raw)),
                event::Status::Captured => None,
            })
        };

        Subscription::batch([tick, hold_poll, keyboard])
    }

    /// Maps a spatial control (`toward_right`: the right-hand arrow) to
    /// the matching navigation intent. Under right-to-left presentation
    /// the controls swap, so "forward" follows the reading order.
    fn spatial_intent(&self, toward_right: bool) -> Intent {
        let forward = toward_right != self.direction.is_rtl();
        if forward {
            Intent::Advance
        } else {
            Intent::Retreat
        }
    }
}
