// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` is a headless playback engine for ephemeral story/reel
//! sequences, built for Iced applications.
//!
//! It drives timed, auto-advancing presentation of an ordered sequence
//! of mixed image/video items: fixed-duration timing for static media,
//! source-reported timing for video, tap/hold gesture disambiguation,
//! wrap-around navigation, and session flags (play, pause, mute). The
//! engine owns no rendering; the host paints media and progress bars
//! from the read-only accessors and feeds input back as messages.
//!
//! The deterministic core lives in [`engine`]; [`ui`] wires it to
//! Iced's subscriptions and event stream.

#![doc(html_root_url = "https://docs.rs/iced_reel/0.1.0")]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod progress;
pub mod sequence;
pub mod session;
pub mod ui;

pub use config::EngineConfig;
pub use domain::media::{MediaItem, MediaKind};
pub use engine::{EngineEvent, ReelEngine};
pub use error::{Error, Result};
pub use gesture::Intent;
