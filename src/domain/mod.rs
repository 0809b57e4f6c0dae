// SPDX-License-Identifier: MPL-2.0
//! Pure domain types for the playback engine.
//!
//! These types carry no presentation or timing dependencies; the engine
//! modules build on them and the host maps them to whatever its data
//! layer provides.

pub mod media;
pub mod playback;

pub use media::{MediaItem, MediaKind};
pub use playback::{PlaybackFlags, SessionState};
