// SPDX-License-Identifier: MPL-2.0
//! Iced integration: the story-surface component and its keyboard
//! adapter. Painting stays with the host application.

pub mod component;
pub mod keymap;

pub use component::{Event, Message, State};
