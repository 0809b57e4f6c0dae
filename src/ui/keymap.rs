// SPDX-License-Identifier: MPL-2.0
//! Keyboard adapter: a thin mapping from key presses to the same
//! messages the on-screen controls raise.
//!
//! Arrow keys are spatial (left-hand and right-hand control), so they
//! pick up right-to-left mirroring for free in the component's update;
//! no mirroring logic lives here.

use super::component::Message;
use iced::keyboard;

/// Maps a keyboard event to a story-surface message, if any.
#[must_use]
pub fn message_for(event: &keyboard::Event) -> Option<Message> {
    let keyboard::Event::KeyPressed { key, .. } = event else {
        return None;
    };
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::Close),
        keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Some(Message::Previous),
        keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Some(Message::Next),
        keyboard::Key::Named(keyboard::key::Named::Space) => Some(Message::TogglePlay),
        keyboard::Key::Character(c) if c.as_str() == "m" => Some(Message::ToggleMute),
        _ => None,
    }
}
