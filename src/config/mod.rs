// SPDX-License-Identifier: MPL-2.0
//! Engine configuration: timing tunables, presentation direction, and
//! loading/saving of preferences to a `settings.toml` file.
//!
//! All timing tunables are wrapped in clamping newtypes so that a value
//! read from disk (or passed in by the host) is always within its valid
//! range by the time the engine sees it.
//!
//! # Examples
//!
//! ```no_run
//! use iced_reel::config;
//!
//! // Load existing configuration (falls back to defaults)
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.item_duration_ms = Some(3000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedReel";

/// Horizontal presentation direction of the story surface.
///
/// Under [`Direction::RightToLeft`] the previous/next controls (and the
/// arrow keys) swap, so that "forward" always follows the reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Left-to-right presentation (forward is to the right).
    #[default]
    LeftToRight,
    /// Right-to-left presentation (forward is to the left).
    RightToLeft,
}

impl Direction {
    /// Returns true for right-to-left presentation.
    #[must_use]
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

/// Fixed-duration timing budget for one static item, in milliseconds.
///
/// The newtype enforces validity at the type level, ensuring the value
/// is always within the valid range.
///
/// # Example
///
/// ```
/// use iced_reel::config::ItemDuration;
///
/// let duration = ItemDuration::new(3000);
/// assert_eq!(duration.value(), 3000);
///
/// // Values outside range are clamped
/// let too_low = ItemDuration::new(1);
/// assert_eq!(too_low.value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDuration(u64);

impl ItemDuration {
    /// Creates a new item duration, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_ITEM_DURATION_MS, MAX_ITEM_DURATION_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the budget as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ItemDuration {
    fn default() -> Self {
        Self(DEFAULT_ITEM_DURATION_MS)
    }
}

/// Resolution of the periodic progress tick, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval(u64);

impl TickInterval {
    /// Creates a new tick interval, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the interval as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(DEFAULT_TICK_INTERVAL_MS)
    }
}

/// Minimum press duration interpreted as a hold, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldThreshold(u64);

impl HoldThreshold {
    /// Creates a new hold threshold, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_HOLD_THRESHOLD_MS, MAX_HOLD_THRESHOLD_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the threshold as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HoldThreshold {
    fn default() -> Self {
        Self(DEFAULT_HOLD_THRESHOLD_MS)
    }
}

/// Engine preferences as persisted on disk.
///
/// Fields are optional so that a partial file (or an older version of it)
/// still deserializes; the typed accessors apply defaults and clamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed-duration budget for static items, in milliseconds.
    #[serde(default)]
    pub item_duration_ms: Option<u64>,
    /// Resolution of the periodic progress tick, in milliseconds.
    #[serde(default)]
    pub tick_interval_ms: Option<u64>,
    /// Tap/hold boundary, in milliseconds.
    #[serde(default)]
    pub hold_threshold_ms: Option<u64>,
    /// Presentation direction of the story surface.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Whether audio starts muted when a sequence opens.
    #[serde(default)]
    pub start_muted: Option<bool>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            item_duration_ms: Some(DEFAULT_ITEM_DURATION_MS),
            tick_interval_ms: Some(DEFAULT_TICK_INTERVAL_MS),
            hold_threshold_ms: Some(DEFAULT_HOLD_THRESHOLD_MS),
            direction: Some(Direction::LeftToRight),
            start_muted: Some(true),
        }
    }
}

impl EngineConfig {
    /// Returns the clamped item duration.
    #[must_use]
    pub fn item_duration(&self) -> ItemDuration {
        self.item_duration_ms
            .map(ItemDuration::new)
            .unwrap_or_default()
    }

    /// Returns the clamped tick interval.
    #[must_use]
    pub fn tick_interval(&self) -> TickInterval {
        self.tick_interval_ms
            .map(TickInterval::new)
            .unwrap_or_default()
    }

    /// Returns the clamped hold threshold.
    #[must_use]
    pub fn hold_threshold(&self) -> HoldThreshold {
        self.hold_threshold_ms
            .map(HoldThreshold::new)
            .unwrap_or_default()
    }

    /// Returns the presentation direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    /// Returns whether audio starts muted.
    #[must_use]
    pub fn start_muted(&self) -> bool {
        self.start_muted.unwrap_or(true)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the platform config directory, falling
/// back to defaults when no file exists.
pub fn load() -> Result<EngineConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(EngineConfig::default())
}

/// Saves the configuration to the platform config directory.
pub fn save(config: &EngineConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Saves the configuration to a specific path, creating parent
/// directories as needed.
pub fn save_to_path(config: &EngineConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
