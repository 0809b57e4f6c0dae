// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all engine tunables.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Item duration**: Fixed-duration timing budget for static media
//! - **Tick interval**: Resolution of the periodic progress tick
//! - **Hold threshold**: Press duration separating a tap from a hold

// ==========================================================================
// Item Duration Defaults
// ==========================================================================

/// Default on-screen budget for a static item (in milliseconds).
pub const DEFAULT_ITEM_DURATION_MS: u64 = 5000;

/// Minimum allowed item duration.
pub const MIN_ITEM_DURATION_MS: u64 = 500;

/// Maximum allowed item duration.
pub const MAX_ITEM_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Tick Interval Defaults
// ==========================================================================

/// Default resolution of the fixed-duration progress tick (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Minimum allowed tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Maximum allowed tick interval.
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

// ==========================================================================
// Hold Threshold Defaults
// ==========================================================================

/// Default press duration required to interpret a gesture as a hold
/// rather than a tap (in milliseconds).
pub const DEFAULT_HOLD_THRESHOLD_MS: u64 = 200;

/// Minimum allowed hold threshold.
pub const MIN_HOLD_THRESHOLD_MS: u64 = 50;

/// Maximum allowed hold threshold.
pub const MAX_HOLD_THRESHOLD_MS: u64 = 2000;

/// Interval at which a pending press is polled for promotion to a hold
/// (in milliseconds). Not configurable; it only bounds how late the
/// visible "paused" indicator can appear after the threshold elapses.
pub const HOLD_POLL_INTERVAL_MS: u64 = 25;
