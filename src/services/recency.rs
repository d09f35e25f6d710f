//! Notification window policy.

use chrono::Utc;

use crate::models::{Post, RecencyConfig};

/// Width of the notification window.
pub const WINDOW_MILLIS: i64 = 3_600_000;

/// Subtracted from the wall clock to line up with the forum's timestamps (Europe/Berlin).
pub const CLOCK_OFFSET_MILLIS: i64 = 3_600_000;

/// Decides whether a post is recent enough to announce.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    window_millis: i64,
    clock_offset_millis: i64,
}

impl RecencyFilter {
    pub fn new(window_millis: i64, clock_offset_millis: i64) -> Self {
        Self {
            window_millis,
            clock_offset_millis,
        }
    }

    pub fn from_config(config: &RecencyConfig) -> Self {
        Self::new(config.window_millis, config.clock_offset_millis)
    }

    /// The adjusted "now": wall-clock epoch millis minus the clock offset.
    pub fn now_millis(&self) -> i64 {
        self.adjust(Utc::now().timestamp_millis())
    }

    /// Apply the clock offset to a raw epoch-millis instant.
    pub fn adjust(&self, wall_clock_millis: i64) -> i64 {
        wall_clock_millis - self.clock_offset_millis
    }

    /// `timestamp + window >= now`, with `now` already adjusted.
    pub fn is_recent(&self, timestamp_millis: i64, now_millis: i64) -> bool {
        timestamp_millis.saturating_add(self.window_millis) >= now_millis
    }

    pub fn qualifies(&self, post: &Post, now_millis: i64) -> bool {
        self.is_recent(post.timestamp_millis(), now_millis)
    }
}

impl Default for RecencyFilter {
    fn default() -> Self {
        Self::new(WINDOW_MILLIS, CLOCK_OFFSET_MILLIS)
    }
}
