//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// A mutation went through.
    Success,
    /// Something failed.
    Error,
}

/// A toast shown in the corner until its duration elapses.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Body text.
    pub message: String,
    /// When the toast first became visible.
    pub displayed_at: Option<Instant>,
    /// How long it stays visible.
    pub duration: Duration,
}

impl Notification {
    /// Creates new toast with the default three second lifetime.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            displayed_at: None,
            duration: Duration::from_secs(3),
        }
    }

    /// Overrides the lifetime.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns whether the toast was shown for its whole lifetime.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the lifetime clock on first display.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }

    /// Returns the popup title for the level.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.level {
            NotificationLevel::Info => "Info",
            NotificationLevel::Success => "Success",
            NotificationLevel::Error => "Error",
        }
    }
}
