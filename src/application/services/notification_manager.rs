//! Toast queue.

use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// FIFO of toasts; only the front one is visible.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl NotificationManager {
    /// Creates a manager whose toasts last `default_duration`.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    /// Queues a toast.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    /// Queues an info toast.
    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    /// Queues a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Queues an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    /// Advances the visible toast, dropping it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    /// Returns the visible toast.
    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    /// Returns whether any toast is queued.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_notification_flow() {
        let mut manager = NotificationManager::default();

        manager.success("Activity created successfully!");
        assert!(manager.has_notifications());

        manager.tick();
        let current = manager.current_notification().unwrap();
        assert_eq!(current.level, NotificationLevel::Success);
        assert!(current.displayed_at.is_some());
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::default();
        manager.error("First");
        manager.info("Second");

        assert_eq!(manager.current_notification().unwrap().message, "First");

        manager.tick();

        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());

        manager.tick();

        let second = manager.current_notification().unwrap();
        assert_eq!(second.message, "Second");
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }
}
