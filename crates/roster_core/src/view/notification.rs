//! Transient status notifications.
//!
//! Each call to [`NotificationCenter::push`] creates an independent entry
//! with its own expiry; entries are never merged. Time is supplied by the
//! caller so expiry has no effect on roster state.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a notification stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(1800);
/// Fade-out interval after the display duration.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    FadingOut,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn phase(&self, now: Instant, display: Duration, fade: Duration) -> NotificationPhase {
        let age = now.saturating_duration_since(self.created_at);
        if age < display {
            NotificationPhase::Visible
        } else if age < display + fade {
            NotificationPhase::FadingOut
        } else {
            NotificationPhase::Expired
        }
    }

    /// Time left until the entry disappears entirely.
    pub fn remaining(&self, now: Instant, display: Duration, fade: Duration) -> Duration {
        let age = now.saturating_duration_since(self.created_at);
        (display + fade).saturating_sub(age)
    }
}

/// Collection of live notifications.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    display: Duration,
    fade: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DISPLAY_DURATION, FADE_DURATION)
    }
}

impl NotificationCenter {
    pub fn new(display: Duration, fade: Duration) -> Self {
        Self {
            items: Vec::new(),
            display,
            fade,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Notification {
            id,
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn phase(&self, id: Uuid, now: Instant) -> Option<NotificationPhase> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.phase(now, self.display, self.fade))
    }

    pub fn remaining(&self, item: &Notification, now: Instant) -> Duration {
        item.remaining(now, self.display, self.fade)
    }

    /// Entries not yet expired at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.items
            .iter()
            .filter(move |item| item.phase(now, self.display, self.fade) != NotificationPhase::Expired)
    }

    /// Drops expired entries and returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let (display, fade) = (self.display, self.fade);
        self.items
            .retain(|item| item.phase(now, display, fade) != NotificationPhase::Expired);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
