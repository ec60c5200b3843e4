//! Notification queue
//!
//! State transitions append to the queue; whoever renders the app drains it.

use crate::game::GameEvent;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<GameEvent> for Notification {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::LevelUp { level, title } => Notification::success(
                "Level Up! 🎉",
                format!("You reached level {}: {}", level, title),
            ),
            GameEvent::AchievementUnlocked {
                title, description, ..
            } => Notification::success(
                "Achievement Unlocked! 🏆",
                format!("{}: {}", title, description),
            ),
            GameEvent::StreakExtended { days } => Notification::success(
                format!("{} Day Streak! 🔥", days),
                format!("You've logged in for {} days in a row!", days),
            ),
        }
    }
}

pub struct NotificationQueue {
    items: VecDeque<Notification>,
    enabled: bool,
}

impl NotificationQueue {
    pub fn new(enabled: bool) -> Self {
        Self {
            items: VecDeque::new(),
            enabled,
        }
    }

    /// Dropped silently when notifications are turned off
    pub fn push(&mut self, notification: Notification) {
        if self.enabled {
            self.items.push_back(notification);
        }
    }

    pub fn extend_from_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            self.push(event.into());
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(true)
    }
}
