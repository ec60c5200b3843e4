//! Conversation storage model
//!
//! Ordered assistant messages plus the transient "thinking" placeholders
//! shown while a reply is being prepared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender of a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    /// Placeholder, never persisted
    Thinking,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content)
    }

    pub fn thinking(content: impl Into<String>) -> Self {
        Self::new(Sender::Thinking, content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    /// Fresh conversation opened by a single assistant message
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.push(Message::assistant(greeting));
        conversation
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swap out any previous placeholder for `placeholder`
    pub fn replace_thinking(&mut self, placeholder: Message) {
        self.strip_thinking();
        self.messages.push(placeholder);
    }

    pub fn strip_thinking(&mut self) {
        self.messages.retain(|m| m.sender != Sender::Thinking);
    }

    pub fn thinking(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == Sender::Thinking)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True while the assistant has not been asked anything yet
    pub fn is_untouched(&self) -> bool {
        !self.messages.iter().any(|m| m.sender == Sender::User)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
