//! Thinking placeholder rotation
//!
//! While a reply is pending, a background task swaps the conversation's
//! placeholder for the next entry of [`THINKING_MESSAGES`] once per period,
//! starting one period in.

use crate::assistant::conversation::{Conversation, Message};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::trace;

pub const THINKING_MESSAGES: [&str; 5] = [
    "Analyzing financial data...",
    "Calculating spending patterns...",
    "Identifying budget opportunities...",
    "Applying financial models...",
    "Generating recommendations...",
];

pub struct ThinkingTimer {
    handle: Option<JoinHandle<()>>,
}

impl ThinkingTimer {
    /// Show the first placeholder after one `period`, then rotate every
    /// `period`. A zero period shows the first placeholder at once and never
    /// rotates.
    pub async fn start(conversation: Arc<RwLock<Conversation>>, period: Duration) -> Self {
        if period.is_zero() {
            conversation
                .write()
                .await
                .replace_thinking(Message::thinking(THINKING_MESSAGES[0]));
            return Self { handle: None };
        }

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            let mut index = 0;
            loop {
                ticker.tick().await;
                conversation
                    .write()
                    .await
                    .replace_thinking(Message::thinking(THINKING_MESSAGES[index]));
                trace!(index, "Rotated thinking placeholder");
                index = (index + 1) % THINKING_MESSAGES.len();
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the rotation and wait until the task is gone, so no placeholder
    /// can be written after this returns.
    pub async fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ThinkingTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(conversation: &Conversation) -> Option<String> {
        conversation.thinking().map(|m| m.content.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotates_once_per_period() {
        let conversation = Arc::new(RwLock::new(Conversation::with_greeting("hi")));
        let mut timer = ThinkingTimer::start(conversation.clone(), Duration::from_secs(1)).await;

        // nothing until the first period has elapsed
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(placeholder(&*conversation.read().await).is_none());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(
            placeholder(&*conversation.read().await).as_deref(),
            Some(THINKING_MESSAGES[0])
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            placeholder(&*conversation.read().await).as_deref(),
            Some(THINKING_MESSAGES[1])
        );

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            placeholder(&*conversation.read().await).as_deref(),
            Some(THINKING_MESSAGES[4])
        );

        // wraps around after the fifth entry
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            placeholder(&*conversation.read().await).as_deref(),
            Some(THINKING_MESSAGES[0])
        );

        // never more than one placeholder at a time
        assert_eq!(conversation.read().await.message_count(), 2);

        timer.stop().await;
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_timer_writes_nothing() {
        let conversation = Arc::new(RwLock::new(Conversation::with_greeting("hi")));
        let mut timer = ThinkingTimer::start(conversation.clone(), Duration::from_secs(1)).await;
        timer.stop().await;

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(conversation.read().await.thinking().is_none());
    }

    #[tokio::test]
    async fn test_zero_period_shows_single_placeholder() {
        let conversation = Arc::new(RwLock::new(Conversation::new()));
        let timer = ThinkingTimer::start(conversation.clone(), Duration::ZERO).await;
        assert!(!timer.is_running());
        assert_eq!(conversation.read().await.message_count(), 1);
        assert_eq!(
            placeholder(&*conversation.read().await).as_deref(),
            Some(THINKING_MESSAGES[0])
        );
    }
}
