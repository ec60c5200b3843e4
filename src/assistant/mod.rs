//! Scripted financial assistant
//!
//! Keyword-selected reply templates rendered from the current financial
//! snapshot, a conversation model with transient "thinking" placeholders, and
//! the timer that rotates those placeholders while a reply is pending.

pub mod conversation;
pub mod selector;
pub mod suggestions;
pub mod templates;
pub mod thinking;

pub use conversation::{Conversation, Message, Sender};
pub use selector::{classify, respond, Intent};
pub use suggestions::suggestions;
pub use thinking::{ThinkingTimer, THINKING_MESSAGES};

use std::sync::Arc;
use tokio::sync::watch;

/// Opening message of a reset conversation
pub const WELCOME_MESSAGE: &str = r#"Hello! 👋 I'm your Budget Buddy AI assistant, here to help you reach your financial goals!

I can analyze your spending, suggest budgets, provide savings tips, and answer your financial questions. Try asking me something like:
- "How can I save more money this month?"
- "Analyze my spending patterns"
- "Help me create a budget plan"
- "What are my top expense categories?"

What would you like help with today?"#;

/// Reply shown when preparing an answer fails
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again later.";

/// How a call to `ask` ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Answered(Message),
    Cancelled,
    Failed(Message),
}

impl ReplyOutcome {
    pub fn message(&self) -> Option<&Message> {
        match self {
            ReplyOutcome::Answered(m) | ReplyOutcome::Failed(m) => Some(m),
            ReplyOutcome::Cancelled => None,
        }
    }
}

/// Handle for abandoning the pending reply. Cloneable; a cancel only affects
/// the reply in flight when it is sent.
#[derive(Clone)]
pub struct ReplyCanceller {
    tx: Arc<watch::Sender<bool>>,
}

impl ReplyCanceller {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Re-arm for a new reply and hand back a receiver watching it
    pub(crate) fn arm(&self) -> watch::Receiver<bool> {
        self.tx.send_replace(false);
        self.tx.subscribe()
    }
}

/// Resolves once `cancel` has been called on the handle behind `rx`
pub(crate) async fn cancelled(rx: &mut watch::Receiver<bool>) {
    // a dropped sender never fires
    if rx.wait_for(|flag| *flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}
