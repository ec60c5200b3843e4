//! Budget Buddy core
//!
//! Personal finance tracking with a gamified progress layer:
//! - Transactions, monthly category budgets and derived metrics
//! - Points, levels, daily streaks and achievements
//! - A scripted assistant that answers from the user's own numbers
//! - Local key-value persistence (in memory or a directory of JSON files)
//!
//! SESSION FLOW:
//! LOAD → STREAK CHECK → MUTATE → AWARD → PERSIST → NOTIFY

pub mod app;
pub mod assistant;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod notifications;
pub mod storage;

pub use error::{BuddyError, Result};

// Re-export common types
pub use app::{BudgetBuddy, Dashboard};
pub use assistant::{ReplyCanceller, ReplyOutcome};
pub use config::AppConfig;
pub use ledger::{NewTransaction, TransactionFilter};
pub use models::*;
pub use notifications::Notification;
