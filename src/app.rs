//! Application session
//!
//! `BudgetBuddy` owns everything a running session needs: the storage
//! gateway, the gamification engine, the shared conversation and the
//! notification queue. Every mutation is a read-modify-write against the
//! store followed by a game-state save.

use crate::assistant::{
    self, cancelled, Conversation, Message, ReplyCanceller, ReplyOutcome, ThinkingTimer,
    ERROR_REPLY, WELCOME_MESSAGE,
};
use crate::auth::{self, AuthAction};
use crate::config::AppConfig;
use crate::error::BuddyError;
use crate::export::{self, ExportDocument};
use crate::game::achievements::AI_ASSISTANT;
use crate::game::{create_default_rules, Activity, AchievementRules, GameEngine, GameState};
use crate::ledger::{NewTransaction, Rejection, TransactionFilter};
use crate::metrics::{self, BudgetComparison, ChartSlice, FinancialSnapshot};
use crate::models::{Category, MonthlyBudget, Theme, Transaction, TransactionType, User};
use crate::notifications::{Notification, NotificationQueue};
use crate::storage::{FileStore, InMemoryStore, KeyValueStore, StorageGateway};
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Points for logging a transaction
const TRANSACTION_POINTS: i64 = 5;
/// One-off bonus the first time the assistant is asked something
const FIRST_QUESTION_POINTS: i64 = 5;
/// Points per answered question
const REPLY_POINTS: i64 = 3;
/// Transactions listed on the dashboard
const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub chart: Vec<ChartSlice>,
    /// Newest first
    pub recent: Vec<Transaction>,
}

pub struct BudgetBuddy {
    gateway: StorageGateway,
    config: AppConfig,
    today: NaiveDate,
    game: GameEngine,
    rules: AchievementRules,
    conversation: Arc<RwLock<Conversation>>,
    notifications: NotificationQueue,
    canceller: ReplyCanceller,
}

impl BudgetBuddy {
    /// Open the configured store (file-backed when a data directory is set)
    pub async fn open(config: AppConfig, today: NaiveDate) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir.clone()).await?),
            None => {
                warn!("No data directory configured, session will not be saved");
                Arc::new(InMemoryStore::new())
            }
        };
        Self::init(store, config, today).await
    }

    /// Load persisted state and run the once-per-day streak check
    pub async fn init(store: Arc<dyn KeyValueStore>, config: AppConfig, today: NaiveDate) -> Result<Self> {
        let gateway = StorageGateway::new(store, today);

        let mut game =
            GameEngine::new(gateway.game_state().await?).with_notifications(config.notifications);
        let streak = game.evaluate_daily_streak(today);
        let conversation = gateway.conversation().await?;

        info!(
            %today,
            points = game.points(),
            level = game.level(),
            streak = game.streak(),
            outcome = ?streak,
            "Session started"
        );

        let mut session = Self {
            gateway,
            notifications: NotificationQueue::new(config.notifications),
            config,
            today,
            game,
            rules: create_default_rules(),
            conversation: Arc::new(RwLock::new(conversation)),
            canceller: ReplyCanceller::new(),
        };
        session.persist_game().await?;
        Ok(session)
    }

    /// Persist game counters and the conversation, then end the session
    pub async fn shutdown(mut self) -> Result<()> {
        self.persist_game().await?;
        self.persist_conversation().await?;
        info!(points = self.game.points(), "Session closed");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn game_state(&self) -> &GameState {
        self.game.state()
    }

    async fn persist_game(&mut self) -> Result<()> {
        self.notifications.extend_from_events(self.game.take_events());
        self.gateway.save_game_state(self.game.state()).await
    }

    async fn persist_conversation(&self) -> Result<()> {
        let conversation = self.conversation.read().await;
        self.gateway.save_conversation(&conversation).await
    }

    // =============================
    // Auth
    // =============================

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.authenticate(AuthAction::Login, email, password).await
    }

    pub async fn signup(&mut self, email: &str, password: &str) -> Result<User> {
        self.authenticate(AuthAction::Signup, email, password).await
    }

    async fn authenticate(&mut self, action: AuthAction, email: &str, password: &str) -> Result<User> {
        let user = auth::authenticate(email, password)?;
        self.gateway.save_user(&user).await?;
        self.notifications.push(action.welcome());
        info!(email = %user.email, ?action, "User signed in");
        Ok(user)
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.gateway.clear_user().await?;
        self.notifications.push(auth::logout_notice());
        info!("User signed out");
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<User>> {
        self.gateway.user().await
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.current_user().await?.is_some())
    }

    // =============================
    // Transactions
    // =============================

    pub async fn add_transaction(&mut self, input: NewTransaction) -> Result<Transaction> {
        let transaction = match input.into_transaction() {
            Ok(tx) => tx,
            Err(rejection) => {
                warn!(reason = rejection.message(), "Transaction rejected");
                self.notifications
                    .push(Notification::error(rejection.title(), rejection.message()));
                return Err(rejection.into());
            }
        };

        let mut transactions = self.gateway.transactions().await?;
        transactions.push(transaction.clone());
        self.gateway.save_transactions(&transactions).await?;

        info!(
            id = %transaction.id,
            amount = transaction.amount,
            category = %transaction.category,
            "Transaction added"
        );

        self.game.add_points(TRANSACTION_POINTS);
        self.game.check_achievements(
            &self.rules,
            &Activity::TransactionAdded {
                transactions: &transactions,
            },
        );
        self.persist_game().await?;

        let direction = match transaction.kind {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        self.notifications.push(Notification::success(
            "Transaction added",
            format!(
                "{} of {} added successfully",
                direction,
                metrics::format_currency(transaction.amount)
            ),
        ));

        Ok(transaction)
    }

    pub async fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let mut transactions = self.gateway.transactions().await?;
        let index = transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| BuddyError::NotFound(format!("transaction {}", id)))?;

        let removed = transactions.remove(index);
        self.gateway.save_transactions(&transactions).await?;

        info!(id, "Transaction deleted");
        self.notifications.push(Notification::info(
            "Transaction deleted",
            "Transaction has been permanently removed",
        ));
        Ok(removed)
    }

    pub async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(filter.apply(&self.gateway.transactions().await?))
    }

    // =============================
    // Budget
    // =============================

    pub async fn monthly_budget(&self) -> Result<MonthlyBudget> {
        self.gateway.budget().await
    }

    pub async fn set_budget(&mut self, category: Category, amount: f64) -> Result<MonthlyBudget> {
        if !amount.is_finite() || amount < 0.0 {
            const REASON: &str = "Budget amount must be zero or a positive number";
            warn!(%category, amount, "Budget rejected");
            self.notifications
                .push(Notification::error(Rejection::InvalidAmount.title(), REASON));
            return Err(BuddyError::validation(REASON));
        }

        let mut budget = self.gateway.budget().await?;
        let created = budget.upsert(category, amount);
        self.gateway.save_budget(&budget).await?;

        debug!(%category, amount, created, "Budget updated");

        self.game
            .check_achievements(&self.rules, &Activity::BudgetSaved { budget: &budget });
        self.persist_game().await?;

        Ok(budget)
    }

    /// Nudge toward budgeting the highest-spending category. Nothing is
    /// queued when there are no expenses.
    pub async fn budget_tip(&mut self) -> Result<Option<Notification>> {
        let Some((top, _)) = self.snapshot().await?.top_category() else {
            return Ok(None);
        };

        let tip = Notification::info(
            "Budget Tip",
            format!(
                "You spend most on {}. Consider setting a budget for this category.",
                top
            ),
        );
        self.notifications.push(tip.clone());
        Ok(Some(tip))
    }

    pub async fn budget_vs_actual(&self) -> Result<Vec<BudgetComparison>> {
        let transactions = self.gateway.transactions().await?;
        let budget = self.gateway.budget().await?;
        Ok(metrics::budget_vs_actual(&transactions, &budget.budgets))
    }

    // =============================
    // Dashboard
    // =============================

    pub async fn snapshot(&self) -> Result<FinancialSnapshot> {
        let transactions = self.gateway.transactions().await?;
        Ok(FinancialSnapshot::from_transactions(&transactions))
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let transactions = self.gateway.transactions().await?;
        let snapshot = FinancialSnapshot::from_transactions(&transactions);

        let mut recent = TransactionFilter::all().apply(&transactions);
        recent.truncate(RECENT_TRANSACTIONS);

        Ok(Dashboard {
            income: snapshot.income,
            expenses: snapshot.expenses,
            balance: snapshot.balance,
            chart: metrics::category_chart_data(&transactions),
            recent,
        })
    }

    // =============================
    // Assistant
    // =============================

    /// Handle for abandoning the reply currently being prepared
    pub fn canceller(&self) -> ReplyCanceller {
        self.canceller.clone()
    }

    /// Shared view of the conversation, updated live while thinking
    pub fn conversation_handle(&self) -> Arc<RwLock<Conversation>> {
        self.conversation.clone()
    }

    pub async fn conversation(&self) -> Conversation {
        self.conversation.read().await.clone()
    }

    /// Post a question and wait for the reply.
    ///
    /// Placeholders rotate for the configured delay; the reply is rendered from
    /// the data as it stands once the delay elapses. Thinking placeholders are
    /// gone from the conversation on every exit path.
    pub async fn ask(&mut self, query: &str) -> Result<ReplyOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BuddyError::validation("Message is empty"));
        }
        let mut cancel_rx = self.canceller.arm();

        let first_question = {
            let mut conversation = self.conversation.write().await;
            let first = conversation.is_untouched();
            conversation.push(Message::user(query));
            first
        };
        self.persist_conversation().await?;

        if first_question {
            self.game.unlock_achievement(AI_ASSISTANT);
            self.game.add_points(FIRST_QUESTION_POINTS);
            self.persist_game().await?;
        }

        debug!(query, first_question, "Assistant question received");

        let mut timer =
            ThinkingTimer::start(self.conversation.clone(), self.config.thinking_interval).await;

        let was_cancelled = tokio::select! {
            _ = tokio::time::sleep(self.config.reply_delay) => false,
            _ = cancelled(&mut cancel_rx) => true,
        };
        timer.stop().await;

        if was_cancelled {
            self.conversation.write().await.strip_thinking();
            self.persist_conversation().await?;
            info!("Assistant reply cancelled");
            return Ok(ReplyOutcome::Cancelled);
        }

        let outcome = match self.compose_reply(query).await {
            Ok(text) => {
                let reply = Message::assistant(text);
                self.game.add_points(REPLY_POINTS);
                info!(intent = ?assistant::classify(query), "Assistant replied");
                ReplyOutcome::Answered(reply)
            }
            Err(e) => {
                error!(error = %e, "Error generating assistant reply");
                ReplyOutcome::Failed(Message::assistant(ERROR_REPLY))
            }
        };

        {
            let mut conversation = self.conversation.write().await;
            conversation.strip_thinking();
            if let Some(message) = outcome.message() {
                conversation.push(message.clone());
            }
        }
        self.persist_conversation().await?;
        self.persist_game().await?;

        Ok(outcome)
    }

    async fn compose_reply(&self, query: &str) -> Result<String> {
        let snapshot = self.snapshot().await?;
        Ok(assistant::respond(query, &snapshot))
    }

    /// Replace the conversation with a fresh one holding the welcome message
    pub async fn reset_conversation(&mut self) -> Result<()> {
        *self.conversation.write().await = Conversation::with_greeting(WELCOME_MESSAGE);
        self.persist_conversation().await?;
        info!("Conversation reset");
        Ok(())
    }

    pub async fn suggestions(&self) -> Result<Vec<String>> {
        Ok(assistant::suggestions(&self.snapshot().await?))
    }

    // =============================
    // Theme
    // =============================

    pub async fn theme(&self) -> Result<Theme> {
        self.gateway.theme().await
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.gateway.theme().await?.toggled();
        self.gateway.save_theme(theme).await?;
        debug!(?theme, "Theme toggled");
        Ok(theme)
    }

    // =============================
    // Export / Import
    // =============================

    pub async fn export_transactions(&self) -> Result<ExportDocument> {
        let transactions = self.gateway.transactions().await?;
        let document = export::export_transactions(&transactions, self.today)?;
        info!(file = %document.file_name, count = transactions.len(), "Transactions exported");
        Ok(document)
    }

    /// Replace the stored list with an exported one. Returns the new count.
    pub async fn import_transactions(&mut self, json: &str) -> Result<usize> {
        let transactions = export::import_transactions(json)?;
        self.gateway.save_transactions(&transactions).await?;
        info!(count = transactions.len(), "Transactions imported");
        Ok(transactions.len())
    }

    // =============================
    // Notifications
    // =============================

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
