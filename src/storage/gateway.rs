//! Storage gateway
//!
//! Typed access to the named blobs the app persists. Transactions, budget and
//! conversation are seeded with defaults the first time they are read.

use crate::assistant::conversation::Conversation;
use crate::game::{Achievement, GameState};
use crate::models::{MonthlyBudget, Theme, Transaction, User};
use crate::storage::{defaults, KeyValueStore};
use crate::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

pub const TRANSACTIONS_KEY: &str = "budget_buddy_transactions";
pub const BUDGET_KEY: &str = "budget_buddy_budget";
pub const CONVERSATION_KEY: &str = "budget_buddy_conversation";
pub const THEME_KEY: &str = "budget_buddy_theme";
pub const USER_KEY: &str = "budget_buddy_user";
pub const POINTS_KEY: &str = "budget_buddy_points";
pub const LEVEL_KEY: &str = "budget_buddy_level";
pub const STREAK_KEY: &str = "budget_buddy_streak";
pub const ACHIEVEMENTS_KEY: &str = "budget_buddy_achievements";
pub const LAST_LOGIN_KEY: &str = "budget_buddy_last_login";

#[derive(Clone)]
pub struct StorageGateway {
    store: Arc<dyn KeyValueStore>,
    /// Date the seed dataset is stamped with
    seed_date: NaiveDate,
}

impl StorageGateway {
    pub fn new(store: Arc<dyn KeyValueStore>, seed_date: NaiveDate) -> Self {
        Self { store, seed_date }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?).await
    }

    /// Read `key`, or persist and return `seed()` when absent
    async fn read_or_seed<T, F>(&self, key: &str, seed: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.read(key).await? {
            return Ok(existing);
        }

        let seeded = seed();
        self.write(key, &seeded).await?;
        info!(key, "Seeded default data");
        Ok(seeded)
    }

    // =============================
    // Transactions / Budget
    // =============================

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        let today = self.seed_date;
        self.read_or_seed(TRANSACTIONS_KEY, || defaults::default_transactions(today))
            .await
    }

    pub async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        debug!(count = transactions.len(), "Saving transactions");
        self.write(TRANSACTIONS_KEY, &transactions).await
    }

    pub async fn budget(&self) -> Result<MonthlyBudget> {
        let today = self.seed_date;
        self.read_or_seed(BUDGET_KEY, || defaults::default_budget(today)).await
    }

    pub async fn save_budget(&self, budget: &MonthlyBudget) -> Result<()> {
        self.write(BUDGET_KEY, budget).await
    }

    // =============================
    // Conversation
    // =============================

    pub async fn conversation(&self) -> Result<Conversation> {
        self.read_or_seed(CONVERSATION_KEY, defaults::default_conversation)
            .await
    }

    /// Thinking placeholders are never written
    pub async fn save_conversation(&self, conversation: &Conversation) -> Result<()> {
        let mut persisted = conversation.clone();
        persisted.strip_thinking();
        self.write(CONVERSATION_KEY, &persisted).await
    }

    // =============================
    // Preferences / User
    // =============================

    pub async fn theme(&self) -> Result<Theme> {
        Ok(self.read(THEME_KEY).await?.unwrap_or_default())
    }

    pub async fn save_theme(&self, theme: Theme) -> Result<()> {
        self.write(THEME_KEY, &theme).await
    }

    pub async fn user(&self) -> Result<Option<User>> {
        self.read(USER_KEY).await
    }

    pub async fn save_user(&self, user: &User) -> Result<()> {
        self.write(USER_KEY, user).await
    }

    pub async fn clear_user(&self) -> Result<()> {
        self.store.remove(USER_KEY).await
    }

    // =============================
    // Gamification Counters
    // =============================

    /// Each counter lives under its own key; absent counters take defaults.
    pub async fn game_state(&self) -> Result<GameState> {
        let defaults = GameState::default();

        let state = GameState {
            points: self.read(POINTS_KEY).await?.unwrap_or(defaults.points),
            level: self.read(LEVEL_KEY).await?.unwrap_or(defaults.level),
            streak: self.read(STREAK_KEY).await?.unwrap_or(defaults.streak),
            last_visit: self.read::<NaiveDate>(LAST_LOGIN_KEY).await?,
            achievements: self
                .read::<Vec<Achievement>>(ACHIEVEMENTS_KEY)
                .await?
                .unwrap_or(defaults.achievements),
        };

        Ok(state.normalized())
    }

    pub async fn save_game_state(&self, state: &GameState) -> Result<()> {
        self.write(POINTS_KEY, &state.points).await?;
        self.write(LEVEL_KEY, &state.level).await?;
        self.write(STREAK_KEY, &state.streak).await?;
        self.write(ACHIEVEMENTS_KEY, &state.achievements).await?;
        match state.last_visit {
            Some(date) => self.write(LAST_LOGIN_KEY, &date).await?,
            None => self.store.remove(LAST_LOGIN_KEY).await?,
        }
        Ok(())
    }
}
