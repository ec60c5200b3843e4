//! Achievement catalog

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AchievementIcon {
    Sparkles,
    Trophy,
    Star,
    Medal,
}

/// A one-time milestone carrying a fixed point reward
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub unlocked: bool,
    pub points: u64,
}

pub const FIRST_LOGIN: &str = "first_login";
pub const ADD_TRANSACTION: &str = "add_transaction";
pub const CREATE_BUDGET: &str = "create_budget";
pub const SAVE_MONEY: &str = "save_money";
pub const STREAK_3: &str = "streak_3";
pub const STREAK_7: &str = "streak_7";
pub const LEVEL_5: &str = "level_5";
pub const AI_ASSISTANT: &str = "ai_assistant";

/// (id, title, description, icon, reward)
const CATALOG: &[(&str, &str, &str, AchievementIcon, u64)] = &[
    (FIRST_LOGIN, "First Login", "Log in to Budget Buddy for the first time", AchievementIcon::Sparkles, 10),
    (ADD_TRANSACTION, "Transaction Tracker", "Add your first transaction", AchievementIcon::Star, 15),
    (CREATE_BUDGET, "Budget Builder", "Create your first budget category", AchievementIcon::Trophy, 20),
    (SAVE_MONEY, "Saving Star", "Save money for the first time", AchievementIcon::Medal, 25),
    (STREAK_3, "Consistency is Key", "Maintain a 3-day streak", AchievementIcon::Sparkles, 30),
    (STREAK_7, "Week Warrior", "Maintain a 7-day streak", AchievementIcon::Trophy, 50),
    (LEVEL_5, "Rising Star", "Reach level 5", AchievementIcon::Star, 100),
    (AI_ASSISTANT, "AI Apprentice", "Use the AI assistant for the first time", AchievementIcon::Sparkles, 20),
];

/// All achievements, locked
pub fn initial_achievements() -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|(id, title, description, icon, points)| Achievement {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: *icon,
            unlocked: false,
            points: *points,
        })
        .collect()
}

/// Reconcile a stored achievement list with the catalog.
///
/// Unlock flags are kept for known ids; catalog entries missing from storage
/// are appended locked; unknown stored ids are dropped.
pub fn merge_with_catalog(stored: Vec<Achievement>) -> Vec<Achievement> {
    initial_achievements()
        .into_iter()
        .map(|mut base| {
            if let Some(saved) = stored.iter().find(|a| a.id == base.id) {
                base.unlocked = saved.unlocked;
            }
            base
        })
        .collect()
}
