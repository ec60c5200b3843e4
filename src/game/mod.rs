//! Gamification layer
//!
//! Points, levels, daily streaks and one-time achievements.

pub mod achievements;
pub mod engine;
pub mod levels;
pub mod rules;

pub use achievements::{Achievement, AchievementIcon};
pub use engine::{GameEngine, GameEvent, GameState, StreakOutcome};
pub use levels::{Level, LEVELS};
pub use rules::{create_default_rules, Activity, AchievementRule, AchievementRules};
