//! Gamification state machine
//!
//! (points, level, streak, achievements) is the persistent state.
//! Transitions append `GameEvent`s; they never render anything.

use crate::game::achievements::{self, Achievement, FIRST_LOGIN, LEVEL_5, STREAK_3, STREAK_7};
use crate::game::levels::{self, Level, MILESTONE_LEVEL};
use crate::game::rules::{Activity, AchievementRules};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub points: u64,
    pub level: u32,
    pub streak: u32,
    pub last_visit: Option<NaiveDate>,
    pub achievements: Vec<Achievement>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            streak: 0,
            last_visit: None,
            achievements: achievements::initial_achievements(),
        }
    }
}

impl GameState {
    /// Restore invariants on state read back from storage
    pub fn normalized(mut self) -> Self {
        self.level = levels::level_for_points(self.points).level;
        self.achievements = achievements::merge_with_catalog(self.achievements);
        self
    }

    pub fn level_info(&self) -> &'static Level {
        levels::level_info(self.level)
    }

    pub fn progress_to_next_level(&self) -> f64 {
        levels::progress_to_next_level(self.points, self.level)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievement(id).map(|a| a.unlocked).unwrap_or(false)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

/// Observable transitions for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    LevelUp {
        level: u32,
        title: String,
    },
    AchievementUnlocked {
        id: String,
        title: String,
        description: String,
        points: u64,
    },
    StreakExtended {
        days: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Already visited today
    SameDay,
    Extended(u32),
    /// First visit or a gap of more than one day
    Reset,
}

pub struct GameEngine {
    state: GameState,
    events: Vec<GameEvent>,
    notifications_enabled: bool,
}

impl GameEngine {
    pub fn new(state: GameState) -> Self {
        Self {
            state: state.normalized(),
            events: Vec::new(),
            notifications_enabled: true,
        }
    }

    /// Disabling notifications drops events; state transitions are unchanged.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn points(&self) -> u64 {
        self.state.points
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    /// Add (or, for negative amounts, remove) points and re-evaluate the level
    pub fn add_points(&mut self, amount: i64) {
        self.state.points = if amount >= 0 {
            self.state.points.saturating_add(amount as u64)
        } else {
            self.state.points.saturating_sub(amount.unsigned_abs())
        };

        debug!(amount, points = self.state.points, "Points updated");
        self.sync_level();
    }

    fn sync_level(&mut self) {
        let target = levels::level_for_points(self.state.points);
        if target.level == self.state.level {
            return;
        }

        let previous = self.state.level;
        self.state.level = target.level;

        if target.level > previous {
            info!(from = previous, to = target.level, title = target.title, "Level up");
            self.emit(GameEvent::LevelUp {
                level: target.level,
                title: target.title.to_string(),
            });
        }

        if target.level == MILESTONE_LEVEL {
            self.unlock_achievement(LEVEL_5);
        }
    }

    /// Unlock once and credit the reward. Returns false when nothing changed.
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        let Some(achievement) = self
            .state
            .achievements
            .iter_mut()
            .find(|a| a.id == id && !a.unlocked)
        else {
            return false;
        };

        achievement.unlocked = true;
        let unlocked = achievement.clone();

        info!(id = %unlocked.id, points = unlocked.points, "Achievement unlocked");
        self.add_points(unlocked.points as i64);
        self.emit(GameEvent::AchievementUnlocked {
            id: unlocked.id,
            title: unlocked.title,
            description: unlocked.description,
            points: unlocked.points,
        });

        true
    }

    /// Daily visit bookkeeping, run once per session on load
    pub fn evaluate_daily_streak(&mut self, today: NaiveDate) -> StreakOutcome {
        let last_visit = self.state.last_visit;

        if last_visit == Some(today) {
            return StreakOutcome::SameDay;
        }

        let outcome = match last_visit {
            Some(last) if today.pred_opt() == Some(last) => {
                self.state.streak += 1;
                let days = self.state.streak;
                info!(days, "Streak extended");
                self.emit(GameEvent::StreakExtended { days });

                match days {
                    3 => {
                        self.unlock_achievement(STREAK_3);
                    }
                    7 => {
                        self.unlock_achievement(STREAK_7);
                    }
                    _ => {}
                }
                StreakOutcome::Extended(days)
            }
            _ => {
                debug!(?last_visit, "Streak reset");
                self.state.streak = 1;
                StreakOutcome::Reset
            }
        };

        self.state.last_visit = Some(today);
        self.unlock_achievement(FIRST_LOGIN);
        outcome
    }

    /// Unlock everything whose predicate holds for `activity`
    pub fn check_achievements(&mut self, rules: &AchievementRules, activity: &Activity<'_>) {
        for id in rules.evaluate(activity) {
            self.unlock_achievement(id);
        }
    }

    /// Drain pending events in emission order
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        if self.notifications_enabled {
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::achievements::{ADD_TRANSACTION, SAVE_MONEY};
    use crate::game::rules::create_default_rules;
    use crate::models::{Category, Transaction, TransactionType};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_points_levels_up_once() {
        let mut engine = GameEngine::new(GameState::default());
        engine.add_points(150);

        assert_eq!(engine.level(), 2);
        let events = engine.take_events();
        assert_eq!(
            events,
            vec![GameEvent::LevelUp { level: 2, title: "Savings Scout".to_string() }]
        );

        engine.add_points(10);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_jump_across_levels_emits_single_event() {
        let mut engine = GameEngine::new(GameState::default());
        engine.add_points(700);
        assert_eq!(engine.level(), 4);
        assert_eq!(engine.take_events().len(), 1);
    }

    #[test]
    fn test_negative_points_floor_at_zero_without_level_up() {
        let mut engine = GameEngine::new(GameState::default());
        engine.add_points(150);
        assert_eq!(engine.level(), 2);
        engine.take_events();

        engine.add_points(-500);

        assert_eq!(engine.points(), 0);
        assert_eq!(engine.level(), 1);
        assert!(engine
            .take_events()
            .iter()
            .all(|e| !matches!(e, GameEvent::LevelUp { .. })));
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut engine = GameEngine::new(GameState::default());

        assert!(engine.unlock_achievement(SAVE_MONEY));
        let after_first = engine.points();
        assert_eq!(after_first, 25);

        assert!(!engine.unlock_achievement(SAVE_MONEY));
        assert_eq!(engine.points(), after_first);
    }

    #[test]
    fn test_unknown_achievement_is_noop() {
        let mut engine = GameEngine::new(GameState::default());
        assert!(!engine.unlock_achievement("does_not_exist"));
        assert_eq!(engine.points(), 0);
    }

    #[test]
    fn test_milestone_level_unlocks_level_5() {
        let mut engine = GameEngine::new(GameState::default());
        engine.add_points(1000);

        assert!(engine.state().is_unlocked(LEVEL_5));
        // milestone reward lands on top of the crossing
        assert_eq!(engine.points(), 1100);
        assert_eq!(engine.level(), 5);
    }

    #[test]
    fn test_milestone_reward_can_cross_next_level() {
        let mut engine = GameEngine::new(GameState::default());
        engine.add_points(1450);

        assert_eq!(engine.points(), 1550);
        assert_eq!(engine.level(), 6);

        let level_ups: Vec<u32> = engine
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::LevelUp { level, .. } => Some(level),
                _ => None,
            })
            .collect();
        assert_eq!(level_ups, vec![5, 6]);
    }

    #[test]
    fn test_streak_yesterday_hits_three() {
        let today = day(2024, 6, 10);
        let mut state = GameState::default();
        state.streak = 2;
        state.last_visit = Some(day(2024, 6, 9));
        state.achievements.iter_mut().for_each(|a| {
            if a.id == FIRST_LOGIN {
                a.unlocked = true;
            }
        });

        let mut engine = GameEngine::new(state);
        let outcome = engine.evaluate_daily_streak(today);

        assert_eq!(outcome, StreakOutcome::Extended(3));
        assert_eq!(engine.streak(), 3);
        assert!(engine.state().is_unlocked(STREAK_3));
        assert_eq!(engine.points(), 30);
        assert_eq!(engine.state().last_visit, Some(today));
    }

    #[test]
    fn test_streak_same_day_is_noop() {
        let today = day(2024, 6, 10);
        let mut state = GameState::default();
        state.streak = 4;
        state.last_visit = Some(today);

        let mut engine = GameEngine::new(state);
        assert_eq!(engine.evaluate_daily_streak(today), StreakOutcome::SameDay);
        assert_eq!(engine.streak(), 4);
        assert_eq!(engine.points(), 0);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_streak_gap_resets() {
        let mut state = GameState::default();
        state.streak = 6;
        state.last_visit = Some(day(2024, 6, 1));

        let mut engine = GameEngine::new(state);
        assert_eq!(engine.evaluate_daily_streak(day(2024, 6, 10)), StreakOutcome::Reset);
        assert_eq!(engine.streak(), 1);
    }

    #[test]
    fn test_first_visit_unlocks_first_login() {
        let mut engine = GameEngine::new(GameState::default());
        assert_eq!(engine.evaluate_daily_streak(day(2024, 1, 1)), StreakOutcome::Reset);
        assert_eq!(engine.streak(), 1);
        assert!(engine.state().is_unlocked(FIRST_LOGIN));
        assert_eq!(engine.points(), 10);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let mut state = GameState::default();
        state.streak = 6;
        state.last_visit = Some(day(2024, 2, 29));

        let mut engine = GameEngine::new(state);
        assert_eq!(engine.evaluate_daily_streak(day(2024, 3, 1)), StreakOutcome::Extended(7));
        assert!(engine.state().is_unlocked(STREAK_7));
    }

    #[test]
    fn test_disabled_notifications_do_not_change_state() {
        let mut loud = GameEngine::new(GameState::default());
        let mut quiet = GameEngine::new(GameState::default()).with_notifications(false);

        for engine in [&mut loud, &mut quiet] {
            engine.evaluate_daily_streak(day(2024, 1, 1));
            engine.add_points(995);
            engine.unlock_achievement(SAVE_MONEY);
        }

        assert_eq!(loud.state(), quiet.state());
        assert!(!loud.take_events().is_empty());
        assert!(quiet.take_events().is_empty());
    }

    #[test]
    fn test_normalize_recomputes_stale_level() {
        let mut state = GameState::default();
        state.points = 650;
        state.level = 1;

        let engine = GameEngine::new(state);
        assert_eq!(engine.level(), 4);
    }

    #[test]
    fn test_check_achievements_from_activity() {
        let rules = create_default_rules();
        let txs = vec![Transaction::new(
            day(2024, 1, 1),
            100.0,
            "Paycheck",
            Category::Income,
            TransactionType::Income,
        )];

        let mut engine = GameEngine::new(GameState::default());
        engine.check_achievements(&rules, &Activity::TransactionAdded { transactions: &txs });

        assert!(engine.state().is_unlocked(ADD_TRANSACTION));
        assert!(engine.state().is_unlocked(SAVE_MONEY));
        assert_eq!(engine.points(), 40);
    }
}
