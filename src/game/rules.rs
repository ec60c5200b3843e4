//! Achievement predicates
//!
//! Rules-based unlock checks run after user activity.
//! Deterministic; the engine decides what an unlock means.

use crate::game::achievements::{ADD_TRANSACTION, CREATE_BUDGET, SAVE_MONEY};
use crate::metrics;
use crate::models::{MonthlyBudget, Transaction};
use tracing::debug;

/// What the user just did
#[derive(Debug, Clone, Copy)]
pub enum Activity<'a> {
    TransactionAdded { transactions: &'a [Transaction] },
    BudgetSaved { budget: &'a MonthlyBudget },
}

/// Trait for a single achievement predicate
pub trait AchievementRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Achievement unlocked when the predicate holds
    fn achievement_id(&self) -> &'static str;

    fn is_met(&self, activity: &Activity<'_>) -> bool;
}

/// Ordered rule list evaluated after each activity
pub struct AchievementRules {
    rules: Vec<Box<dyn AchievementRule>>,
}

impl AchievementRules {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn AchievementRule>) {
        self.rules.push(rule);
    }

    /// Ids of achievements whose predicate holds, in rule order
    pub fn evaluate(&self, activity: &Activity<'_>) -> Vec<&'static str> {
        let (names, met): (Vec<&'static str>, Vec<&'static str>) = self
            .rules
            .iter()
            .filter(|rule| rule.is_met(activity))
            .map(|rule| (rule.name(), rule.achievement_id()))
            .unzip();

        debug!(rule_count = self.rules.len(), matched = ?names, "Achievement rules evaluated");
        met
    }
}

impl Default for AchievementRules {
    fn default() -> Self {
        Self::new()
    }
}

//
// ================= Built-in Rules =================
//

pub struct TransactionTrackerRule;

impl AchievementRule for TransactionTrackerRule {
    fn name(&self) -> &'static str {
        "transaction_tracker"
    }

    fn achievement_id(&self) -> &'static str {
        ADD_TRANSACTION
    }

    fn is_met(&self, activity: &Activity<'_>) -> bool {
        matches!(activity, Activity::TransactionAdded { transactions } if !transactions.is_empty())
    }
}

/// Income exceeds expenses after a transaction lands
pub struct SavingStarRule;

impl AchievementRule for SavingStarRule {
    fn name(&self) -> &'static str {
        "saving_star"
    }

    fn achievement_id(&self) -> &'static str {
        SAVE_MONEY
    }

    fn is_met(&self, activity: &Activity<'_>) -> bool {
        match activity {
            Activity::TransactionAdded { transactions } => {
                metrics::total_income(transactions) > metrics::total_expenses(transactions)
            }
            _ => false,
        }
    }
}

pub struct BudgetBuilderRule;

impl AchievementRule for BudgetBuilderRule {
    fn name(&self) -> &'static str {
        "budget_builder"
    }

    fn achievement_id(&self) -> &'static str {
        CREATE_BUDGET
    }

    fn is_met(&self, activity: &Activity<'_>) -> bool {
        match activity {
            Activity::BudgetSaved { budget } => budget.budgets.iter().any(|b| b.amount > 0.0),
            _ => false,
        }
    }
}

/// Factory: rules shipped with the app
pub fn create_default_rules() -> AchievementRules {
    let mut rules = AchievementRules::new();
    rules.add_rule(Box::new(TransactionTrackerRule));
    rules.add_rule(Box::new(SavingStarRule));
    rules.add_rule(Box::new(BudgetBuilderRule));
    rules
}
