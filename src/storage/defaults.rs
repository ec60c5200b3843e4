//! Seed data written on first read of an empty store

use crate::assistant::conversation::Conversation;
use crate::models::{Budget, Category, MonthlyBudget, Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};

/// Greeting stored with the seeded conversation
pub const SEED_GREETING: &str =
    "Hello! I'm your Budget Buddy assistant. How can I help you with your finances today?";

/// (day of month, amount, description, category, type)
const SEED_TRANSACTIONS: &[(u32, f64, &str, Category, TransactionType)] = &[
    (1, 2500.0, "Monthly Salary", Category::Income, TransactionType::Income),
    (2, 1000.0, "Rent Payment", Category::Housing, TransactionType::Expense),
    (3, 200.0, "Grocery Shopping", Category::Food, TransactionType::Expense),
    (5, 50.0, "Gas", Category::Transportation, TransactionType::Expense),
    (7, 80.0, "Dinner with friends", Category::Food, TransactionType::Expense),
    (9, 120.0, "Electric Bill", Category::Utilities, TransactionType::Expense),
    (11, 60.0, "Movie Night", Category::Entertainment, TransactionType::Expense),
    (14, 150.0, "New Shoes", Category::Shopping, TransactionType::Expense),
    (15, 500.0, "Freelance Work", Category::Income, TransactionType::Income),
    (18, 45.0, "Pharmacy", Category::Healthcare, TransactionType::Expense),
    (21, 35.0, "Internet Bill", Category::Utilities, TransactionType::Expense),
    (25, 70.0, "Birthday Gift", Category::Shopping, TransactionType::Expense),
    (28, 25.0, "Mobile Recharge", Category::Utilities, TransactionType::Expense),
];

const SEED_BUDGETS: &[(Category, f64)] = &[
    (Category::Housing, 1200.0),
    (Category::Food, 400.0),
    (Category::Transportation, 150.0),
    (Category::Entertainment, 100.0),
    (Category::Healthcare, 100.0),
    (Category::Shopping, 200.0),
    (Category::Utilities, 200.0),
    (Category::Other, 150.0),
];

/// Sample month of activity dated within `today`'s month
pub fn default_transactions(today: NaiveDate) -> Vec<Transaction> {
    SEED_TRANSACTIONS
        .iter()
        .filter_map(|(day, amount, description, category, kind)| {
            let date = today.with_day(*day)?;
            Some(Transaction::new(date, *amount, *description, *category, *kind))
        })
        .collect()
}

pub fn default_budget(today: NaiveDate) -> MonthlyBudget {
    MonthlyBudget {
        month: MonthlyBudget::month_key(today),
        budgets: SEED_BUDGETS
            .iter()
            .map(|(category, amount)| Budget {
                category: *category,
                amount: *amount,
            })
            .collect(),
    }
}

pub fn default_conversation() -> Conversation {
    Conversation::with_greeting(SEED_GREETING)
}
