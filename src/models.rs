//! Core data models for the budget tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

/// Fixed set of transaction categories.
///
/// Declaration order is the tie-break order wherever categories are ranked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Healthcare,
    Shopping,
    Utilities,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Housing,
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Utilities,
        Category::Income,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }

    /// Chart color used by the dashboard palette
    pub fn color(&self) -> &'static str {
        match self {
            Category::Housing => "#9b87f5",
            Category::Food => "#60a5fa",
            Category::Transportation => "#fb923c",
            Category::Entertainment => "#facc15",
            Category::Healthcare => "#4ade80",
            Category::Shopping => "#f87171",
            Category::Utilities => "#38bdf8",
            Category::Income => "#4ade80",
            Category::Other => "#94a3b8",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

//
// ================= Transaction =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    /// Always positive; the direction lives in `kind`
    pub amount: f64,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        description: impl Into<String>,
        category: Category,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            amount,
            description: description.into(),
            category,
            kind,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

//
// ================= Budget =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: Category,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyBudget {
    /// Format: "YYYY-MM"
    pub month: String,
    pub budgets: Vec<Budget>,
}

impl MonthlyBudget {
    pub fn month_key(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    pub fn get(&self, category: Category) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Sets the amount for a category, keeping at most one entry per category.
    /// Returns true when a new entry was created.
    pub fn upsert(&mut self, category: Category, amount: f64) -> bool {
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => {
                existing.amount = amount;
                false
            }
            None => {
                self.budgets.push(Budget { category, amount });
                true
            }
        }
    }
}

//
// ================= User =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
}
