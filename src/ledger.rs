//! Transaction entry and filtering

use crate::error::BuddyError;
use crate::models::{Category, Transaction, TransactionType};
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw form input for a new transaction. The amount is kept as typed so
/// parsing failures can be reported alongside missing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewTransaction {
    pub fn expense(
        date: NaiveDate,
        amount: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            date,
            amount: amount.into(),
            description: description.into(),
            category,
            kind: TransactionType::Expense,
        }
    }

    pub fn income(date: NaiveDate, amount: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            date,
            amount: amount.into(),
            description: description.into(),
            category: Category::Income,
            kind: TransactionType::Income,
        }
    }

    /// Check the input and build the transaction with a fresh id
    pub fn validate(self) -> Result<Transaction> {
        self.into_transaction().map_err(Into::into)
    }

    /// Like [`validate`](Self::validate), keeping the reason for display
    pub fn into_transaction(self) -> std::result::Result<Transaction, Rejection> {
        let raw_amount = self.amount.trim();
        let description = self.description.trim();

        if raw_amount.is_empty() || description.is_empty() {
            return Err(Rejection::MissingFields);
        }

        let amount = match raw_amount.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => return Err(Rejection::InvalidAmount),
        };

        Ok(Transaction::new(
            self.date,
            amount,
            description,
            self.category,
            self.kind,
        ))
    }
}

/// Why an entry form was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingFields,
    InvalidAmount,
}

impl Rejection {
    pub fn title(self) -> &'static str {
        match self {
            Rejection::MissingFields => "Please fill in all required fields",
            Rejection::InvalidAmount => "Invalid amount",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rejection::MissingFields => "Amount and description are required",
            Rejection::InvalidAmount => "Please enter a valid positive number",
        }
    }
}

impl From<Rejection> for BuddyError {
    fn from(rejection: Rejection) -> Self {
        BuddyError::validation(rejection.message())
    }
}

/// List filter; `None` fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub kind: Option<TransactionType>,
    /// Case-insensitive match on description or category name
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.category.is_some_and(|c| c != tx.category) {
            return false;
        }
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                tx.description.to_lowercase().contains(&query)
                    || tx.category.as_str().to_lowercase().contains(&query)
            }
            _ => true,
        }
    }

    /// Matching transactions, newest first
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}
