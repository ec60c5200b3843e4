//! Suggested follow-up questions shown under the conversation

use crate::metrics::FinancialSnapshot;

/// Expense-to-income ratio above which cost cutting is suggested
const HIGH_SPENDING_RATIO: f64 = 0.8;

pub fn suggestions(snapshot: &FinancialSnapshot) -> Vec<String> {
    let mut out = Vec::with_capacity(5);

    if snapshot.expenses > snapshot.income * HIGH_SPENDING_RATIO {
        out.push("How can I reduce my expenses?".to_string());
    }

    if let Some((top, _)) = snapshot.top_category() {
        out.push(format!("How can I spend less on {}?", top));
    }

    if snapshot.balance > 0.0 {
        out.push("What's the best way to invest my savings?".to_string());
    }

    out.push("Create a budget plan for me".to_string());
    out.push("Analyze my spending patterns".to_string());
    out
}
