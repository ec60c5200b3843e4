//! Financial metrics engine
//!
//! Pure, stateless transforms over a transaction list. Nothing here can
//! fail: an empty list yields zero totals and empty mappings.

use crate::models::{Budget, Category, Transaction, TransactionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expense totals keyed by category. Categories without expenses are absent.
pub type CategorySpending = BTreeMap<Category, f64>;

pub fn total_income(transactions: &[Transaction]) -> f64 {
    sum_of(transactions, TransactionType::Income)
}

pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    sum_of(transactions, TransactionType::Expense)
}

pub fn balance(transactions: &[Transaction]) -> f64 {
    total_income(transactions) - total_expenses(transactions)
}

fn sum_of(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn spending_by_category(transactions: &[Transaction]) -> CategorySpending {
    let mut spending = CategorySpending::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *spending.entry(tx.category).or_insert(0.0) += tx.amount;
    }
    spending
}

/// Expense categories in the order their first expense appears
pub fn expense_category_order(transactions: &[Transaction]) -> Vec<Category> {
    let mut order = Vec::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        if !order.contains(&tx.category) {
            order.push(tx.category);
        }
    }
    order
}

/// Categories ranked by amount, highest first. Ties keep input order.
pub fn rank_categories(spending: impl IntoIterator<Item = (Category, f64)>) -> Vec<(Category, f64)> {
    let mut ranked: Vec<(Category, f64)> = spending.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

//
// ================= Budget vs Actual =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetComparison {
    pub category: Category,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Pairs each budget entry with actual spending, in budget-list order.
pub fn budget_vs_actual(transactions: &[Transaction], budgets: &[Budget]) -> Vec<BudgetComparison> {
    let spending = spending_by_category(transactions);

    budgets
        .iter()
        .map(|budget| {
            let spent = spending.get(&budget.category).copied().unwrap_or(0.0);
            BudgetComparison {
                category: budget.category,
                budgeted: budget.amount,
                spent,
                remaining: budget.amount - spent,
            }
        })
        .collect()
}

//
// ================= Snapshot =================
//

/// Metrics tuple handed to the assistant and the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSnapshot {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub spending_by_category: CategorySpending,
    /// First-expense order of the spending categories
    #[serde(default)]
    pub category_order: Vec<Category>,
}

impl FinancialSnapshot {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income = total_income(transactions);
        let expenses = total_expenses(transactions);

        Self {
            income,
            expenses,
            balance: income - expenses,
            spending_by_category: spending_by_category(transactions),
            category_order: expense_category_order(transactions),
        }
    }

    /// Spending in first-expense order. Categories missing from
    /// `category_order` follow in category order.
    pub fn spending_in_order(&self) -> Vec<(Category, f64)> {
        let mut out: Vec<(Category, f64)> = self
            .category_order
            .iter()
            .filter_map(|c| self.spending_by_category.get(c).map(|a| (*c, *a)))
            .collect();
        for (category, amount) in &self.spending_by_category {
            if !self.category_order.contains(category) {
                out.push((*category, *amount));
            }
        }
        out
    }

    /// Up to `n` categories ranked by spending. Ties keep first-expense order.
    pub fn top_categories(&self, n: usize) -> Vec<(Category, f64)> {
        let mut ranked = rank_categories(self.spending_in_order());
        ranked.truncate(n);
        ranked
    }

    /// Highest-spending category, or `None` when there are no expenses.
    pub fn top_category(&self) -> Option<(Category, f64)> {
        self.top_categories(1).into_iter().next()
    }
}

//
// ================= Chart Data =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Spending slices for the dashboard pie chart, largest first.
pub fn category_chart_data(transactions: &[Transaction]) -> Vec<ChartSlice> {
    rank_categories(FinancialSnapshot::from_transactions(transactions).spending_in_order())
        .into_iter()
        .map(|(category, value)| ChartSlice {
            name: category.to_string(),
            value,
            color: category.color().to_string(),
        })
        .collect()
}

//
// ================= Formatting =================
//

/// en-US dollar formatting: `$1,234.56`, `-$12.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Rounded share of `total`; `"0%"` when total is zero.
pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0%".to_string();
    }
    format!("{}%", ((value / total) * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(amount: f64, category: Category, kind: TransactionType) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            amount,
            "test",
            category,
            kind,
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(2500.0, Category::Income, TransactionType::Income),
            tx(1000.0, Category::Housing, TransactionType::Expense),
            tx(200.0, Category::Food, TransactionType::Expense),
            tx(80.0, Category::Food, TransactionType::Expense),
            tx(500.0, Category::Income, TransactionType::Income),
            tx(45.5, Category::Healthcare, TransactionType::Expense),
        ]
    }

    #[test]
    fn test_balance_is_income_minus_expenses() {
        let txs = sample();
        assert_eq!(total_income(&txs), 3000.0);
        assert_eq!(total_expenses(&txs), 1325.5);
        assert_eq!(total_income(&txs) - total_expenses(&txs), balance(&txs));
    }

    #[test]
    fn test_category_sums_match_total_expenses() {
        let txs: Vec<Transaction> = sample().into_iter().filter(|t| t.is_expense()).collect();
        let spending = spending_by_category(&txs);
        let sum: f64 = spending.values().sum();
        assert!((sum - total_expenses(&txs)).abs() < 1e-9);
    }

    #[test]
    fn test_categories_without_expenses_are_absent() {
        let spending = spending_by_category(&sample());
        assert_eq!(spending.get(&Category::Food), Some(&280.0));
        assert!(!spending.contains_key(&Category::Shopping));
        assert!(!spending.contains_key(&Category::Income));
    }

    #[test]
    fn test_empty_input() {
        let snapshot = FinancialSnapshot::from_transactions(&[]);
        assert_eq!(snapshot.income, 0.0);
        assert_eq!(snapshot.expenses, 0.0);
        assert_eq!(snapshot.balance, 0.0);
        assert!(snapshot.spending_by_category.is_empty());
        assert!(snapshot.top_category().is_none());
        assert!(category_chart_data(&[]).is_empty());
    }

    #[test]
    fn test_budget_vs_actual() {
        let txs = vec![tx(250.0, Category::Food, TransactionType::Expense)];
        let budgets = vec![
            Budget { category: Category::Other, amount: 150.0 },
            Budget { category: Category::Food, amount: 400.0 },
        ];

        let result = budget_vs_actual(&txs, &budgets);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].category, Category::Other);
        assert_eq!(result[0].spent, 0.0);
        assert_eq!(result[0].remaining, 150.0);
        assert_eq!(
            result[1],
            BudgetComparison {
                category: Category::Food,
                budgeted: 400.0,
                spent: 250.0,
                remaining: 150.0,
            }
        );
    }

    #[test]
    fn test_top_categories_ranked_with_stable_ties() {
        let txs = vec![
            tx(100.0, Category::Shopping, TransactionType::Expense),
            tx(100.0, Category::Food, TransactionType::Expense),
            tx(300.0, Category::Utilities, TransactionType::Expense),
        ];
        let snapshot = FinancialSnapshot::from_transactions(&txs);
        let top: Vec<Category> = snapshot.top_categories(3).into_iter().map(|(c, _)| c).collect();
        assert_eq!(top, vec![Category::Utilities, Category::Shopping, Category::Food]);
    }

    #[test]
    fn test_spending_follows_first_expense_order() {
        let txs = vec![
            tx(40.0, Category::Utilities, TransactionType::Expense),
            tx(900.0, Category::Income, TransactionType::Income),
            tx(10.0, Category::Food, TransactionType::Expense),
            tx(25.0, Category::Utilities, TransactionType::Expense),
            tx(60.0, Category::Entertainment, TransactionType::Expense),
        ];
        let snapshot = FinancialSnapshot::from_transactions(&txs);

        assert_eq!(
            snapshot.category_order,
            vec![Category::Utilities, Category::Food, Category::Entertainment]
        );
        assert_eq!(
            snapshot.spending_in_order(),
            vec![
                (Category::Utilities, 65.0),
                (Category::Food, 10.0),
                (Category::Entertainment, 60.0),
            ]
        );
    }

    #[test]
    fn test_chart_ties_follow_first_expense_order() {
        let txs = vec![
            tx(50.0, Category::Shopping, TransactionType::Expense),
            tx(50.0, Category::Food, TransactionType::Expense),
        ];
        let names: Vec<String> = category_chart_data(&txs).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Shopping", "Food"]);
    }

    #[test]
    fn test_chart_data_sorted_with_colors() {
        let slices = category_chart_data(&sample());
        assert_eq!(slices[0].name, "Housing");
        assert_eq!(slices[0].color, "#9b87f5");
        assert!(slices.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(45.5), "$45.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-250.0), "-$250.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(1.0, 0.0), "0%");
        assert_eq!(format_percentage(250.0, 400.0), "63%");
        assert_eq!(format_percentage(400.0, 400.0), "100%");
    }
}
