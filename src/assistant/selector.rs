//! Response Selector
//!
//! Maps a free-text question onto one of the reply templates. Rules are
//! checked in order against the lower-cased query and the first match wins;
//! anything unmatched gets the snapshot overview.

use crate::assistant::templates;
use crate::metrics::FinancialSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SaveMore,
    SpendingAnalysis,
    BudgetPlan,
    DebtHelp,
    Investing,
    Overview,
}

/// One (predicate, renderer) pair
pub struct ResponseRule {
    pub intent: Intent,
    matches: fn(&str) -> bool,
    render: fn(&FinancialSnapshot) -> String,
}

const DEBT_KEYWORDS: &[&str] = &["debt", "loans", "credit"];

fn any_of(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

fn wants_to_save(q: &str) -> bool {
    q.contains("save") && q.contains("more")
}

fn wants_analysis(q: &str) -> bool {
    q.contains("summarize")
        || (any_of(q, &["spending", "expenses"]) && any_of(q, &["analysis", "analyze"]))
}

fn wants_budget(q: &str) -> bool {
    q.contains("suggest") && q.contains("budget")
}

fn wants_debt_help(q: &str) -> bool {
    q.contains("help") && any_of(q, DEBT_KEYWORDS)
}

// "invest" also catches "investing" / "investment"
fn wants_to_invest(q: &str) -> bool {
    q.contains("invest")
}

pub const RULES: &[ResponseRule] = &[
    ResponseRule {
        intent: Intent::SaveMore,
        matches: wants_to_save,
        render: templates::save_more,
    },
    ResponseRule {
        intent: Intent::SpendingAnalysis,
        matches: wants_analysis,
        render: templates::spending_analysis,
    },
    ResponseRule {
        intent: Intent::BudgetPlan,
        matches: wants_budget,
        render: templates::budget_plan,
    },
    ResponseRule {
        intent: Intent::DebtHelp,
        matches: wants_debt_help,
        render: templates::debt_strategy,
    },
    ResponseRule {
        intent: Intent::Investing,
        matches: wants_to_invest,
        render: templates::investment_guidance,
    },
];

fn select(query: &str) -> Option<&'static ResponseRule> {
    let query = query.to_lowercase();
    RULES.iter().find(|rule| (rule.matches)(&query))
}

pub fn classify(query: &str) -> Intent {
    select(query).map_or(Intent::Overview, |rule| rule.intent)
}

/// Render the reply for `query` against the current figures
pub fn respond(query: &str, snapshot: &FinancialSnapshot) -> String {
    match select(query) {
        Some(rule) => (rule.render)(snapshot),
        None => templates::overview(snapshot),
    }
}
