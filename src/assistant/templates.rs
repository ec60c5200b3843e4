//! Markdown reply templates
//!
//! Each renderer is a pure function of the snapshot. Lines that need a top
//! spending category are left out when there are no expenses.

use crate::metrics::{format_currency, format_percentage, FinancialSnapshot};
use crate::models::Category;

pub fn save_more(snapshot: &FinancialSnapshot) -> String {
    let mut tips: Vec<String> = Vec::with_capacity(4);

    let top_two = snapshot.top_categories(2);
    if let Some((_, top_amount)) = top_two.first() {
        let names: Vec<&str> = top_two.iter().map(|(c, _)| c.as_str()).collect();
        tips.push(format!(
            "Your {} expenses are your highest categories. \n   Try reducing these by 10-15% to save {} - {} per month.",
            names.join(" and "),
            format_currency(top_amount * 0.10),
            format_currency(top_amount * 0.15),
        ));
    }

    tips.push("**Try the 50/30/20 Rule**: 50% for needs, 30% for wants, and 20% for savings.".to_string());
    tips.push(
        "**Automation is Your Friend**: Set up automatic transfers to a savings account on payday to build savings consistently."
            .to_string(),
    );
    tips.push(format!(
        "**Challenge**: Try a \"no-spend weekend\" once a month - this small change can save {} monthly based on your patterns.",
        format_currency(snapshot.expenses * 0.07)
    ));

    let mut out = String::from(
        "Based on your spending patterns, I see a few opportunities to save more:\n\n✨ **Top Saving Opportunities**\n\n",
    );
    for (i, tip) in tips.iter().enumerate() {
        out.push_str(&format!("{}. {}\n\n", i + 1, tip));
    }
    out.push_str("Would you like me to help create a specific savings plan for any category?");
    out
}

pub fn spending_analysis(snapshot: &FinancialSnapshot) -> String {
    let mut out = String::from("# 📊 Spending Analysis Summary\n\n");
    out.push_str(&format!("**Total Expenses**: {}\n", format_currency(snapshot.expenses)));
    out.push_str(&format!("**Total Income**: {}\n", format_currency(snapshot.income)));
    out.push_str(&format!("**Current Balance**: {}\n", format_currency(snapshot.balance)));

    let top_three = snapshot.top_categories(3);
    if !top_three.is_empty() {
        out.push_str("\n## 🔍 Top Categories:\n");
        for (i, (category, amount)) in top_three.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}**: {} ({} of total)\n",
                i + 1,
                category,
                format_currency(*amount),
                format_percentage(*amount, snapshot.expenses),
            ));
        }
    }

    out.push_str("\n## 💡 Key Insights:\n");
    if snapshot.balance >= 0.0 {
        out.push_str(&format!(
            "- You've spent {} this month\n",
            format_currency(snapshot.income - snapshot.balance)
        ));
        out.push_str(&format!(
            "- You have {} remaining in your budget\n",
            format_currency(snapshot.balance)
        ));
    } else {
        out.push_str("- You've spent more than you earned this month\n");
        out.push_str(&format!(
            "- You're currently {} over budget\n",
            format_currency(snapshot.balance.abs())
        ));
    }

    if let Some((top, amount)) = snapshot.top_category() {
        out.push_str(&format!(
            "- Your spending on {} is {} of your total expenses\n",
            top,
            format_percentage(amount, snapshot.expenses)
        ));
        out.push_str(&format!(
            "\n## 🎯 Recommendations:\nConsider reallocating some of your {} budget to savings or paying down debt.\n",
            top
        ));
    }

    out.push_str("\nWould you like more detailed analysis on any specific category?");
    out
}

/// Discretionary categories get a 10% cut; everything else is maintained.
fn plan_adjustment(category: Category) -> f64 {
    match category {
        Category::Entertainment | Category::Shopping => 0.9,
        Category::Income => 0.0,
        _ => 1.0,
    }
}

pub fn budget_plan(snapshot: &FinancialSnapshot) -> String {
    let mut out = format!(
        "# 🌟 Personalized Budget Plan\n\nBased on your income of {} and current spending patterns, I've created a customized budget plan for you:\n\n## 💰 Recommended Monthly Allocations:\n\n",
        format_currency(snapshot.income)
    );

    for (category, amount) in snapshot.spending_in_order() {
        let adjustment = plan_adjustment(category);
        let recommended = amount * adjustment;
        let share = if snapshot.income > 0.0 {
            recommended / snapshot.income * 100.0
        } else {
            0.0
        };
        let verdict = if adjustment < 1.0 {
            "🔽 10% reduction recommended"
        } else {
            "✅ maintain current"
        };

        out.push_str(&format!(
            "- **{}**: {} ({:.1}% of income) {}\n",
            category,
            format_currency(recommended),
            share,
            verdict
        ));
    }

    out.push_str(&format!(
        "\n## 🏆 Savings Goal\nI recommend allocating at least **{}** (20% of income) to savings each month.\n\n",
        format_currency(snapshot.income * 0.2)
    ));
    out.push_str("## 🚀 Next Steps:\n1. Track your expenses in each category\n2. Review progress weekly\n3. Adjust as needed at month-end\n\n");
    out.push_str("Would you like me to create a more detailed plan for a specific category?");
    out
}

pub fn debt_strategy(snapshot: &FinancialSnapshot) -> String {
    let monthly = if snapshot.balance > 0.0 {
        snapshot.balance * 0.8
    } else {
        snapshot.income * 0.15
    };

    format!(
        r#"# 🛡️ Debt Management Strategy

Based on your financial profile, here's a personalized debt management plan:

## 💳 Debt Reduction Approach

I recommend the **Avalanche Method**:
1. List all debts from highest to lowest interest rate
2. Pay minimum payments on all debts
3. Put extra money toward the highest-interest debt first
4. Once paid off, move to the next highest-interest debt

## 🧮 Potential Results

If you allocate {} monthly to debt payment:
- You could save approximately {} in interest over time
- Potential debt-free timeline: 18-24 months (estimated)

## 🌟 Pro Tips:
- Consider balance transfers for high-interest credit cards
- Automate payments to avoid missed deadlines
- Consider consolidation for multiple high-interest debts

Would you like to create a specific debt payoff plan with your actual debt amounts and interest rates?"#,
        format_currency(monthly),
        format_currency(snapshot.income * 0.05),
    )
}

pub fn investment_guidance(snapshot: &FinancialSnapshot) -> String {
    format!(
        r#"# 💎 Investment Strategy Guidance

Based on your financial profile, here are personalized investment recommendations:

## 🏦 Suggested Investment Allocation

With your current situation, consider this allocation:
- **Emergency Fund**: 3-6 months of expenses in high-yield savings (priority if not established)
- **Retirement**: 15% of income in tax-advantaged accounts (401(k), IRA)
- **Medium-term goals**: 5-10% in balanced funds or ETFs
- **Growth investments**: 5-10% in diversified stock index funds

## 📊 Getting Started Steps

1. **First Priority**: Establish emergency fund of {} to {}
2. **Next Step**: Max out employer 401(k) match if available
3. **Then**: Consider a Roth IRA for tax-free growth
4. **Finally**: Explore taxable investment accounts for additional goals

## 💡 Key Principles:
- Diversify investments across asset classes
- Focus on low-fee index funds for long-term growth
- Invest regularly regardless of market conditions
- Rebalance portfolio annually

Would you like more specific investment recommendations or information about particular investment types?"#,
        format_currency(snapshot.expenses * 3.0),
        format_currency(snapshot.expenses * 6.0),
    )
}

pub fn overview(snapshot: &FinancialSnapshot) -> String {
    let mut out = String::from(
        "# 🚀 Financial AI Assistant\n\nI'm your Budget Buddy AI assistant, here to help with your financial questions.\n\n## 📊 Your Financial Snapshot:\n",
    );
    out.push_str(&format!("- Income: {}\n", format_currency(snapshot.income)));
    out.push_str(&format!("- Expenses: {}\n", format_currency(snapshot.expenses)));
    out.push_str(&format!("- Balance: {}\n", format_currency(snapshot.balance)));
    if let Some((top, amount)) = snapshot.top_category() {
        out.push_str(&format!("- Top expense: {} ({})\n", top, format_currency(amount)));
    }

    out.push_str(
        r#"
## 💡 I Can Help With:
- Analyzing your spending patterns
- Creating a personalized budget
- Identifying saving opportunities
- Debt reduction strategies
- Investment guidance
- Financial goal planning

## 🎯 Suggested Questions:
- "How can I save more this month?"
- "Analyze my spending patterns"
- "Suggest a budget based on my income"
- "Help me reduce my debt"
- "How should I start investing?"

What specific financial goal would you like help with today?"#,
    );
    out
}
