use budget_buddy::{
    metrics::format_currency, AppConfig, BudgetBuddy, Category, NewTransaction, ReplyOutcome,
};
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!(data_dir = ?config.data_dir, "Budget Buddy starting");

    let today = Local::now().date_naive();
    let mut app = BudgetBuddy::open(config, today).await?;

    app.login("demo@budgetbuddy.app", "demo").await?;

    app.add_transaction(NewTransaction::expense(today, "18.40", "Lunch", Category::Food))
        .await?;
    app.set_budget(Category::Food, 450.0).await?;

    let dashboard = app.dashboard().await?;
    println!("\n=== DASHBOARD ===");
    println!("Income:   {}", format_currency(dashboard.income));
    println!("Expenses: {}", format_currency(dashboard.expenses));
    println!("Balance:  {}", format_currency(dashboard.balance));
    for slice in &dashboard.chart {
        println!("  {:<15} {}", slice.name, format_currency(slice.value));
    }

    println!("\n=== BUDGET ===");
    for row in app.budget_vs_actual().await? {
        println!(
            "  {:<15} {} of {} ({} left)",
            row.category.as_str(),
            format_currency(row.spent),
            format_currency(row.budgeted),
            format_currency(row.remaining)
        );
    }

    app.budget_tip().await?;

    let question = "How can I save more money?";
    println!("\n=== ASSISTANT ===\n> {}", question);
    match app.ask(question).await? {
        ReplyOutcome::Answered(reply) | ReplyOutcome::Failed(reply) => println!("{}", reply.content),
        ReplyOutcome::Cancelled => println!("(cancelled)"),
    }

    println!("\nTry asking:");
    for suggestion in app.suggestions().await? {
        println!("  - {}", suggestion);
    }

    let state = app.game_state();
    println!(
        "\n=== PROGRESS ===\nLevel {} ({}) | {} points | {}-day streak | {}/{} achievements",
        state.level,
        state.level_info().title,
        state.points,
        state.streak,
        state.unlocked_count(),
        state.achievements.len()
    );

    for note in app.drain_notifications() {
        println!("[{:?}] {} - {}", note.severity, note.title, note.description);
    }

    let export = app.export_transactions().await?;
    info!(file = %export.file_name, bytes = export.contents.len(), "Export ready");

    app.shutdown().await?;
    Ok(())
}
