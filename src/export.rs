//! Transaction export / import as pretty-printed JSON

use crate::error::BuddyError;
use crate::models::Transaction;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("budget_buddy_export_{}.json", date.format("%Y-%m-%d"))
}

pub fn export_transactions(transactions: &[Transaction], date: NaiveDate) -> Result<ExportDocument> {
    Ok(ExportDocument {
        file_name: export_file_name(date),
        contents: serde_json::to_string_pretty(transactions)?,
    })
}

/// Parse a previously exported list. Every entry must be a well-formed
/// transaction with a positive amount.
pub fn import_transactions(json: &str) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(json)?;

    if let Some(bad) = transactions
        .iter()
        .find(|t| !t.amount.is_finite() || t.amount <= 0.0)
    {
        return Err(BuddyError::validation(format!(
            "transaction {} has an invalid amount",
            bad.id
        )));
    }

    Ok(transactions)
}
